//! Phonetic fingerprints: Soundex, Metaphone and NYSIIS codes per normalized name.

use rphonetic::{Encoder, Metaphone, Nysiis, Soundex};
use serde::{Deserialize, Serialize};

use crate::matching::helpers::encode_guarded;
use crate::util::memo::MemoTable;

/// The three phonetic codes of one normalized name.
///
/// Codes of the empty name are all empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PhoneticFingerprint {
    pub soundex: String,
    pub metaphone: String,
    pub nysiis: String,
}

impl PhoneticFingerprint {
    /// Compute the fingerprint without any caching.
    pub fn compute(name: &str) -> Self {
        Self {
            soundex: encode_guarded("Soundex", name, || Soundex::default().encode(name)),
            metaphone: encode_guarded("Metaphone", name, || Metaphone::new(None).encode(name)),
            nysiis: encode_guarded("NYSIIS", name, || Nysiis::default().encode(name)),
        }
    }
}

/// Memoizing encoder keyed by normalized name.
#[derive(Debug, Default)]
pub struct PhoneticEncoder {
    cache: MemoTable<PhoneticFingerprint>,
}

impl PhoneticEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode(&self, name: &str) -> PhoneticFingerprint {
        self.cache.get_or_compute(name, PhoneticFingerprint::compute)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}
