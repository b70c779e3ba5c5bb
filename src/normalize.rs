use unicode_normalization::UnicodeNormalization;

use crate::util::memo::MemoTable;

/// Reduce a raw family name to lowercase ASCII letters.
///
/// Diacritics are decomposed first so `Müller` keeps its vowel (`muller`);
/// everything that is not a Latin letter afterwards is dropped. The result
/// may be empty, which means the input has nothing to match on.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.nfd() {
        for lc in ch.to_lowercase() {
            if lc.is_ascii_lowercase() {
                out.push(lc);
                continue;
            }
            match lc {
                'ß' => out.push_str("ss"),
                'æ' => out.push_str("ae"),
                'œ' => out.push_str("oe"),
                'ø' => out.push('o'),
                'đ' => out.push('d'),
                'ł' => out.push('l'),
                _ => {}
            }
        }
    }
    out
}

/// Memoizing wrapper around [`normalize_name`], keyed by the raw input.
#[derive(Debug, Default)]
pub struct NameNormalizer {
    cache: MemoTable<String>,
}

impl NameNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&self, raw: &str) -> String {
        self.cache.get_or_compute(raw, normalize_name)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}
