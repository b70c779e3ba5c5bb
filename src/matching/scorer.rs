//! Pairwise scoring of an input name against one reference name.
//!
//! Score composition:
//! - exact (ASCII case-insensitive) equality short-circuits to 1.0
//! - each agreeing phonetic code adds 0.2
//! - the Levenshtein ratio is added only when at least one code agrees
//! - algorithmic scores are capped at 0.99; 1.0 is reserved for exact matches

use crate::matching::helpers::levenshtein_ratio;
use crate::matching::phonetic::{PhoneticEncoder, PhoneticFingerprint};
use crate::models::{EXACT_MATCH, MatchSignal, PARTIAL_MATCH};

pub const PHONETIC_WEIGHT: f64 = 0.2;
pub const MAX_FUZZY_SCORE: f64 = 0.99;
/// Ratio above which the Levenshtein label is reported
pub const LEVENSHTEIN_LABEL_MIN: f64 = 0.8;

/// Score plus the label describing which signals agreed.
#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    pub score: f64,
    pub method: String,
}

impl PairScore {
    fn exact() -> Self {
        Self {
            score: 1.0,
            method: EXACT_MATCH.to_string(),
        }
    }

    fn none() -> Self {
        Self {
            score: 0.0,
            method: PARTIAL_MATCH.to_string(),
        }
    }
}

/// Join the agreeing signals in their fixed order, or `Partial Match` if none.
pub fn method_label(signals: &[MatchSignal]) -> String {
    if signals.is_empty() {
        return PARTIAL_MATCH.to_string();
    }
    signals
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(" & ")
}

/// Score `input` against `reference`, whose fingerprint is already known.
///
/// An empty name on either side never matches, including two empty names.
pub fn score_pair(
    encoder: &PhoneticEncoder,
    input: &str,
    reference: &str,
    ref_fp: &PhoneticFingerprint,
) -> PairScore {
    if input.is_empty() || reference.is_empty() {
        return PairScore::none();
    }
    if input.eq_ignore_ascii_case(reference) {
        return PairScore::exact();
    }
    let input_fp = encoder.encode(input);
    score_fingerprints(input, &input_fp, reference, ref_fp)
}

/// Scoring once both fingerprints are in hand.
pub fn score_fingerprints(
    input: &str,
    input_fp: &PhoneticFingerprint,
    reference: &str,
    ref_fp: &PhoneticFingerprint,
) -> PairScore {
    if input.is_empty() || reference.is_empty() {
        return PairScore::none();
    }
    if input.eq_ignore_ascii_case(reference) {
        return PairScore::exact();
    }

    // Empty codes come from encoder failures and never count as agreement.
    let agree = |a: &str, b: &str| !a.is_empty() && a == b;
    let soundex = agree(&input_fp.soundex, &ref_fp.soundex);
    let metaphone = agree(&input_fp.metaphone, &ref_fp.metaphone);
    let nysiis = agree(&input_fp.nysiis, &ref_fp.nysiis);

    let lev = if soundex || metaphone || nysiis {
        levenshtein_ratio(input, reference)
    } else {
        0.0
    };

    let mut score = lev;
    let mut signals = Vec::with_capacity(4);
    for (hit, signal) in [
        (soundex, MatchSignal::Soundex),
        (metaphone, MatchSignal::Metaphone),
        (nysiis, MatchSignal::Nysiis),
    ] {
        if hit {
            score += PHONETIC_WEIGHT;
            signals.push(signal);
        }
    }
    if lev > LEVENSHTEIN_LABEL_MIN {
        signals.push(MatchSignal::Levenshtein);
    }

    PairScore {
        score: score.min(MAX_FUZZY_SCORE),
        method: method_label(&signals),
    }
}
