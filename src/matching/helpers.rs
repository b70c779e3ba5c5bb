//! Shared helper functions for similarity scoring and phonetic encoding.

use std::panic::{UnwindSafe, catch_unwind};

/// Normalized Levenshtein similarity in 0.0..=1.0 (1.0 = identical).
///
/// Indel form: `(len_a + len_b - indel) / (len_a + len_b)`, where `indel` is the
/// insert/delete-only edit distance, so a substitution costs two edits.
/// Two empty strings are identical and score 1.0.
pub(crate) fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    // indel = total - 2 * lcs
    (2 * lcs_len(&a, &b)) as f64 / total as f64
}

/// Longest common subsequence length, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Run a third-party phonetic encoder, turning a panic into an empty code.
///
/// `algo` only labels the warning.
pub(crate) fn encode_guarded<F>(algo: &'static str, name: &str, encode: F) -> String
where
    F: FnOnce() -> String + UnwindSafe,
{
    if name.is_empty() {
        return String::new();
    }
    match catch_unwind(encode) {
        Ok(code) => code,
        Err(_) => {
            log::warn!("{} encoder panicked on input {:?}", algo, name);
            String::new()
        }
    }
}

/// First two characters of a phonetic code (the whole code if shorter).
#[inline]
pub(crate) fn code_prefix(code: &str) -> &str {
    match code.char_indices().nth(2) {
        Some((idx, _)) => &code[..idx],
        None => code,
    }
}
