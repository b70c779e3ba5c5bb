use crate::matching::helpers::code_prefix;
use crate::matching::phonetic::PhoneticFingerprint;

/// Cheap pre-check before full scoring.
///
/// Rejects a pair only when all three codes disagree on their first two
/// characters. Equal codes always share a prefix, so any pair the scorer
/// would give a non-zero score passes.
pub fn may_match(input: &PhoneticFingerprint, reference: &PhoneticFingerprint) -> bool {
    code_prefix(&input.soundex) == code_prefix(&reference.soundex)
        || code_prefix(&input.metaphone) == code_prefix(&reference.metaphone)
        || code_prefix(&input.nysiis) == code_prefix(&reference.nysiis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(s: &str, m: &str, n: &str) -> PhoneticFingerprint {
        PhoneticFingerprint {
            soundex: s.into(),
            metaphone: m.into(),
            nysiis: n.into(),
        }
    }

    #[test]
    fn rejects_only_when_every_prefix_differs() {
        let a = fp("S530", "SMT", "SNAT");
        assert!(!may_match(&a, &fp("B650", "BRN", "BRAN")));
        assert!(may_match(&a, &fp("S100", "XXX", "YYY")));
        assert!(may_match(&a, &fp("A000", "SMK", "YYY")));
        assert!(may_match(&a, &fp("A000", "XXX", "SNAL")));
    }

    #[test]
    fn equal_codes_always_pass() {
        let a = fp("M460", "MLR", "MALAR");
        assert!(may_match(&a, &a.clone()));
    }

    #[test]
    fn short_codes_compare_whole() {
        assert!(may_match(&fp("", "K", ""), &fp("X", "K", "Y")));
        assert!(!may_match(&fp("A", "K", "B"), &fp("X", "KN", "Y")));
    }

    #[test]
    fn real_fingerprints() {
        let smith = PhoneticFingerprint::compute("smith");
        let schmidt = PhoneticFingerprint::compute("schmidt");
        let braun = PhoneticFingerprint::compute("braun");
        assert!(may_match(&smith, &schmidt));
        assert!(!may_match(&smith, &braun));
    }
}
