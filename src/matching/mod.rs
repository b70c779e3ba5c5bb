//! Ranked family-name matching over a reference list.
//!
//! A call runs three stages:
//! 1. exact pass: reference entries whose normalized form equals the input's
//! 2. fuzzy pass: remaining entries, batched, prefiltered by fingerprint
//!    prefix and scored pairwise
//! 3. assembly: exact matches in reference order, then fuzzy matches by
//!    descending score (ties keep reference order), capped at `max_results`
//!    and never more than ten

pub mod filter;
pub(crate) mod helpers;
pub mod phonetic;
pub mod scorer;

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::config::{MAX_RESULTS_CAP, MatchConfig};
use crate::metrics::memory_stats_mb;
use crate::models::ScoredMatch;
use crate::normalize::NameNormalizer;

use filter::may_match;
use phonetic::{PhoneticEncoder, PhoneticFingerprint};
use scorer::{PairScore, score_fingerprints, score_pair};

#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate {
    pub processed: usize,
    pub total: usize,
    pub percent: f32,
    pub mem_used_mb: u64,
    pub mem_avail_mb: u64,
    pub stage: &'static str,
}

impl ProgressUpdate {
    fn at(processed: usize, total: usize, stage: &'static str) -> Self {
        let mem = memory_stats_mb();
        let percent = if total == 0 {
            100.0
        } else {
            (processed as f32 / total as f32) * 100.0
        };
        Self {
            processed,
            total,
            percent,
            mem_used_mb: mem.used_mb,
            mem_avail_mb: mem.avail_mb,
            stage,
        }
    }
}

/// Matching engine owning the normalization and fingerprint caches.
///
/// Caches are advisory: clearing them only costs recomputation. Call
/// [`NameMatcher::clear_caches`] after the reference dataset changes.
#[derive(Debug, Default)]
pub struct NameMatcher {
    normalizer: NameNormalizer,
    encoder: PhoneticEncoder,
    config: MatchConfig,
}

static GLOBAL: OnceLock<NameMatcher> = OnceLock::new();

impl NameMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            normalizer: NameNormalizer::new(),
            encoder: PhoneticEncoder::new(),
            config,
        }
    }

    /// Process-wide matcher with default configuration.
    pub fn global() -> &'static NameMatcher {
        GLOBAL.get_or_init(NameMatcher::default)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    pub fn encoder(&self) -> &PhoneticEncoder {
        &self.encoder
    }

    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }

    pub fn fingerprint(&self, normalized: &str) -> PhoneticFingerprint {
        self.encoder.encode(normalized)
    }

    /// Pairwise score of two normalized names.
    pub fn score(&self, input: &str, reference: &str, ref_fp: &PhoneticFingerprint) -> PairScore {
        score_pair(&self.encoder, input, reference, ref_fp)
    }

    pub fn clear_caches(&self) {
        self.normalizer.clear();
        self.encoder.clear();
    }

    pub fn find_matches<S>(&self, input: &str, references: &[S]) -> Vec<ScoredMatch>
    where
        S: AsRef<str> + Sync,
    {
        self.run(input, references, &self.config, None)
    }

    pub fn find_matches_with_threshold<S>(
        &self,
        input: &str,
        references: &[S],
        threshold: f64,
    ) -> Vec<ScoredMatch>
    where
        S: AsRef<str> + Sync,
    {
        let cfg = MatchConfig {
            threshold,
            ..self.config
        };
        self.run(input, references, &cfg, None)
    }

    /// Like [`find_matches`](Self::find_matches), reporting after every fuzzy batch.
    ///
    /// With `parallel` enabled the callback runs on rayon worker threads.
    pub fn find_matches_with_progress<S, F>(
        &self,
        input: &str,
        references: &[S],
        on_progress: F,
    ) -> Vec<ScoredMatch>
    where
        S: AsRef<str> + Sync,
        F: Fn(ProgressUpdate) + Sync,
    {
        self.run(input, references, &self.config, Some(&on_progress))
    }

    fn run<S>(
        &self,
        input: &str,
        references: &[S],
        cfg: &MatchConfig,
        on_progress: Option<&(dyn Fn(ProgressUpdate) + Sync)>,
    ) -> Vec<ScoredMatch>
    where
        S: AsRef<str> + Sync,
    {
        let processed = self.normalizer.normalize(input);
        if processed.is_empty() {
            log::debug!("input {:?} has no matchable content", input);
            return Vec::new();
        }
        let input_fp = self.encoder.encode(&processed);

        let mut exact = Vec::new();
        for raw in references {
            let raw: &str = raw.as_ref();
            if self.normalizer.normalize(raw) == processed {
                exact.push(ScoredMatch::exact(raw));
            }
        }

        let total = references.len();
        let batch_size = cfg.batch_size.max(1);
        let done = AtomicUsize::new(0);
        let rejected = AtomicUsize::new(0);

        let score_batch = |offset: usize, batch: &[S]| -> Vec<(usize, ScoredMatch)> {
            let mut out = Vec::new();
            for (i, raw) in batch.iter().enumerate() {
                let raw: &str = raw.as_ref();
                let norm = self.normalizer.normalize(raw);
                if norm.is_empty() || norm == processed {
                    continue;
                }
                let ref_fp = self.encoder.encode(&norm);
                if !may_match(&input_fp, &ref_fp) {
                    rejected.fetch_add(1, Ordering::Relaxed);
                    continue;
                }
                let pair = score_fingerprints(&processed, &input_fp, &norm, &ref_fp);
                if pair.score >= cfg.threshold {
                    out.push((
                        offset + i,
                        ScoredMatch {
                            name: raw.to_string(),
                            score: pair.score,
                            method: pair.method,
                        },
                    ));
                }
            }
            let processed_so_far = done.fetch_add(batch.len(), Ordering::Relaxed) + batch.len();
            if let Some(report) = on_progress {
                report(ProgressUpdate::at(processed_so_far, total, "fuzzy_batch"));
            }
            out
        };

        let mut fuzzy: Vec<(usize, ScoredMatch)> = if cfg.parallel {
            references
                .par_chunks(batch_size)
                .enumerate()
                .map(|(ci, batch)| score_batch(ci * batch_size, batch))
                .flatten()
                .collect()
        } else {
            references
                .chunks(batch_size)
                .enumerate()
                .flat_map(|(ci, batch)| score_batch(ci * batch_size, batch))
                .collect()
        };
        // Stable on reference index regardless of how batches were scheduled.
        fuzzy.sort_by(|a, b| b.1.score.total_cmp(&a.1.score).then(a.0.cmp(&b.0)));

        log::debug!(
            "match {:?}: refs={} exact={} fuzzy={} prefiltered_out={}",
            processed,
            total,
            exact.len(),
            fuzzy.len(),
            rejected.load(Ordering::Relaxed)
        );
        if let Some(report) = on_progress {
            report(ProgressUpdate::at(total, total, "complete"));
        }

        exact
            .into_iter()
            .chain(fuzzy.into_iter().map(|(_, m)| m))
            .take(cfg.max_results.min(MAX_RESULTS_CAP))
            .collect()
    }
}

/// Match `input` against `references` using the process-wide matcher.
pub fn find_matches<S>(input: &str, references: &[S], threshold: f64) -> Vec<ScoredMatch>
where
    S: AsRef<str> + Sync,
{
    NameMatcher::global().find_matches_with_threshold(input, references, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_THRESHOLD;
    use std::sync::{Arc, Mutex};

    const ORIGINS: &[&str] = &[
        "Schmidt", "Schmitt", "Müller", "Mueller", "Braun", "Fischer", "Küfer", "Kuefer",
        "Schneider", "Weber", "Meyer", "Wagner", "Becker", "Schulz", "Hoffmann", "Koch",
        "Bauer", "Richter", "Klein", "Wolf", "Schröder", "Neumann", "Schwarz", "Zimmermann",
        "Krüger", "Hartmann", "Lange", "Werner", "Krause", "Lehmann", "Smyth", "Smit",
    ];

    fn matcher() -> NameMatcher {
        NameMatcher::new(MatchConfig::default())
    }

    #[test]
    fn exact_match_is_first() {
        let r = matcher().find_matches("Schmidt", ORIGINS);
        assert_eq!(r[0], ScoredMatch::exact("Schmidt"));
        assert!(r.iter().skip(1).all(|m| !m.is_exact()));
    }

    #[test]
    fn miller_finds_muller() {
        let r = matcher().find_matches("Miller", &["Müller"]);
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].name, "Müller");
        assert!(r[0].score >= 0.85 && r[0].score <= 0.99, "{}", r[0].score);
        assert!(r[0].method.contains("Soundex") || r[0].method.contains("Metaphone"));
    }

    #[test]
    fn brown_finds_braun() {
        let r = matcher().find_matches("Brown", &["Braun"]);
        assert_eq!(r.len(), 1);
        assert!(!r[0].is_exact());
        assert!((0.3..=0.99).contains(&r[0].score));
    }

    #[test]
    fn empty_input_yields_nothing() {
        let m = matcher();
        assert!(m.find_matches("", ORIGINS).is_empty());
        assert!(m.find_matches("123 !?", ORIGINS).is_empty());
        assert!(find_matches("", ORIGINS, DEFAULT_THRESHOLD).is_empty());
    }

    #[test]
    fn unrelated_input_yields_nothing() {
        let r = matcher().find_matches("xyz123", &["Smith"]);
        assert!(r.is_empty());
    }

    #[test]
    fn duplicate_exact_entries_are_kept() {
        let r = matcher().find_matches("Smith", &["Smith", "Smith"]);
        assert_eq!(r.len(), 2);
        assert!(r.iter().all(|m| *m == ScoredMatch::exact("Smith")));
    }

    #[test]
    fn exact_matches_keep_raw_spelling_and_order() {
        let refs = ["Braun", "BRAUN", "braun!", "Brown"];
        let r = matcher().find_matches("braun", &refs);
        let names: Vec<&str> = r.iter().take(3).map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Braun", "BRAUN", "braun!"]);
        assert!(r[..3].iter().all(ScoredMatch::is_exact));
    }

    #[test]
    fn exact_matches_survive_max_threshold() {
        let r = matcher().find_matches_with_threshold("Schmidt", ORIGINS, 1.0);
        assert_eq!(r, vec![ScoredMatch::exact("Schmidt")]);
    }

    #[test]
    fn empty_reference_entries_are_skipped() {
        let refs = ["", "---", "42", "Braun"];
        let r = matcher().find_matches_with_threshold("Brown", &refs, 0.0);
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].name, "Braun");
    }

    #[test]
    fn results_capped_at_max() {
        let refs: Vec<String> = (0..50).map(|_| "Smith".to_string()).collect();
        assert_eq!(matcher().find_matches("Smith", &refs).len(), 10);
        let refs: Vec<String> = (0..50).map(|i| format!("Smit{}", "h".repeat(i % 3))).collect();
        assert!(matcher().find_matches("Smyth", &refs).len() <= 10);
    }

    #[test]
    fn unvalidated_config_still_capped() {
        let m = NameMatcher::new(MatchConfig {
            max_results: 50,
            ..Default::default()
        });
        let refs: Vec<String> = (0..50).map(|_| "Smith".to_string()).collect();
        assert_eq!(m.find_matches("Smith", &refs).len(), MAX_RESULTS_CAP);
        let refs: Vec<String> = (0..50).map(|_| "Smyth".to_string()).collect();
        assert_eq!(m.find_matches("Smith", &refs).len(), MAX_RESULTS_CAP);
    }

    #[test]
    fn unequal_lengths_earn_levenshtein_label() {
        // smith/smit: 8 of 9 characters survive insert/delete alignment
        let r = matcher().find_matches_with_threshold("Smith", &["Smit"], 0.0);
        assert_eq!(r.len(), 1);
        assert!(r[0].method.ends_with("Levenshtein"), "{}", r[0].method);
        assert_eq!(r[0].score, 0.99);
    }

    #[test]
    fn fuzzy_scores_descend() {
        let r = matcher().find_matches("Fisher", ORIGINS);
        for w in r.windows(2) {
            assert!(w[0].score >= w[1].score);
        }
    }

    #[test]
    fn fuzzy_ties_keep_reference_order() {
        // All three cap at 0.99 against "Smith".
        let refs = ["Smyth", "Smit", "Smyth"];
        let r = matcher().find_matches("Smith", &refs);
        assert!(r.iter().all(|m| m.score == 0.99));
        let names: Vec<&str> = r.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, refs.to_vec());
    }

    #[test]
    fn scores_within_bounds() {
        for input in ["Miller", "Brown", "Fisher", "Cooper", "Smith", "Schneider", "Kruger"] {
            for m in matcher().find_matches_with_threshold(input, ORIGINS, 0.0) {
                if m.is_exact() {
                    assert_eq!(m.score, 1.0);
                } else {
                    assert!((0.0..=0.99).contains(&m.score), "{} -> {:?}", input, m);
                }
            }
        }
    }

    #[test]
    fn threshold_is_monotonic() {
        let m = matcher();
        for input in ["Miller", "Fisher", "Smith", "Krueger", "Shneider"] {
            let mut prev = m.find_matches_with_threshold(input, ORIGINS, 0.0);
            for step in 1..=10 {
                let t = step as f64 / 10.0;
                let next = m.find_matches_with_threshold(input, ORIGINS, t);
                assert!(next.len() <= prev.len());
                for kept in prev.iter().filter(|x| x.score >= t) {
                    assert!(next.contains(kept), "{:?} dropped at {}", kept, t);
                }
                prev = next;
            }
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let m = matcher();
        let a = m.find_matches("Fisher", ORIGINS);
        let b = m.find_matches("Fisher", ORIGINS);
        m.clear_caches();
        let c = m.find_matches("Fisher", ORIGINS);
        assert_eq!(a, b);
        assert_eq!(a, c);
        for (x, y) in a.iter().zip(c.iter()) {
            assert_eq!(x.score.to_bits(), y.score.to_bits());
        }
    }

    #[test]
    fn batching_and_parallelism_do_not_change_results() {
        let refs: Vec<String> = ORIGINS.iter().cycle().take(300).map(|s| s.to_string()).collect();
        let base = matcher().find_matches("Miller", &refs);
        for (batch_size, parallel) in [(1, false), (7, false), (7, true), (64, true), (1000, true)] {
            let m = NameMatcher::new(MatchConfig {
                batch_size,
                parallel,
                ..Default::default()
            });
            assert_eq!(m.find_matches("Miller", &refs), base, "batch={} par={}", batch_size, parallel);
        }
    }

    #[test]
    fn punctuation_and_case_only_feed_normalization() {
        // Edit distance runs on normalized names, so raw decoration does not move the score.
        let m = matcher();
        let decorated = m.find_matches("  o'BRIEN ", &["O'Brian"]);
        let plain = m.find_matches("obrien", &["obrian"]);
        assert_eq!(decorated.len(), 1);
        assert_eq!(plain.len(), 1);
        assert_eq!(decorated[0].score, plain[0].score);
        assert_eq!(decorated[0].method, plain[0].method);
        assert_eq!(decorated[0].name, "O'Brian");
    }

    #[test]
    fn diacritics_fold_to_exact_match() {
        let r = matcher().find_matches("Muller", &["Müller", "Mueller"]);
        assert_eq!(r[0], ScoredMatch::exact("Müller"));
        assert_eq!(r[1].name, "Mueller");
    }

    #[test]
    fn null_reference_entries_do_not_abort() {
        let set = crate::models::ReferenceSet::from_optional(vec![
            None,
            Some("Braun".into()),
            None,
        ]);
        let r = matcher().find_matches("Brown", set.names());
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn progress_reports_every_batch() {
        let refs: Vec<&str> = ORIGINS.to_vec();
        let m = NameMatcher::new(MatchConfig {
            batch_size: 10,
            ..Default::default()
        });
        let updates: Arc<Mutex<Vec<ProgressUpdate>>> = Arc::new(Mutex::new(vec![]));
        let u2 = updates.clone();
        m.find_matches_with_progress("Miller", &refs, |u| {
            u2.lock().unwrap().push(u);
        });
        let v = updates.lock().unwrap();
        // 32 refs in batches of 10 -> 4 batch updates plus the final one
        assert_eq!(v.len(), 5);
        let last = v.last().unwrap();
        assert_eq!(last.stage, "complete");
        assert_eq!(last.processed, refs.len());
        assert_eq!(last.percent, 100.0);
    }

    #[test]
    fn caches_fill_and_clear() {
        let m = matcher();
        m.find_matches("Miller", ORIGINS);
        assert!(m.normalizer().cached_len() > 0);
        assert!(m.encoder().cached_len() > 0);
        m.clear_caches();
        assert_eq!(m.normalizer().cached_len(), 0);
        assert_eq!(m.encoder().cached_len(), 0);
    }

    #[test]
    fn global_matcher_uses_defaults() {
        assert_eq!(NameMatcher::global().config(), &MatchConfig::default());
        let r = find_matches("Schmidt", ORIGINS, DEFAULT_THRESHOLD);
        assert_eq!(r[0], ScoredMatch::exact("Schmidt"));
    }
}
