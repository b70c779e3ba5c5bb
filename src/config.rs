use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_THRESHOLD: f64 = 0.3;
pub const DEFAULT_MAX_RESULTS: usize = 10;
/// Hard ceiling on results per search; `max_results` may only lower it.
pub const MAX_RESULTS_CAP: usize = 10;
pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const DEFAULT_MIN_DISPLAY_SCORE: f64 = 0.85;
pub const DEFAULT_DATASET_PATH: &str = "sample_data.csv";

/// Knobs for a single `find_matches` call.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct MatchConfig {
    /// Minimum fuzzy score kept by the engine, in 0.0..=1.0
    pub threshold: f64,
    pub max_results: usize,
    /// Reference entries per fuzzy-pass batch; does not affect results
    pub batch_size: usize,
    /// Score batches on the rayon pool
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: false,
        }
    }
}

impl MatchConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidValue {
                field: "matching.threshold",
                reason: format!("{} not in 0..=1", self.threshold),
            });
        }
        if self.max_results == 0 || self.max_results > MAX_RESULTS_CAP {
            return Err(ConfigError::InvalidValue {
                field: "matching.max_results",
                reason: format!("{} not in 1..={}", self.max_results, MAX_RESULTS_CAP),
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "matching.batch_size",
                reason: "must be > 0".into(),
            });
        }
        Ok(())
    }
}

/// Presentation-level filtering applied after the engine has ranked results.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct DisplayConfig {
    /// `None` shows every engine result
    pub min_display_score: Option<f64>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            min_display_score: Some(DEFAULT_MIN_DISPLAY_SCORE),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct DatasetConfig {
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATASET_PATH.into(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub matching: MatchConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.matching.validate()?;
        if let Some(min) = self.display.min_display_score {
            if !(0.0..=1.0).contains(&min) {
                return Err(ConfigError::InvalidValue {
                    field: "display.min_display_score",
                    reason: format!("{} not in 0..=1", min),
                });
            }
        }
        if self.dataset.path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "dataset.path",
            });
        }
        Ok(())
    }
}
