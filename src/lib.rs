pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod logging;
pub mod matching;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod util;

pub use matching::{NameMatcher, find_matches};
pub use models::{ReferenceSet, ScoredMatch};
pub use normalize::normalize_name;
