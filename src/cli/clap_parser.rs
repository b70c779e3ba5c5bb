use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{
    AppConfig, DEFAULT_BATCH_SIZE, DEFAULT_DATASET_PATH, DEFAULT_MAX_RESULTS,
    DEFAULT_MIN_DISPLAY_SCORE, DEFAULT_THRESHOLD, DatasetConfig, DisplayConfig, MatchConfig,
};
use crate::error::ConfigError;

#[derive(Parser, Debug)]
#[command(
    name = "surname_matcher",
    version,
    about = "Find likely origin spellings of Americanized family names",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Reference dataset CSV (env: NAME_MATCHER_DATASET)
    #[arg(
        long,
        value_name = "PATH",
        env = "NAME_MATCHER_DATASET",
        default_value = DEFAULT_DATASET_PATH,
        global = true
    )]
    pub dataset: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank reference names against an Americanized family name
    Search(SearchArgs),
    /// Append a single family name to the dataset
    Add {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Append all names from a CSV file (`family_name` column, or a single column)
    Merge {
        #[arg(value_name = "CSV")]
        file: PathBuf,
    },
    /// Remove every name from the dataset
    Clear {
        /// Confirm the deletion; it cannot be undone
        #[arg(long)]
        yes: bool,
    },
    /// Print the number of names in the dataset
    Count,
    /// Write a .env template
    EnvTemplate {
        #[arg(value_name = "PATH", default_value = ".env.template")]
        path: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Americanized family name
    #[arg(value_name = "NAME")]
    pub name: String,
    /// Minimum engine score for fuzzy matches (env: NAME_MATCHER_THRESHOLD)
    #[arg(long, env = "NAME_MATCHER_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,
    /// Maximum number of results, at most 10 (env: NAME_MATCHER_MAX_RESULTS)
    #[arg(long, env = "NAME_MATCHER_MAX_RESULTS", default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,
    /// Reference entries per fuzzy batch (env: NAME_MATCHER_BATCH_SIZE)
    #[arg(long, env = "NAME_MATCHER_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
    /// Score batches in parallel (env: NAME_MATCHER_PARALLEL)
    #[arg(long, env = "NAME_MATCHER_PARALLEL")]
    pub parallel: bool,
    /// Hide results scoring below this value (env: NAME_MATCHER_MIN_DISPLAY)
    #[arg(
        long,
        env = "NAME_MATCHER_MIN_DISPLAY",
        default_value_t = DEFAULT_MIN_DISPLAY_SCORE
    )]
    pub min_display: f64,
    /// Show every engine result regardless of --min-display
    #[arg(long)]
    pub show_all: bool,
    /// Also write the results to this CSV file
    #[arg(long, value_name = "CSV")]
    pub out: Option<PathBuf>,
}

impl Cli {
    pub fn to_app_config(&self) -> Result<AppConfig, ConfigError> {
        let (matching, display) = match &self.command {
            Command::Search(args) => (
                MatchConfig {
                    threshold: args.threshold,
                    max_results: args.max_results,
                    batch_size: args.batch_size,
                    parallel: args.parallel,
                },
                DisplayConfig {
                    min_display_score: (!args.show_all).then_some(args.min_display),
                },
            ),
            _ => (MatchConfig::default(), DisplayConfig::default()),
        };
        let cfg = AppConfig {
            matching,
            display,
            dataset: DatasetConfig {
                path: self.dataset.clone(),
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }
}
