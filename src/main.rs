use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use surname_matcher::cli::{Cli, Command, INVALID_INPUT_MSG, NO_MATCHES_MSG, render_table};
use surname_matcher::config::AppConfig;
use surname_matcher::dataset::ReferenceDataset;
use surname_matcher::error::DatasetError;
use surname_matcher::export::csv_export::{apply_display_threshold, export_matches_csv_path};
use surname_matcher::logging::{init_tracing_from_env, tracing_requested};
use surname_matcher::matching::NameMatcher;
use surname_matcher::util::envfile::{load_dotenv_if_present, write_env_template};

fn main() -> ExitCode {
    // Must run before the clap parse so .env values feed the env-backed flags.
    let dotenv = load_dotenv_if_present();

    if tracing_requested() {
        init_tracing_from_env();
    } else {
        env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    }
    if let Err(e) = dotenv {
        warn!("failed to read .env: {:#}", e);
    }

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let cfg = cli.to_app_config().context("invalid configuration")?;

    if let Command::EnvTemplate { path } = &cli.command {
        write_env_template(path)
            .with_context(|| format!("writing env template to {}", path.display()))?;
        println!("Wrote {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let mut dataset = ReferenceDataset::load(&cfg.dataset.path)
        .with_context(|| format!("loading dataset {}", cfg.dataset.path))?;

    match cli.command {
        Command::Search(args) => search(&cfg, &dataset, &args.name, args.out.as_deref()),
        Command::Add { name } => {
            dataset.add_name(&name)?;
            dataset.save()?;
            println!(
                "Added '{}' to database. Total database size: {} names.",
                name.trim(),
                dataset.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Merge { file } => {
            let added = dataset
                .merge_from_path(&file)
                .with_context(|| format!("{} is not a usable names CSV", file.display()))?;
            dataset.save()?;
            println!(
                "Added {} new names. Total database size: {} names.",
                added,
                dataset.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Clear { yes } => match dataset.clear(yes) {
            Ok(removed) => {
                dataset.save()?;
                println!("Database cleared: {} names removed.", removed);
                Ok(ExitCode::SUCCESS)
            }
            Err(DatasetError::ConfirmationRequired) => {
                eprintln!("This action cannot be undone. Re-run with --yes to confirm.");
                Ok(ExitCode::from(1))
            }
            Err(e) => Err(e.into()),
        },
        Command::Count => {
            println!("Current database size: {} names", dataset.len());
            Ok(ExitCode::SUCCESS)
        }
        Command::EnvTemplate { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn search(
    cfg: &AppConfig,
    dataset: &ReferenceDataset,
    name: &str,
    out: Option<&std::path::Path>,
) -> Result<ExitCode> {
    let matcher = NameMatcher::new(cfg.matching);
    if matcher.normalize(name).is_empty() {
        eprintln!("{}", INVALID_INPUT_MSG);
        return Ok(ExitCode::from(2));
    }

    let matches = matcher.find_matches(name, dataset.names().names());
    let found = matches.len();
    let shown = apply_display_threshold(matches, cfg.display.min_display_score);
    info!(
        "search {:?}: {} candidates, {} shown (dataset size {})",
        name,
        found,
        shown.len(),
        dataset.len()
    );

    if shown.is_empty() {
        println!("{}", NO_MATCHES_MSG);
    } else {
        print!("{}", render_table(&shown));
    }
    if let Some(path) = out {
        export_matches_csv_path(&shown, path)
            .with_context(|| format!("writing results to {}", path.display()))?;
    }
    Ok(ExitCode::SUCCESS)
}
