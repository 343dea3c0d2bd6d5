mod catalog;
mod cli;
mod config;
mod error;
mod profile;
mod recommend;
mod report;
mod types;

use crate::catalog::TrackSelector;
use crate::error::SongrecError;
use crate::types::config::SongrecConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("songrec={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn warn_user(quiet: bool, message: impl std::fmt::Display) {
    if !quiet {
        eprintln!("warning: {message}");
    }
}

fn catalog_path(flag: Option<PathBuf>, config: &SongrecConfig) -> PathBuf {
    flag.unwrap_or_else(|| PathBuf::from(config.catalog_path()))
}

fn run() -> Result<i32, SongrecError> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(&cwd)?;
    if loaded.is_none() {
        tracing::debug!(dir = %cwd.display(), "no songrec.toml found, using defaults");
    }
    let (cfg, origins) = match loaded {
        Some(loaded) => (loaded.config, loaded.origins),
        None => (SongrecConfig::default(), config::Origins::new()),
    };
    let quiet = cli.quiet;

    match cli.command {
        cli::Commands::Recommend(cmd) => {
            let catalog = catalog::load(&catalog_path(cli.catalog, &cfg))?;
            let count = cmd.count.unwrap_or_else(|| cfg.count()) as usize;
            let report = recommend::recommend(&catalog, cmd.age, count);
            println!("{}", report::render(&report, output_format(&cmd.format))?);

            if report.cascade.is_fallback() {
                warn_user(
                    quiet,
                    format!(
                        "no songs matched every {} preference; used {}",
                        report.group,
                        report.cascade.label()
                    ),
                );
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Similar(cmd) => {
            let catalog = catalog::load(&catalog_path(cli.catalog, &cfg))?;
            let selector = match (cmd.track_id, cmd.song) {
                (Some(id), _) => TrackSelector::Id(id),
                (None, Some(query)) => TrackSelector::Query(query),
                (None, None) => {
                    return Err(SongrecError::InvalidArgument(
                        "either --track-id or --song is required".to_string(),
                    ))
                }
            };
            let reference = catalog.select(&selector)?;

            let mut settings = cfg.similarity_settings();
            if let Some(pool_size) = cmd.pool_size {
                if pool_size == 0 {
                    return Err(SongrecError::InvalidArgument(
                        "--pool-size must be greater than 0".to_string(),
                    ));
                }
                settings.pool_size = pool_size;
            }
            if let Some(seed) = cmd.seed {
                settings.seed = seed;
            }
            let count = cmd.count.unwrap_or_else(|| cfg.count()) as usize;

            let report =
                recommend::similar::similar(&catalog, reference, cmd.age, count, &settings);
            println!("{}", report::render(&report, output_format(&cmd.format))?);

            if report.cascade.is_fallback() {
                warn_user(
                    quiet,
                    format!(
                        "candidate pool for {} used {}",
                        report.group,
                        report.cascade.label()
                    ),
                );
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Search(cmd) => {
            let catalog = catalog::load(&catalog_path(cli.catalog, &cfg))?;
            let hits = catalog.search(&cmd.query, cmd.limit);
            print!("{}", report::md::search_markdown(&cmd.query, &hits));
            if hits.is_empty() {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Info => {
            let catalog = catalog::load(&catalog_path(cli.catalog, &cfg))?;
            print!("{}", report::md::info_markdown(&catalog.stats()));
            if catalog.skipped() > 0 {
                warn_user(quiet, format!("skipped {} malformed rows", catalog.skipped()));
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Config => {
            print!("{}", report::md::config_markdown(&cfg, &origins));
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Profiles => {
            print!("{}", report::md::profiles_markdown());
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
