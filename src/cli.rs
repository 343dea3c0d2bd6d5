use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "songrec",
    version,
    about = "Age-based and similarity-based song recommendation CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress logging and warnings; errors are still printed
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Track catalog CSV (overrides songrec.toml)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend popular songs for an age group
    Recommend(RecommendCommand),
    /// Recommend songs similar to a reference song
    Similar(SimilarCommand),
    /// Search songs by title or artist
    Search(SearchCommand),
    /// Show dataset info
    Info,
    /// List age groups and their preferences
    Profiles,
    /// Show effective settings and the config layer each came from
    Config,
}

#[derive(Args)]
pub struct RecommendCommand {
    #[arg(long, value_parser = clap::value_parser!(u32).range(10..=100))]
    pub age: u32,
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub count: Option<u32>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct SimilarCommand {
    #[arg(long, value_parser = clap::value_parser!(u32).range(10..=100))]
    pub age: u32,

    #[arg(long, required_unless_present = "song", conflicts_with = "song")]
    pub track_id: Option<String>,

    /// Pick the first song whose title or artist matches this query
    #[arg(long, required_unless_present = "track_id", conflicts_with = "track_id")]
    pub song: Option<String>,

    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub count: Option<u32>,
    #[arg(long)]
    pub pool_size: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct SearchCommand {
    pub query: String,
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
