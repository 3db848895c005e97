use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "drift",
    about = "Drift — structural diff for JSON-like documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two JSON documents
    Compare(CompareArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// Path of the old document
    pub old: String,
    /// Path of the new document
    pub new: String,
    /// Stop descending once paths reach this many segments
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Object keys to skip, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub ignore_keys: Vec<String>,
    /// Array comparison strategy
    #[arg(long, default_value = "lcs")]
    pub array_diff: ArrayDiffArg,
    /// Follow reference cycles instead of reporting them
    #[arg(long)]
    pub no_cycle_detection: bool,
    /// Print only the summary counts
    #[arg(long)]
    pub stats_only: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum ArrayDiffArg {
    Lcs,
    Positional,
}
