//! CLI arguments

use clap::Parser;
use std::path::PathBuf;

/// Singer tap for the Transifex REST API
#[derive(Parser, Debug)]
#[command(name = "tap-transifex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON); repeat to merge, later files win
    #[arg(short, long)]
    pub config: Vec<PathBuf>,

    /// Print the catalog instead of syncing
    #[arg(short, long)]
    pub discover: bool,

    /// Catalog file selecting streams to sync
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// State file (JSON)
    #[arg(short, long)]
    pub state: Option<PathBuf>,

    /// Print tap information and exit
    #[arg(long)]
    pub about: bool,

    /// Output format for `--about`
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Markdown output
    Markdown,
}
