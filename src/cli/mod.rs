//! CLI module
//!
//! Singer command-line interface.
//!
//! # Modes
//!
//! - `--about` - Describe the tap and its settings
//! - `--discover` - Print the catalog
//! - default - Sync selected streams, printing SCHEMA/RECORD/STATE messages

mod commands;
mod runner;

pub use commands::{Cli, OutputFormat};
pub use runner::Runner;
