//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Singer tap for the Teamtailor recruitment API
#[derive(Parser, Debug)]
#[command(name = "tap-teamtailor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON or YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline config JSON
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// State file (JSON)
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Inline state JSON
    #[arg(long, global = true)]
    pub state_json: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the configuration specification
    Spec,

    /// Test connection to the API
    Check,

    /// Discover available streams and their schemas
    Discover,

    /// List available stream names
    Streams,

    /// Read data from streams
    Read {
        /// Streams to sync (comma-separated, empty = all)
        #[arg(long)]
        streams: Option<String>,

        /// Maximum pages per stream
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

impl Commands {
    /// Split a comma-separated stream list, dropping blanks
    pub fn parse_stream_list(list: Option<&str>) -> Vec<String> {
        list.map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
    }
}
