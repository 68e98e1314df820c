//! CLI module
//!
//! Command-line interface for running the tap.
//!
//! # Commands
//!
//! - `spec` - Print the configuration schema
//! - `check` - Test connection to the API
//! - `discover` - Print the catalog of streams and schemas
//! - `streams` - List stream names (lightweight)
//! - `read` - Extract data from streams

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
