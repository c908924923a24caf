//! CLI module
//!
//! Command-line interface for running the source.
//!
//! # Commands
//!
//! - `spec` - Print the connection specification
//! - `check` - Test connection to the API
//! - `streams` - List stream names and primary keys
//! - `read` - Extract data from streams

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
