//! CLI, configuration, CSV output
//!
//! This crate provides the `calflat` command-line interface.

pub mod cli;
pub mod config;
pub mod error;
pub mod writer;

pub use cli::Cli;
pub use config::AppConfig;
pub use error::{CliError, CliResult};
