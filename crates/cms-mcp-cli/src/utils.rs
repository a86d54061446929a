//! Utility functions for the CLI

use crate::error::{CliError, CliResult};
use colored::{ColoredString, Colorize};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize tracing on stderr; stdout carries the MCP stdio transport
pub fn init_tracing(verbose: bool) -> CliResult<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::General(format!("Failed to set tracing subscriber: {}", e)))?;

    Ok(())
}

/// Utility for colored console output
pub struct ColoredOutput;

impl ColoredOutput {
    pub fn error(msg: &str) -> ColoredString {
        msg.red().bold()
    }

    pub fn warning(msg: &str) -> ColoredString {
        msg.yellow().bold()
    }
}
