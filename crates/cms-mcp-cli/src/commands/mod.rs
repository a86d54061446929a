pub mod print_config;
pub mod serve;

use crate::cli::Cli;
use crate::error::CliResult;
use cms_mcp_config::{ConfigLoader, ServerConfig};

/// File values first, then flags and environment variables on top
pub fn load_config(cli: &Cli) -> CliResult<ServerConfig> {
    let mut config = ConfigLoader::default().load_or_default(cli.config.as_ref())?;
    config.apply_overrides(cli.overrides());
    Ok(config)
}
