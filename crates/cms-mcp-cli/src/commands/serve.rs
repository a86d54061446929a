//! MCP server command

use anyhow::{Context, Result};
use cms_mcp_config::ServerConfig;
use tracing::info;

pub async fn execute(
    mut config: ServerConfig,
    allow_patterns: Vec<String>,
    deny_patterns: Vec<String>,
) -> Result<()> {
    config.tools.allow.extend(allow_patterns);
    config.tools.deny.extend(deny_patterns);
    config.validate().context("invalid configuration")?;

    info!(host = %config.cms.host, "Starting CMS MCP server");
    if !config.tools.allow.is_empty() || !config.tools.deny.is_empty() {
        info!(allow = ?config.tools.allow, deny = ?config.tools.deny, "tool filters active");
    }

    cms_mcp_server::serve_stdio(config).await.context("MCP server failed")?;
    Ok(())
}
