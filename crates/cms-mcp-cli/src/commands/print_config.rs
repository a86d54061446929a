use crate::cli::OutputFormat;
use crate::error::CliResult;
use cms_mcp_config::ServerConfig;

/// Effective configuration with the access token masked
pub fn render(config: &ServerConfig, format: OutputFormat) -> CliResult<String> {
    let redacted = config.redacted();
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(&redacted)?,
        OutputFormat::Json => serde_json::to_string_pretty(&redacted)?,
    })
}
