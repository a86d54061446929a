//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use cms_mcp_config::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cms-mcp", about = "MCP server for content management tools", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (YAML or JSON)
    #[arg(long, global = true, env = "CMS_MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Management API access token
    #[arg(long, global = true, env = "CMS_MCP_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Default space for tool calls that do not name one
    #[arg(long, global = true, env = "CMS_MCP_SPACE_ID")]
    pub space_id: Option<String>,

    /// Default environment
    #[arg(long, global = true, env = "CMS_MCP_ENVIRONMENT_ID")]
    pub environment_id: Option<String>,

    /// Management API base URL
    #[arg(long, global = true, env = "CMS_MCP_HOST")]
    pub host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            access_token: self.access_token.clone(),
            space_id: self.space_id.clone(),
            environment_id: self.environment_id.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the MCP server on stdio
    Serve {
        /// Allow patterns for tool filtering, added to the configured ones
        #[arg(long = "allow")]
        allow_patterns: Vec<String>,
        /// Deny patterns for tool filtering, added to the configured ones
        #[arg(long = "deny")]
        deny_patterns: Vec<String>,
    },
    /// Print the effective configuration with secrets redacted
    PrintConfig {
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}
