//! Error types for the CLI

use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] cms_mcp_config::ConfigError),

    #[error("Server error: {0}")]
    Server(#[from] cms_mcp_server::ServerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("General error: {0}")]
    General(String),
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::General(err.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
