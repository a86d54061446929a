//! Error handling for the MCP server

use cms_mcp_tools::ToolError;
use thiserror::Error;

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Client error: {0}")]
    Client(#[from] cms_mcp_client::ClientError),

    #[error("Config error: {0}")]
    Config(#[from] cms_mcp_config::ConfigError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Convert to an MCP error object
    pub fn to_error_data(&self) -> rmcp::ErrorData {
        match self {
            ServerError::Tool(err) if err.is_protocol_error() => {
                rmcp::ErrorData::invalid_params(err.to_string(), None)
            }
            ServerError::PermissionDenied(_) => {
                rmcp::ErrorData::invalid_request(self.to_string(), None)
            }
            _ => rmcp::ErrorData::internal_error(self.to_string(), None),
        }
    }
}
