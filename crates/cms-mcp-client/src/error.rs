use cms_mcp_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Non-success response from the API
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<ClientError> for CoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => CoreError::Transport(e.to_string()),
            ClientError::Serialization(e) => CoreError::Serde(e.to_string()),
            ClientError::Api { status, message } => CoreError::remote(Some(status), message),
            ClientError::InvalidConfig(msg) => CoreError::Invalid(msg),
            ClientError::UnexpectedResponse(msg) => CoreError::Other(msg),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
