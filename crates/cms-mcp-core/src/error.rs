use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid: {0}")]
    Invalid(String),
    /// The CMS rejected a call. The message is passed through verbatim.
    #[error("{message}")]
    Remote { status: Option<u16>, message: String },
    #[error("transport: {0}")]
    Transport(String),
    #[error("serde: {0}")]
    Serde(String),
    #[error("io: {0}")]
    Io(String),
    #[error("other: {0}")]
    Other(String),
}

impl CoreError {
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        CoreError::Remote { status, message: message.into() }
    }

    /// HTTP status carried by a remote rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Remote { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Io(err.to_string())
    }
}
