use crate::sequential::SequentialFailure;
use cms_mcp_core::{BulkActionStatus, CoreError, EntityKind};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Result type for tool operations
pub type ToolResult<T> = Result<T, ToolError>;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to resolve {kind} {id}: {source}")]
    Resolve {
        kind: EntityKind,
        id: String,
        #[source]
        source: CoreError,
    },

    #[error(transparent)]
    Sequential(#[from] SequentialFailure),

    #[error("Bulk action {action_id} failed with status {status}{}", details_suffix(.details))]
    BulkFailed { action_id: String, status: BulkActionStatus, details: Option<JsonValue> },

    #[error(
        "Bulk action {action_id} did not complete after {attempts} attempts (last status: {status})"
    )]
    BulkTimeout { action_id: String, attempts: u32, status: BulkActionStatus },

    #[error("Polling timeout: {completed}/{total} actions completed after {attempts} attempts")]
    PollingTimeout { completed: usize, total: usize, attempts: u32 },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool is disabled: {0}")]
    ToolDisabled(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn details_suffix(details: &Option<JsonValue>) -> String {
    match details {
        Some(details) => format!(": {details}"),
        None => String::new(),
    }
}

impl ToolError {
    /// Errors the caller fixes by changing the request rather than retrying it
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            ToolError::InvalidArguments(_) | ToolError::ToolNotFound(_) | ToolError::ToolDisabled(_)
        )
    }
}
