//! AI action invocation types.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvocationStatus {
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl InvocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationStatus::InProgress => "inProgress",
            InvocationStatus::Completed => "completed",
            InvocationStatus::Failed => "failed",
            InvocationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InvocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub content: String,
}

/// One asynchronous execution of an AI action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub id: String,
    pub status: InvocationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<InvocationResult>,
}

impl Invocation {
    pub fn in_progress(id: impl Into<String>) -> Self {
        Self { id: id.into(), status: InvocationStatus::InProgress, result: None }
    }

    pub fn completed(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: InvocationStatus::Completed,
            result: Some(InvocationResult { content: content.into() }),
        }
    }

    pub fn with_status(id: impl Into<String>, status: InvocationStatus) -> Self {
        Self { id: id.into(), status, result: None }
    }

    /// Result content, empty when the invocation produced none.
    pub fn content(&self) -> &str {
        self.result.as_ref().map(|r| r.content.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    RichText,
    PlainText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiActionVariable {
    pub id: String,
    pub value: JsonValue,
}

/// Payload for one invocation of a configured AI action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiActionInvocationRequest {
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub variables: Vec<AiActionVariable>,
}
