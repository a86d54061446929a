//! Textual envelope every tool returns.

use crate::error::ToolResult;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt::Display;
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: Vec<TextContent>,
    #[serde(rename = "isError", default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { content_type: "text".to_string(), text: text.into() }
    }
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(text)],
            is_error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// All text blocks joined, mostly for assertions and logs
    pub fn joined_text(&self) -> String {
        self.content.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join("\n")
    }
}

/// `<message>` followed by the pretty-printed payload
pub fn success_response(message: impl Display, data: Option<&JsonValue>) -> ToolResponse {
    match data {
        Some(data) => {
            let pretty = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
            ToolResponse::text(format!("{message}\n\n{pretty}"))
        }
        None => ToolResponse::text(message.to_string()),
    }
}

pub fn error_response(context: &str, err: impl Display) -> ToolResponse {
    let mut response = ToolResponse::text(format!("{context}: {err}"));
    response.is_error = Some(true);
    response
}

/// Run a tool body and render any error as an `isError` response.
pub async fn with_error_handling<F>(context: &str, body: F) -> ToolResponse
where
    F: Future<Output = ToolResult<ToolResponse>>,
{
    match body.await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(context, error = %err, "tool call failed");
            error_response(context, err)
        }
    }
}
