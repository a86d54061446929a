//! Response shapes of the management API, reduced to the fields the tools read.

use crate::error::{ClientError, ClientResult};
use cms_mcp_core::{BulkAction, BulkActionStatus, Invocation, InvocationResult, InvocationStatus, Page};
use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Deserialize)]
struct Sys {
    id: String,
    #[serde(default)]
    version: Option<i64>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    sys: Sys,
    #[serde(default)]
    error: Option<JsonValue>,
    #[serde(default)]
    result: Option<JsonValue>,
}

fn envelope(body: &JsonValue) -> ClientResult<Envelope> {
    Ok(Envelope::deserialize(body)?)
}

/// `sys.version` of any entity payload
pub fn version(body: &JsonValue) -> ClientResult<i64> {
    let env = envelope(body)?;
    env.sys
        .version
        .ok_or_else(|| ClientError::UnexpectedResponse(format!("{} has no sys.version", env.sys.id)))
}

pub fn sys_id(body: &JsonValue) -> ClientResult<String> {
    Ok(envelope(body)?.sys.id)
}

/// Status strings are matched loosely: `inProgress`, `IN_PROGRESS` and `in_progress` are the same.
fn normalize(status: &str) -> String {
    status.chars().filter(|c| *c != '_' && *c != '-').collect::<String>().to_ascii_lowercase()
}

pub fn bulk_action(body: &JsonValue) -> ClientResult<BulkAction> {
    let env = envelope(body)?;
    let raw = env.sys.status.unwrap_or_default();
    let status = match normalize(&raw).as_str() {
        "created" => BulkActionStatus::Created,
        "inprogress" => BulkActionStatus::InProgress,
        "succeeded" => BulkActionStatus::Succeeded,
        "failed" => BulkActionStatus::Failed,
        _ => {
            return Err(ClientError::UnexpectedResponse(format!(
                "bulk action {} has unknown status '{}'",
                env.sys.id, raw
            )))
        }
    };
    let mut action = BulkAction::new(env.sys.id, status);
    if let Some(error) = env.error.filter(|e| !e.is_null()) {
        action = action.with_error(error);
    }
    Ok(action)
}

pub fn invocation(body: &JsonValue) -> ClientResult<Invocation> {
    let env = envelope(body)?;
    let raw = env.sys.status.unwrap_or_default();
    let status = match normalize(&raw).as_str() {
        "scheduled" | "inprogress" => InvocationStatus::InProgress,
        "completed" => InvocationStatus::Completed,
        "failed" => InvocationStatus::Failed,
        "cancelled" | "canceled" => InvocationStatus::Cancelled,
        _ => {
            return Err(ClientError::UnexpectedResponse(format!(
                "invocation {} has unknown status '{}'",
                env.sys.id, raw
            )))
        }
    };

    let result = env
        .result
        .as_ref()
        .and_then(|r| r.get("content"))
        .map(|content| match content {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        })
        .map(|content| InvocationResult { content });

    Ok(Invocation { id: env.sys.id, status, result })
}

pub fn page(body: JsonValue) -> ClientResult<Page> {
    Ok(serde_json::from_value(body)?)
}

/// Best-effort message from an error body
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("request failed with status {status}")
            } else {
                body.trim().to_string()
            }
        })
}
