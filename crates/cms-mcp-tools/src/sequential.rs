//! Per-item execution for mutations that have no bulk endpoint.

use crate::error::ToolResult;
use cms_mcp_core::{CoreResult, EntityKind};
use serde_json::Value as JsonValue;
use std::fmt;
use std::future::Future;

/// Verb forms used in progress and failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAction {
    pub verb: &'static str,
    pub gerund: &'static str,
    pub past: &'static str,
}

impl ItemAction {
    pub const ARCHIVE: ItemAction = ItemAction { verb: "archive", gerund: "archiving", past: "archived" };
    pub const UNARCHIVE: ItemAction =
        ItemAction { verb: "unarchive", gerund: "unarchiving", past: "unarchived" };
}

/// Outcome of a run that stopped at its first failing item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialFailure {
    pub action: ItemAction,
    pub kind: EntityKind,
    pub failed_id: String,
    pub succeeded: Vec<String>,
    pub message: String,
}

impl fmt::Display for SequentialFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to {} {} {}", self.action.verb, self.kind, self.failed_id)?;
        if !self.succeeded.is_empty() {
            write!(
                f,
                " after successfully {} {} {} ({})",
                self.action.gerund,
                self.succeeded.len(),
                self.kind.noun(self.succeeded.len()),
                self.succeeded.join(", ")
            )?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for SequentialFailure {}

#[derive(Debug, Clone, PartialEq)]
pub enum SequentialOutcome {
    /// Exactly one id was given; carries that call's result
    Single { id: String, value: JsonValue },
    /// Zero or several ids, all succeeded
    Batch { succeeded: Vec<String> },
}

pub struct SequentialFallbackExecutor {
    kind: EntityKind,
    action: ItemAction,
}

impl SequentialFallbackExecutor {
    pub fn new(kind: EntityKind, action: ItemAction) -> Self {
        Self { kind, action }
    }

    /// Apply `op` to each id strictly in order, stopping at the first failure.
    pub async fn run<F, Fut>(&self, ids: &[String], mut op: F) -> ToolResult<SequentialOutcome>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = CoreResult<JsonValue>>,
    {
        if let [id] = ids {
            return match op(id.clone()).await {
                Ok(value) => Ok(SequentialOutcome::Single { id: id.clone(), value }),
                Err(err) => Err(self.failure(id, Vec::new(), err.to_string()).into()),
            };
        }

        let mut succeeded = Vec::with_capacity(ids.len());
        for id in ids {
            match op(id.clone()).await {
                Ok(_) => {
                    tracing::debug!(kind = self.kind.label(), id = %id, action = self.action.verb, "item done");
                    succeeded.push(id.clone());
                }
                Err(err) => {
                    return Err(self.failure(id, succeeded, err.to_string()).into());
                }
            }
        }
        Ok(SequentialOutcome::Batch { succeeded })
    }

    fn failure(&self, id: &str, succeeded: Vec<String>, message: String) -> SequentialFailure {
        SequentialFailure {
            action: self.action,
            kind: self.kind,
            failed_id: id.to_string(),
            succeeded,
            message,
        }
    }
}
