use crate::error::{ToolError, ToolResult};
use crate::response::ToolResponse;
use crate::workflow::WorkflowToolHandle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Protocol-agnostic tool description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub annotations: Option<JsonValue>,
    pub input_schema: JsonValue,
}

impl ToolSpec {
    pub fn new(name: &str, title: &str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            annotations: None,
            input_schema,
        }
    }

    pub fn with_annotations(mut self, annotations: JsonValue) -> Self {
        self.annotations = Some(annotations);
        self
    }
}

/// Executes one tool.
///
/// Argument errors are returned as `Err`; everything that goes wrong while
/// talking to the CMS is already rendered into an `isError` response.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: JsonValue) -> ToolResult<ToolResponse>;
}

/// Enable flag of one registered tool.
#[derive(Clone)]
pub struct ToolHandle {
    name: String,
    enabled: Arc<AtomicBool>,
    revision: Arc<AtomicU64>,
}

impl ToolHandle {
    fn set(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::SeqCst) != enabled {
            self.revision.fetch_add(1, Ordering::SeqCst);
            tracing::info!(tool = %self.name, enabled, "tool visibility changed");
        }
    }
}

impl std::fmt::Debug for ToolHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolHandle")
            .field("name", &self.name)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl WorkflowToolHandle for ToolHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn enable(&self) {
        self.set(true);
    }

    fn disable(&self) {
        self.set(false);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

struct RegisteredTool {
    spec: ToolSpec,
    handler: Arc<dyn ToolHandler>,
    handle: ToolHandle,
}

/// Ordered set of tools. Only enabled tools are listed or callable.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    revision: Arc<AtomicU64>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool; a later registration with the same name replaces the earlier one.
    pub fn register(
        &mut self,
        spec: ToolSpec,
        handler: Arc<dyn ToolHandler>,
        enabled: bool,
    ) -> ToolHandle {
        let handle = ToolHandle {
            name: spec.name.clone(),
            enabled: Arc::new(AtomicBool::new(enabled)),
            revision: self.revision.clone(),
        };
        self.tools.retain(|t| t.spec.name != spec.name);
        tracing::debug!(tool = %spec.name, enabled, "tool registered");
        self.tools.push(RegisteredTool { spec, handler, handle: handle.clone() });
        handle
    }

    pub fn list(&self) -> Vec<&ToolSpec> {
        self.tools.iter().filter(|t| t.handle.is_enabled()).map(|t| &t.spec).collect()
    }

    /// Every registered tool name, enabled or not
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.spec.name.as_str()).collect()
    }

    pub fn handle(&self, name: &str) -> Option<ToolHandle> {
        self.tools.iter().find(|t| t.spec.name == name).map(|t| t.handle.clone())
    }

    /// Bumped whenever a tool's visibility actually changes
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub async fn call(&self, name: &str, args: JsonValue) -> ToolResult<ToolResponse> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.spec.name == name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;
        if !tool.handle.is_enabled() {
            return Err(ToolError::ToolDisabled(name.to_string()));
        }
        tracing::info!(tool = name, "tool call");
        tool.handler.call(args).await
    }
}
