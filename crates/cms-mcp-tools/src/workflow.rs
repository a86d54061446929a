//! Turning a cohort of tools on and off as a workflow starts and ends.

use serde::Serialize;
use std::sync::Arc;

/// A registered tool whose visibility can be toggled. Both toggles are idempotent.
pub trait WorkflowToolHandle: Send + Sync {
    fn name(&self) -> &str;
    fn enable(&self);
    fn disable(&self);
    fn is_enabled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowPhase {
    Idle,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowTransition {
    pub phase: WorkflowPhase,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<&'static str>,
    pub tools: Vec<String>,
}

pub struct WorkflowGateway {
    name: String,
    handles: Vec<Arc<dyn WorkflowToolHandle>>,
    instructions: &'static str,
}

impl WorkflowGateway {
    pub fn new(
        name: impl Into<String>,
        handles: Vec<Arc<dyn WorkflowToolHandle>>,
        instructions: &'static str,
    ) -> Self {
        Self { name: name.into(), handles, instructions }
    }

    /// Active only while every gated tool is enabled.
    pub fn phase(&self) -> WorkflowPhase {
        if !self.handles.is_empty() && self.handles.iter().all(|h| h.is_enabled()) {
            WorkflowPhase::Active
        } else {
            WorkflowPhase::Idle
        }
    }

    pub fn set_enabled(&self, enabled: bool) -> WorkflowTransition {
        for handle in &self.handles {
            if enabled {
                handle.enable();
            } else {
                handle.disable();
            }
        }
        let tools = self.handles.iter().map(|h| h.name().to_string()).collect();

        if enabled {
            tracing::info!(workflow = %self.name, "workflow started");
            WorkflowTransition {
                phase: WorkflowPhase::Active,
                message: format!("{} workflow started", self.name),
                instructions: Some(self.instructions),
                tools,
            }
        } else {
            tracing::info!(workflow = %self.name, "workflow concluded");
            WorkflowTransition {
                phase: WorkflowPhase::Idle,
                message: format!("{} workflow concluded", self.name),
                instructions: None,
                tools,
            }
        }
    }
}
