//! CMS tools for MCP: bulk publish coordination, sequential archive, AI action
//! polling and workflow-gated migration tools.

pub mod ai_action;
pub mod args;
pub mod bulk;
pub mod context;
pub mod error;
pub mod handlers;
pub mod links;
pub mod registry;
pub mod response;
pub mod sequential;
pub mod workflow;

// Re-export commonly used types
pub use ai_action::{AiActionBatch, AiActionInvocationPoller, AiActionOutput, FOLLOW_UP_GUIDANCE};
pub use bulk::{BulkActionCoordinator, PollPolicy};
pub use context::{ScopeArgs, ToolContext};
pub use error::{ToolError, ToolResult};
pub use handlers::register_all;
pub use links::EntityLinkResolver;
pub use registry::{ToolHandle, ToolHandler, ToolRegistry, ToolSpec};
pub use response::{error_response, success_response, with_error_handling, TextContent, ToolResponse};
pub use sequential::{ItemAction, SequentialFailure, SequentialFallbackExecutor, SequentialOutcome};
pub use workflow::{WorkflowGateway, WorkflowPhase, WorkflowToolHandle, WorkflowTransition};

/// Registry with every tool registered against `ctx`.
pub fn build_registry(ctx: &ToolContext) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_all(&mut registry, ctx);
    registry
}
