pub mod ai;
pub mod entity;
pub mod migration;

use crate::context::ToolContext;
use crate::registry::ToolRegistry;
use crate::sequential::ItemAction;
use crate::workflow::{WorkflowGateway, WorkflowToolHandle};
use cms_mcp_core::{BulkOperation, EntityKind};
use std::sync::Arc;

pub use ai::{GetAiActionInvocationTool, InvokeAiActionTool};
pub use entity::{ArchiveStateTool, BulkValidateTool, PublishStateTool};
pub use migration::{
    ExportSpaceTool, ImportSpaceTool, MigrationHandlerTool, ParamCollectionTool, SpaceExport,
    EXPORT_SPACE, IMPORT_SPACE, MIGRATION_HANDLER, PARAM_COLLECTION, WORKFLOW_INSTRUCTIONS,
};

/// Register every tool. Export and import start disabled until the migration workflow starts.
pub fn register_all(registry: &mut ToolRegistry, ctx: &ToolContext) -> Arc<WorkflowGateway> {
    for kind in [EntityKind::Entry, EntityKind::Asset] {
        for operation in [BulkOperation::Publish, BulkOperation::Unpublish] {
            registry.register(
                PublishStateTool::spec(kind, operation),
                Arc::new(PublishStateTool::new(ctx.clone(), kind, operation)),
                true,
            );
        }
        for action in [ItemAction::ARCHIVE, ItemAction::UNARCHIVE] {
            registry.register(
                ArchiveStateTool::spec(kind, action),
                Arc::new(ArchiveStateTool::new(ctx.clone(), kind, action)),
                true,
            );
        }
    }

    registry.register(BulkValidateTool::spec(), Arc::new(BulkValidateTool::new(ctx.clone())), true);
    registry.register(
        InvokeAiActionTool::spec(),
        Arc::new(InvokeAiActionTool::new(ctx.clone())),
        true,
    );
    registry.register(
        GetAiActionInvocationTool::spec(),
        Arc::new(GetAiActionInvocationTool::new(ctx.clone())),
        true,
    );

    let params = registry.register(
        ParamCollectionTool::spec(),
        Arc::new(ParamCollectionTool::new(ctx.clone())),
        true,
    );
    let export =
        registry.register(ExportSpaceTool::spec(), Arc::new(ExportSpaceTool::new(ctx.clone())), false);
    let import =
        registry.register(ImportSpaceTool::spec(), Arc::new(ImportSpaceTool::new(ctx.clone())), false);

    let handles: Vec<Arc<dyn WorkflowToolHandle>> =
        vec![Arc::new(params), Arc::new(export), Arc::new(import)];
    let gateway =
        Arc::new(WorkflowGateway::new("Space to space migration", handles, WORKFLOW_INSTRUCTIONS));
    registry.register(
        MigrationHandlerTool::spec(),
        Arc::new(MigrationHandlerTool::new(gateway.clone())),
        true,
    );
    gateway
}
