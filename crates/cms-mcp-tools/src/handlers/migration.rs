//! Space to space migration: parameter collection, export, import and the workflow switch.

use crate::args::{object_schema, parse};
use crate::bulk::BulkActionCoordinator;
use crate::context::{ScopeArgs, ToolContext};
use crate::error::{ToolError, ToolResult};
use crate::links::EntityLinkResolver;
use crate::registry::{ToolHandler, ToolSpec};
use crate::response::{
    error_response, success_response, with_error_handling, TextContent, ToolResponse,
};
use crate::workflow::WorkflowGateway;
use async_trait::async_trait;
use cms_mcp_core::{
    BulkOperation, ContentCollection, EntitiesCollection, EntityKind, LinkMode, SpaceContent,
    SpaceScope, MAX_BULK_ENTITIES,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::path::PathBuf;
use std::sync::Arc;

pub const PARAM_COLLECTION: &str = "space_to_space_param_collection";
pub const MIGRATION_HANDLER: &str = "space_to_space_migration_handler";
pub const EXPORT_SPACE: &str = "export_space";
pub const IMPORT_SPACE: &str = "import_space";

const PAGE_LIMIT: u64 = 100;

pub const WORKFLOW_INSTRUCTIONS: &str = "You are running a space to space migration. \
Follow these steps in order:
1. Call space_to_space_param_collection until it reports no missing parameters. Confirm the \
source and target spaces with the user before continuing.
2. Call export_space with the source space. It writes an export file and returns its path.
3. Call import_space with the target space and the contentFile returned by the export. Set \
publish to true only if the user asked for published content in the target.
4. Report the counts returned by the import, then call space_to_space_migration_handler with \
enableWorkflow set to false to conclude the workflow.
Never import into the source space.";

/// Everything an export contains, written as one JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceExport {
    #[serde(default)]
    pub space_id: String,
    #[serde(default)]
    pub environment_id: String,
    #[serde(default)]
    pub exported_at: String,
    #[serde(default)]
    pub content_types: Vec<JsonValue>,
    #[serde(default)]
    pub locales: Vec<JsonValue>,
    #[serde(default)]
    pub assets: Vec<JsonValue>,
    #[serde(default)]
    pub entries: Vec<JsonValue>,
}

impl SpaceExport {
    fn collection_mut(&mut self, collection: ContentCollection) -> &mut Vec<JsonValue> {
        match collection {
            ContentCollection::ContentTypes => &mut self.content_types,
            ContentCollection::Locales => &mut self.locales,
            ContentCollection::Assets => &mut self.assets,
            ContentCollection::Entries => &mut self.entries,
        }
    }

    pub fn counts(&self) -> JsonValue {
        json!({
            "contentTypes": self.content_types.len(),
            "locales": self.locales.len(),
            "assets": self.assets.len(),
            "entries": self.entries.len(),
        })
    }
}

fn item_id(item: &JsonValue) -> ToolResult<String> {
    item.pointer("/sys/id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| ToolError::InvalidArguments("export item without sys.id".to_string()))
}

/// Item body as the write endpoints accept it
fn writable_body(item: &JsonValue) -> JsonValue {
    match item {
        JsonValue::Object(map) => JsonValue::Object(
            map.iter()
                .filter(|(key, _)| key.as_str() != "sys")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

async fn fetch_all<C: SpaceContent + ?Sized>(
    client: &C,
    scope: &SpaceScope,
    collection: ContentCollection,
) -> ToolResult<Vec<JsonValue>> {
    let mut items = Vec::new();
    let mut skip = 0;
    loop {
        let page = client.list_page(scope, collection, skip, PAGE_LIMIT).await?;
        let more = page.has_more();
        skip += page.items.len() as u64;
        items.extend(page.items);
        if !more {
            break;
        }
    }
    tracing::debug!(%scope, collection = %collection, count = items.len(), "collection exported");
    Ok(items)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MigrationParams {
    source_space_id: Option<String>,
    source_environment_id: Option<String>,
    target_space_id: Option<String>,
    target_environment_id: Option<String>,
    #[serde(default)]
    publish: Option<bool>,
}

/// Always-on checklist of what the migration needs.
pub struct ParamCollectionTool {
    ctx: ToolContext,
}

impl ParamCollectionTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            PARAM_COLLECTION,
            "Collect migration parameters",
            "Collect and check the parameters for migrating content from one space to another. \
             Call it with what the user has provided so far; it reports what is still missing.",
            json!({
                "type": "object",
                "properties": {
                    "sourceSpaceId": {"type": "string"},
                    "sourceEnvironmentId": {"type": "string"},
                    "targetSpaceId": {"type": "string"},
                    "targetEnvironmentId": {"type": "string"},
                    "publish": {"type": "boolean", "description": "Publish imported content"}
                }
            }),
        )
        .with_annotations(json!({"readOnlyHint": true, "openWorldHint": false}))
    }
}

#[async_trait]
impl ToolHandler for ParamCollectionTool {
    async fn call(&self, args: JsonValue) -> ToolResult<ToolResponse> {
        let params: MigrationParams = parse(args)?;
        let default_env = &self.ctx.default_environment_id;
        let source_env = params.source_environment_id.unwrap_or_else(|| default_env.clone());
        let target_env = params.target_environment_id.unwrap_or_else(|| default_env.clone());

        let mut missing = Vec::new();
        if params.source_space_id.is_none() {
            missing.push("sourceSpaceId");
        }
        if params.target_space_id.is_none() {
            missing.push("targetSpaceId");
        }
        if params.source_space_id.is_some()
            && params.source_space_id == params.target_space_id
            && source_env == target_env
        {
            return Ok(error_response(
                "Error collecting migration parameters",
                "source and target must be different spaces or environments",
            ));
        }

        let message = if missing.is_empty() {
            "All migration parameters collected. Start the workflow with space_to_space_migration_handler."
        } else {
            "Some migration parameters are still missing. Ask the user for them."
        };
        Ok(success_response(
            message,
            Some(&json!({
                "source": {"spaceId": params.source_space_id, "environmentId": source_env},
                "target": {"spaceId": params.target_space_id, "environmentId": target_env},
                "publish": params.publish.unwrap_or(false),
                "missing": missing,
            })),
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HandlerArgs {
    enable_workflow: bool,
}

/// Starts or concludes the migration workflow.
pub struct MigrationHandlerTool {
    gateway: Arc<WorkflowGateway>,
}

impl MigrationHandlerTool {
    pub fn new(gateway: Arc<WorkflowGateway>) -> Self {
        Self { gateway }
    }

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            MIGRATION_HANDLER,
            "Space to space migration",
            "Start (enableWorkflow: true) or conclude (enableWorkflow: false) the space to space \
             migration workflow. Starting it enables the export and import tools.",
            json!({
                "type": "object",
                "properties": {"enableWorkflow": {"type": "boolean"}},
                "required": ["enableWorkflow"]
            }),
        )
        .with_annotations(json!({"readOnlyHint": false, "idempotentHint": true, "openWorldHint": false}))
    }
}

#[async_trait]
impl ToolHandler for MigrationHandlerTool {
    async fn call(&self, args: JsonValue) -> ToolResult<ToolResponse> {
        let args: HandlerArgs = parse(args)?;
        let transition = self.gateway.set_enabled(args.enable_workflow);
        let mut response = success_response(
            &transition.message,
            Some(&json!({"phase": transition.phase, "tools": transition.tools})),
        );
        if let Some(instructions) = transition.instructions {
            response.content.push(TextContent::new(instructions));
        }
        Ok(response)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportArgs {
    #[serde(flatten)]
    scope: ScopeArgs,
    #[serde(default)]
    export_dir: Option<PathBuf>,
}

pub struct ExportSpaceTool {
    ctx: ToolContext,
}

impl ExportSpaceTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            EXPORT_SPACE,
            "Export space",
            "Export content types, locales, assets and entries of a space to a JSON file.",
            object_schema(
                json!({"exportDir": {"type": "string", "description": "Directory for the export file"}}),
                &[],
            ),
        )
        .with_annotations(json!({"readOnlyHint": true, "openWorldHint": true}))
    }

    async fn run(&self, scope: SpaceScope, dir: PathBuf) -> ToolResult<ToolResponse> {
        let client = self.ctx.client.as_ref();
        let mut export = SpaceExport {
            space_id: scope.space_id.clone(),
            environment_id: scope.environment_id.clone(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            ..Default::default()
        };
        for collection in ContentCollection::ALL {
            let items = fetch_all(client, &scope, collection).await?;
            *export.collection_mut(collection) = items;
        }

        tokio::fs::create_dir_all(&dir).await?;
        let file = dir.join(format!(
            "{}-{}-{}.json",
            scope.space_id,
            scope.environment_id,
            chrono::Utc::now().format("%Y%m%dT%H%M%S%3f")
        ));
        tokio::fs::write(&file, serde_json::to_vec_pretty(&export)?).await?;
        tracing::info!(%scope, file = %file.display(), "space exported");

        Ok(success_response(
            format!("Space {} exported", scope.space_id),
            Some(&json!({"contentFile": file.display().to_string(), "counts": export.counts()})),
        ))
    }
}

#[async_trait]
impl ToolHandler for ExportSpaceTool {
    async fn call(&self, args: JsonValue) -> ToolResult<ToolResponse> {
        let args: ExportArgs = parse(args)?;
        let scope = self.ctx.scope(&args.scope)?;
        let dir = args.export_dir.unwrap_or_else(|| self.ctx.export_dir.clone());
        Ok(with_error_handling("Error exporting space", self.run(scope, dir)).await)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportArgs {
    #[serde(flatten)]
    scope: ScopeArgs,
    content_file: PathBuf,
    #[serde(default)]
    publish: bool,
}

pub struct ImportSpaceTool {
    ctx: ToolContext,
}

impl ImportSpaceTool {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            IMPORT_SPACE,
            "Import space",
            "Import an export file into a space: content types are created and activated, then \
             assets and entries are created or updated. Locales are not imported. With publish \
             set, imported assets and entries are published in bulk actions of up to 100.",
            object_schema(
                json!({
                    "contentFile": {"type": "string", "description": "Path returned by export_space"},
                    "publish": {"type": "boolean", "default": false}
                }),
                &["contentFile"],
            ),
        )
        .with_annotations(json!({"readOnlyHint": false, "destructiveHint": true, "openWorldHint": true}))
    }

    async fn run(&self, scope: SpaceScope, args: ImportArgs) -> ToolResult<ToolResponse> {
        let client = self.ctx.client.as_ref();
        let raw = tokio::fs::read(&args.content_file).await?;
        let export: SpaceExport = serde_json::from_slice(&raw)?;

        for content_type in &export.content_types {
            let id = item_id(content_type)?;
            client
                .upsert(&scope, ContentCollection::ContentTypes, &id, &writable_body(content_type), None)
                .await?;
            client.activate_content_type(&scope, &id).await?;
        }

        let mut asset_ids = Vec::with_capacity(export.assets.len());
        for asset in &export.assets {
            let id = item_id(asset)?;
            client.upsert(&scope, ContentCollection::Assets, &id, &writable_body(asset), None).await?;
            asset_ids.push(id);
        }

        let mut entry_ids = Vec::with_capacity(export.entries.len());
        for entry in &export.entries {
            let id = item_id(entry)?;
            let content_type = entry.pointer("/sys/contentType/sys/id").and_then(|v| v.as_str());
            client
                .upsert(&scope, ContentCollection::Entries, &id, &writable_body(entry), content_type)
                .await?;
            entry_ids.push(id);
        }

        let mut bulk_actions = Vec::new();
        if args.publish {
            for (kind, ids) in [(EntityKind::Asset, &asset_ids), (EntityKind::Entry, &entry_ids)] {
                for chunk in ids.chunks(MAX_BULK_ENTITIES) {
                    let links = EntityLinkResolver::new(client)
                        .resolve(&scope, kind, chunk, LinkMode::Versioned)
                        .await?;
                    let entities = EntitiesCollection::new(links)?;
                    let action = BulkActionCoordinator::new(client, self.ctx.bulk_policy)
                        .execute(&scope, BulkOperation::Publish, &entities)
                        .await?;
                    bulk_actions.push(action.id);
                }
            }
        }

        tracing::info!(%scope, assets = asset_ids.len(), entries = entry_ids.len(), "space imported");
        Ok(success_response(
            format!("Content imported into space {}", scope.space_id),
            Some(&json!({
                "contentTypes": export.content_types.len(),
                "assets": asset_ids.len(),
                "entries": entry_ids.len(),
                "localesSkipped": export.locales.len(),
                "published": args.publish,
                "bulkActions": bulk_actions,
            })),
        ))
    }
}

#[async_trait]
impl ToolHandler for ImportSpaceTool {
    async fn call(&self, args: JsonValue) -> ToolResult<ToolResponse> {
        let args: ImportArgs = parse(args)?;
        let scope = self.ctx.scope(&args.scope)?;
        Ok(with_error_handling("Error importing space", self.run(scope, args)).await)
    }
}
