//! Publish state and archive state tools for entries and assets.

use crate::args::{id_arg, object_schema, parse, IdArg};
use crate::bulk::BulkActionCoordinator;
use crate::context::{ScopeArgs, ToolContext};
use crate::error::ToolResult;
use crate::links::EntityLinkResolver;
use crate::registry::{ToolHandler, ToolSpec};
use crate::response::{success_response, with_error_handling, ToolResponse};
use crate::sequential::{ItemAction, SequentialFallbackExecutor, SequentialOutcome};
use async_trait::async_trait;
use cms_mcp_core::{BulkOperation, EntitiesCollection, EntityKind, SpaceScope, MAX_BULK_ENTITIES};
use serde_json::{json, Value as JsonValue};

/// `entryId` or `assetId`
pub fn id_field(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Entry => "entryId",
        EntityKind::Asset => "assetId",
    }
}

fn id_schema(kind: EntityKind, verb: &str) -> JsonValue {
    let field = id_field(kind);
    let mut properties = serde_json::Map::new();
    properties.insert(
        field.to_string(),
        json!({
            "oneOf": [
                {"type": "string"},
                {"type": "array", "items": {"type": "string"}, "maxItems": MAX_BULK_ENTITIES}
            ],
            "description": format!(
                "ID of the {kind} to {verb}, or an array of IDs to {verb} several at once"
            )
        }),
    );
    object_schema(JsonValue::Object(properties), &[field])
}

/// Publish or unpublish one entity directly, or many through a bulk action.
pub struct PublishStateTool {
    ctx: ToolContext,
    kind: EntityKind,
    operation: BulkOperation,
}

impl PublishStateTool {
    pub fn new(ctx: ToolContext, kind: EntityKind, operation: BulkOperation) -> Self {
        Self { ctx, kind, operation }
    }

    pub fn spec(kind: EntityKind, operation: BulkOperation) -> ToolSpec {
        let verb = operation.as_str();
        let name = format!("{}_{}", verb, kind.label());
        let description = match operation {
            BulkOperation::Publish => format!(
                "Publish a {kind}, or up to {MAX_BULK_ENTITIES} {plural} at once. A list of IDs is \
                 published as one bulk action and waits until the action finishes.",
                plural = kind.plural()
            ),
            _ => format!(
                "Unpublish a {kind}, or up to {MAX_BULK_ENTITIES} {plural} at once. A list of IDs is \
                 unpublished as one bulk action and waits until the action finishes.",
                plural = kind.plural()
            ),
        };
        ToolSpec::new(&name, &format!("{} {}", title_case(verb), kind.label()), &description, id_schema(kind, verb))
            .with_annotations(json!({
                "readOnlyHint": false,
                "destructiveHint": false,
                "idempotentHint": true,
                "openWorldHint": true
            }))
    }

    fn context(&self) -> String {
        let gerund = match self.operation {
            BulkOperation::Publish => "publishing",
            BulkOperation::Unpublish => "unpublishing",
            BulkOperation::Validate => "validating",
        };
        format!("Error {gerund} {}", self.kind)
    }

    async fn run(&self, scope: SpaceScope, ids: IdArg) -> ToolResult<ToolResponse> {
        let client = self.ctx.client.as_ref();
        let past = self.operation.past_tense();

        match ids {
            IdArg::One(id) => {
                let value = match self.operation {
                    BulkOperation::Publish => {
                        let version = client.current_version(&scope, self.kind, &id).await?;
                        client.publish(&scope, self.kind, &id, version).await?
                    }
                    _ => client.unpublish(&scope, self.kind, &id).await?,
                };
                Ok(success_response(format!("{} {past} successfully", self.kind.title()), Some(&value)))
            }
            IdArg::Many(ids) => {
                EntitiesCollection::check_len(ids.len())?;
                let links = EntityLinkResolver::new(client)
                    .resolve(&scope, self.kind, &ids, self.operation.link_mode())
                    .await?;
                let entities = EntitiesCollection::new(links)?;
                let action = BulkActionCoordinator::new(client, self.ctx.bulk_policy)
                    .execute(&scope, self.operation, &entities)
                    .await?;
                Ok(success_response(
                    format!("{}(s) {past} successfully", self.kind.title()),
                    Some(&json!({
                        "bulkActionId": action.id,
                        "status": action.status,
                        "ids": ids,
                    })),
                ))
            }
        }
    }
}

#[async_trait]
impl ToolHandler for PublishStateTool {
    async fn call(&self, args: JsonValue) -> ToolResult<ToolResponse> {
        let ids = id_arg(&args, id_field(self.kind))?;
        let scope = self.ctx.scope(&parse::<ScopeArgs>(args)?)?;
        Ok(with_error_handling(&self.context(), self.run(scope, ids)).await)
    }
}

/// Archive or unarchive entities one at a time, stopping at the first failure.
pub struct ArchiveStateTool {
    ctx: ToolContext,
    kind: EntityKind,
    action: ItemAction,
}

impl ArchiveStateTool {
    pub fn new(ctx: ToolContext, kind: EntityKind, action: ItemAction) -> Self {
        Self { ctx, kind, action }
    }

    pub fn spec(kind: EntityKind, action: ItemAction) -> ToolSpec {
        let name = format!("{}_{}", action.verb, kind.label());
        let description = format!(
            "{} a {kind}, or several {plural} in order. Processing stops at the first failure and \
             the error lists the {plural} that were already {past}.",
            title_case(action.verb),
            plural = kind.plural(),
            past = action.past,
        );
        ToolSpec::new(
            &name,
            &format!("{} {}", title_case(action.verb), kind.label()),
            &description,
            id_schema(kind, action.verb),
        )
        .with_annotations(json!({
            "readOnlyHint": false,
            "destructiveHint": false,
            "idempotentHint": false,
            "openWorldHint": true
        }))
    }

    async fn run(&self, scope: SpaceScope, ids: IdArg) -> ToolResult<ToolResponse> {
        let client = self.ctx.client.as_ref();
        let (kind, archive) = (self.kind, self.action == ItemAction::ARCHIVE);
        let scope = &scope;

        let outcome = SequentialFallbackExecutor::new(kind, self.action)
            .run(&ids.into_vec(), move |id| async move {
                if archive {
                    client.archive(scope, kind, &id).await
                } else {
                    client.unarchive(scope, kind, &id).await
                }
            })
            .await?;

        Ok(match outcome {
            SequentialOutcome::Single { value, .. } => success_response(
                format!("{} {} successfully", kind.title(), self.action.past),
                Some(&value),
            ),
            SequentialOutcome::Batch { succeeded } => success_response(
                format!("Successfully processed {} {}", succeeded.len(), kind.plural()),
                Some(&json!({
                    "processed": succeeded.len(),
                    "ids": succeeded,
                    "operation": self.action.verb,
                })),
            ),
        })
    }
}

#[async_trait]
impl ToolHandler for ArchiveStateTool {
    async fn call(&self, args: JsonValue) -> ToolResult<ToolResponse> {
        let ids = id_arg(&args, id_field(self.kind))?;
        let scope = self.ctx.scope(&parse::<ScopeArgs>(args)?)?;
        let context = format!("Error {} {}", self.action.gerund, self.kind);
        Ok(with_error_handling(&context, self.run(scope, ids)).await)
    }
}

/// Validate entries for publishing without changing them.
pub struct BulkValidateTool {
    ctx: ToolContext,
}

impl BulkValidateTool {
    pub const NAME: &'static str = "bulk_validate";

    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            "Bulk validate entries",
            "Check whether up to 100 entries could be published, without publishing them.",
            object_schema(
                json!({
                    "entryIds": {
                        "type": "array",
                        "items": {"type": "string"},
                        "minItems": 1,
                        "maxItems": MAX_BULK_ENTITIES,
                        "description": "IDs of the entries to validate"
                    }
                }),
                &["entryIds"],
            ),
        )
        .with_annotations(json!({"readOnlyHint": true, "openWorldHint": true}))
    }

    async fn run(&self, scope: SpaceScope, ids: Vec<String>) -> ToolResult<ToolResponse> {
        EntitiesCollection::check_len(ids.len())?;
        let client = self.ctx.client.as_ref();
        let links = EntityLinkResolver::new(client)
            .resolve(&scope, EntityKind::Entry, &ids, BulkOperation::Validate.link_mode())
            .await?;
        let entities = EntitiesCollection::new(links)?;
        let action = BulkActionCoordinator::new(client, self.ctx.bulk_policy)
            .execute(&scope, BulkOperation::Validate, &entities)
            .await?;
        Ok(success_response(
            "Entry(s) validated successfully",
            Some(&json!({"bulkActionId": action.id, "status": action.status, "ids": ids})),
        ))
    }
}

#[async_trait]
impl ToolHandler for BulkValidateTool {
    async fn call(&self, args: JsonValue) -> ToolResult<ToolResponse> {
        let ids = id_arg(&args, "entryIds")?.into_vec();
        let scope = self.ctx.scope(&parse::<ScopeArgs>(args)?)?;
        Ok(with_error_handling("Error validating entries", self.run(scope, ids)).await)
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
