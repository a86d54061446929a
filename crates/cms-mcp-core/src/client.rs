//! Narrow capability traits the tool core depends on.
//!
//! The concrete HTTP client implements all of them; tests implement only
//! the ones they exercise.

use crate::content::{ContentCollection, Page};
use crate::error::CoreResult;
use crate::invocation::{AiActionInvocationRequest, Invocation};
use crate::types::{BulkAction, BulkOperation, EntitiesCollection, EntityKind, SpaceScope};
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Reads entity metadata needed for optimistic locking.
#[async_trait]
pub trait EntityReader: Send + Sync {
    /// Current `sys.version` of an entity
    async fn current_version(
        &self,
        scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
    ) -> CoreResult<i64>;
}

/// Entities that can be archived and restored one at a time.
#[async_trait]
pub trait Archivable: Send + Sync {
    async fn archive(&self, scope: &SpaceScope, kind: EntityKind, id: &str)
        -> CoreResult<JsonValue>;
    async fn unarchive(
        &self,
        scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
    ) -> CoreResult<JsonValue>;
}

/// Single-entity publish state mutations.
#[async_trait]
pub trait Publishable: Send + Sync {
    async fn publish(
        &self,
        scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
        version: i64,
    ) -> CoreResult<JsonValue>;
    async fn unpublish(
        &self,
        scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
    ) -> CoreResult<JsonValue>;
}

/// Asynchronous multi-entity jobs.
#[async_trait]
pub trait BulkPublishable: Send + Sync {
    /// Submit one bulk job. Never retried by callers.
    async fn submit_bulk_action(
        &self,
        scope: &SpaceScope,
        operation: BulkOperation,
        entities: &EntitiesCollection,
    ) -> CoreResult<BulkAction>;

    /// Re-read the status of a submitted job
    async fn get_bulk_action(&self, scope: &SpaceScope, action_id: &str)
        -> CoreResult<BulkAction>;
}

#[async_trait]
pub trait AiActionInvoker: Send + Sync {
    /// Start an invocation and return its id.
    async fn invoke_ai_action(
        &self,
        scope: &SpaceScope,
        action_id: &str,
        request: &AiActionInvocationRequest,
    ) -> CoreResult<String>;

    async fn get_ai_action_invocation(
        &self,
        scope: &SpaceScope,
        action_id: &str,
        invocation_id: &str,
    ) -> CoreResult<Invocation>;
}

/// Raw collection access used by space export/import.
#[async_trait]
pub trait SpaceContent: Send + Sync {
    async fn list_page(
        &self,
        scope: &SpaceScope,
        collection: ContentCollection,
        skip: u64,
        limit: u64,
    ) -> CoreResult<Page>;

    /// Create or update an item by id. Entries need their content type id.
    async fn upsert(
        &self,
        scope: &SpaceScope,
        collection: ContentCollection,
        id: &str,
        body: &JsonValue,
        content_type: Option<&str>,
    ) -> CoreResult<JsonValue>;

    /// Activate (publish) a content type so entries can reference it.
    async fn activate_content_type(&self, scope: &SpaceScope, id: &str) -> CoreResult<JsonValue>;
}

/// Everything the tool server needs from the CMS.
pub trait CmsClient:
    EntityReader + Archivable + Publishable + BulkPublishable + AiActionInvoker + SpaceContent
{
}

impl<T> CmsClient for T where
    T: EntityReader + Archivable + Publishable + BulkPublishable + AiActionInvoker + SpaceContent
{
}
