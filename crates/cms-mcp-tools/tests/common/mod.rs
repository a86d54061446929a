#![allow(dead_code)]

use async_trait::async_trait;
use cms_mcp_core::{
    AiActionInvocationRequest, AiActionInvoker, Archivable, BulkAction, BulkActionStatus,
    BulkOperation, BulkPublishable, ContentCollection, CoreError, CoreResult, EntitiesCollection,
    EntityKind, EntityReader, Invocation, Page, Publishable, SpaceContent, SpaceScope,
};
use cms_mcp_tools::{build_registry, PollPolicy, ToolContext, ToolRegistry};
use serde_json::{json, Value as JsonValue};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory CMS with a call log.
#[derive(Default)]
pub struct MockCms {
    pub calls: Mutex<Vec<String>>,
    pub versions: Mutex<HashMap<String, i64>>,
    pub failures: Mutex<HashMap<String, String>>,
    pub submitted: Mutex<Vec<(BulkOperation, EntitiesCollection)>>,
    pub bulk_statuses: Mutex<VecDeque<BulkActionStatus>>,
    /// Poll count after which invocation N completes; 0 never completes
    pub invocation_ready_after: Mutex<Vec<usize>>,
    pub invocation_polls: Mutex<HashMap<String, usize>>,
    pub content: Mutex<HashMap<ContentCollection, Vec<JsonValue>>>,
    pub upserts: Mutex<Vec<(ContentCollection, String, Option<String>)>>,
}

impl MockCms {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail(&self, id: &str, message: &str) {
        self.failures.lock().unwrap().insert(id.to_string(), message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls().into_iter().filter(|c| c.starts_with(prefix)).collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, id: &str) -> CoreResult<()> {
        match self.failures.lock().unwrap().get(id) {
            Some(message) => Err(CoreError::remote(Some(422), message.clone())),
            None => Ok(()),
        }
    }

    fn entity(&self, kind: EntityKind, id: &str) -> JsonValue {
        let version = self.versions.lock().unwrap().get(id).copied().unwrap_or(1);
        json!({"sys": {"id": id, "type": kind.link_type(), "version": version}})
    }
}

#[async_trait]
impl EntityReader for MockCms {
    async fn current_version(
        &self,
        _scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
    ) -> CoreResult<i64> {
        self.record(format!("version {} {}", kind.label(), id));
        self.check(id)?;
        Ok(self.versions.lock().unwrap().get(id).copied().unwrap_or(1))
    }
}

#[async_trait]
impl Archivable for MockCms {
    async fn archive(
        &self,
        _scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
    ) -> CoreResult<JsonValue> {
        self.record(format!("archive {} {}", kind.label(), id));
        self.check(id)?;
        Ok(self.entity(kind, id))
    }

    async fn unarchive(
        &self,
        _scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
    ) -> CoreResult<JsonValue> {
        self.record(format!("unarchive {} {}", kind.label(), id));
        self.check(id)?;
        Ok(self.entity(kind, id))
    }
}

#[async_trait]
impl Publishable for MockCms {
    async fn publish(
        &self,
        _scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
        version: i64,
    ) -> CoreResult<JsonValue> {
        self.record(format!("publish {} {} {}", kind.label(), id, version));
        self.check(id)?;
        Ok(self.entity(kind, id))
    }

    async fn unpublish(
        &self,
        _scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
    ) -> CoreResult<JsonValue> {
        self.record(format!("unpublish {} {}", kind.label(), id));
        self.check(id)?;
        Ok(self.entity(kind, id))
    }
}

#[async_trait]
impl BulkPublishable for MockCms {
    async fn submit_bulk_action(
        &self,
        _scope: &SpaceScope,
        operation: BulkOperation,
        entities: &EntitiesCollection,
    ) -> CoreResult<BulkAction> {
        self.record(format!("submit {} {}", operation.as_str(), entities.ids().join(",")));
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push((operation, entities.clone()));
        Ok(BulkAction::new(format!("bulk-{}", submitted.len()), BulkActionStatus::Created))
    }

    async fn get_bulk_action(&self, _scope: &SpaceScope, action_id: &str) -> CoreResult<BulkAction> {
        self.record(format!("get {action_id}"));
        let mut statuses = self.bulk_statuses.lock().unwrap();
        let status = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().copied()
        };
        Ok(BulkAction::new(action_id, status.unwrap_or(BulkActionStatus::Succeeded)))
    }
}

#[async_trait]
impl AiActionInvoker for MockCms {
    async fn invoke_ai_action(
        &self,
        _scope: &SpaceScope,
        action_id: &str,
        _request: &AiActionInvocationRequest,
    ) -> CoreResult<String> {
        let n = self.calls_starting_with("invoke").len();
        self.record(format!("invoke {action_id}"));
        Ok(format!("inv-{n}"))
    }

    async fn get_ai_action_invocation(
        &self,
        _scope: &SpaceScope,
        _action_id: &str,
        invocation_id: &str,
    ) -> CoreResult<Invocation> {
        self.record(format!("poll {invocation_id}"));
        let index: usize = invocation_id.trim_start_matches("inv-").parse().unwrap_or(0);
        let mut polls = self.invocation_polls.lock().unwrap();
        let count = polls.entry(invocation_id.to_string()).or_insert(0);
        *count += 1;
        let ready = self.invocation_ready_after.lock().unwrap().get(index).copied().unwrap_or(1);
        if ready != 0 && *count >= ready {
            Ok(Invocation::completed(invocation_id, format!("Generated text {index}")))
        } else {
            Ok(Invocation::in_progress(invocation_id))
        }
    }
}

#[async_trait]
impl SpaceContent for MockCms {
    async fn list_page(
        &self,
        _scope: &SpaceScope,
        collection: ContentCollection,
        skip: u64,
        limit: u64,
    ) -> CoreResult<Page> {
        self.record(format!("list {collection} {skip}"));
        let all = self.content.lock().unwrap().get(&collection).cloned().unwrap_or_default();
        let items: Vec<_> = all.iter().skip(skip as usize).take(limit as usize).cloned().collect();
        Ok(Page { total: all.len() as u64, skip, limit, items })
    }

    async fn upsert(
        &self,
        _scope: &SpaceScope,
        collection: ContentCollection,
        id: &str,
        body: &JsonValue,
        content_type: Option<&str>,
    ) -> CoreResult<JsonValue> {
        self.record(format!("upsert {collection} {id}"));
        self.upserts.lock().unwrap().push((collection, id.to_string(), content_type.map(str::to_string)));
        Ok(body.clone())
    }

    async fn activate_content_type(&self, _scope: &SpaceScope, id: &str) -> CoreResult<JsonValue> {
        self.record(format!("activate {id}"));
        Ok(json!({"sys": {"id": id}}))
    }
}

pub fn context(mock: Arc<MockCms>, export_dir: PathBuf) -> ToolContext {
    ToolContext {
        client: mock,
        default_space_id: Some("space-1".to_string()),
        default_environment_id: "master".to_string(),
        bulk_policy: PollPolicy::new(Duration::from_millis(1_000), 30),
        ai_policy: PollPolicy::ai_action_default(),
        export_dir,
    }
}

pub fn registry(mock: Arc<MockCms>) -> ToolRegistry {
    build_registry(&context(mock, std::env::temp_dir().join("cms-mcp-test-exports")))
}
