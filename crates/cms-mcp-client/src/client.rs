use crate::error::{ClientError, ClientResult};
use crate::wire;
use async_trait::async_trait;
use cms_mcp_config::CmsSettings;
use cms_mcp_core::{
    AiActionInvocationRequest, AiActionInvoker, Archivable, BulkAction, BulkOperation,
    BulkPublishable, ContentCollection, CoreResult, EntitiesCollection, EntityKind, EntityReader,
    Invocation, Page, Publishable, SpaceContent, SpaceScope,
};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{json, Value as JsonValue};
use std::time::Duration;

pub const CONTENT_TYPE: &str = "application/vnd.contentful.management.v1+json";
const VERSION_HEADER: &str = "X-Contentful-Version";
const CONTENT_TYPE_HEADER: &str = "X-Contentful-Content-Type";

/// Management API client. Every call is a single request; nothing is retried here.
#[derive(Clone)]
pub struct HttpCmsClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl std::fmt::Debug for HttpCmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCmsClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl HttpCmsClient {
    pub fn new(settings: &CmsSettings) -> ClientResult<Self> {
        Self::with_timeout(&settings.host, &settings.access_token, settings.request_timeout())
    }

    pub fn with_timeout(host: &str, access_token: &str, timeout: Duration) -> ClientResult<Self> {
        if access_token.trim().is_empty() {
            return Err(ClientError::InvalidConfig("access token is empty".to_string()));
        }
        if timeout.is_zero() {
            return Err(ClientError::InvalidConfig("request timeout must be positive".to_string()));
        }
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cms-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: host.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn env_url(&self, scope: &SpaceScope, path: &str) -> String {
        format!(
            "{}/spaces/{}/environments/{}/{}",
            self.base_url, scope.space_id, scope.environment_id, path
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
    }

    async fn send(&self, builder: RequestBuilder) -> ClientResult<JsonValue> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = wire::error_message(status.as_u16(), &body);
            tracing::debug!(status = status.as_u16(), %message, "management API rejected request");
            return Err(ClientError::Api { status: status.as_u16(), message });
        }
        if body.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn get(&self, url: &str) -> ClientResult<JsonValue> {
        self.send(self.request(Method::GET, url)).await
    }

    async fn version_of(&self, scope: &SpaceScope, path: &str) -> ClientResult<i64> {
        let body = self.get(&self.env_url(scope, path)).await?;
        wire::version(&body)
    }

    /// PUT/DELETE on a state sub-resource, carrying the current version
    async fn versioned_state_change(
        &self,
        scope: &SpaceScope,
        entity_path: &str,
        state: &str,
        method: Method,
    ) -> ClientResult<JsonValue> {
        let version = self.version_of(scope, entity_path).await?;
        let url = self.env_url(scope, &format!("{entity_path}/{state}"));
        self.send(self.request(method, &url).header(VERSION_HEADER, version)).await
    }
}

fn entity_path(kind: EntityKind, id: &str) -> String {
    format!("{}/{}", kind.path_segment(), id)
}

#[async_trait]
impl EntityReader for HttpCmsClient {
    async fn current_version(
        &self,
        scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
    ) -> CoreResult<i64> {
        Ok(self.version_of(scope, &entity_path(kind, id)).await?)
    }
}

#[async_trait]
impl Archivable for HttpCmsClient {
    async fn archive(
        &self,
        scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
    ) -> CoreResult<JsonValue> {
        tracing::debug!(%scope, kind = kind.label(), id, "archive");
        Ok(self.versioned_state_change(scope, &entity_path(kind, id), "archived", Method::PUT).await?)
    }

    async fn unarchive(
        &self,
        scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
    ) -> CoreResult<JsonValue> {
        tracing::debug!(%scope, kind = kind.label(), id, "unarchive");
        Ok(self
            .versioned_state_change(scope, &entity_path(kind, id), "archived", Method::DELETE)
            .await?)
    }
}

#[async_trait]
impl Publishable for HttpCmsClient {
    async fn publish(
        &self,
        scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
        version: i64,
    ) -> CoreResult<JsonValue> {
        let url = self.env_url(scope, &format!("{}/published", entity_path(kind, id)));
        Ok(self.send(self.request(Method::PUT, &url).header(VERSION_HEADER, version)).await?)
    }

    async fn unpublish(
        &self,
        scope: &SpaceScope,
        kind: EntityKind,
        id: &str,
    ) -> CoreResult<JsonValue> {
        let url = self.env_url(scope, &format!("{}/published", entity_path(kind, id)));
        Ok(self.send(self.request(Method::DELETE, &url)).await?)
    }
}

#[async_trait]
impl BulkPublishable for HttpCmsClient {
    async fn submit_bulk_action(
        &self,
        scope: &SpaceScope,
        operation: BulkOperation,
        entities: &EntitiesCollection,
    ) -> CoreResult<BulkAction> {
        let url = self.env_url(scope, &format!("bulk_actions/{}", operation.as_str()));
        let body = match operation {
            BulkOperation::Validate => json!({ "action": "publish", "entities": entities }),
            _ => json!({ "entities": entities }),
        };
        tracing::info!(%scope, operation = operation.as_str(), count = entities.len(), "submitting bulk action");
        let response = self.send(self.request(Method::POST, &url).json(&body)).await?;
        Ok(wire::bulk_action(&response)?)
    }

    async fn get_bulk_action(
        &self,
        scope: &SpaceScope,
        action_id: &str,
    ) -> CoreResult<BulkAction> {
        let url = self.env_url(scope, &format!("bulk_actions/actions/{action_id}"));
        let response = self.get(&url).await?;
        Ok(wire::bulk_action(&response)?)
    }
}

#[async_trait]
impl AiActionInvoker for HttpCmsClient {
    async fn invoke_ai_action(
        &self,
        scope: &SpaceScope,
        action_id: &str,
        request: &AiActionInvocationRequest,
    ) -> CoreResult<String> {
        let url = self.env_url(scope, &format!("ai/actions/{action_id}/invoke"));
        let response = self.send(self.request(Method::POST, &url).json(request)).await?;
        Ok(wire::sys_id(&response)?)
    }

    async fn get_ai_action_invocation(
        &self,
        scope: &SpaceScope,
        action_id: &str,
        invocation_id: &str,
    ) -> CoreResult<Invocation> {
        let url =
            self.env_url(scope, &format!("ai/actions/{action_id}/invocations/{invocation_id}"));
        let response = self.get(&url).await?;
        Ok(wire::invocation(&response)?)
    }
}

#[async_trait]
impl SpaceContent for HttpCmsClient {
    async fn list_page(
        &self,
        scope: &SpaceScope,
        collection: ContentCollection,
        skip: u64,
        limit: u64,
    ) -> CoreResult<Page> {
        let url = self.env_url(scope, collection.path_segment());
        let builder = self
            .request(Method::GET, &url)
            .query(&[("skip", skip.to_string()), ("limit", limit.to_string())]);
        let response = self.send(builder).await?;
        Ok(wire::page(response)?)
    }

    async fn upsert(
        &self,
        scope: &SpaceScope,
        collection: ContentCollection,
        id: &str,
        body: &JsonValue,
        content_type: Option<&str>,
    ) -> CoreResult<JsonValue> {
        let path = format!("{}/{}", collection.path_segment(), id);
        let existing = match self.version_of(scope, &path).await {
            Ok(version) => Some(version),
            Err(ClientError::Api { status: 404, .. }) => None,
            Err(e) => return Err(e.into()),
        };

        let url = self.env_url(scope, &path);
        let mut builder = self.request(Method::PUT, &url).json(body);
        if let Some(version) = existing {
            builder = builder.header(VERSION_HEADER, version);
        }
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE_HEADER, content_type);
        }
        tracing::debug!(%scope, collection = %collection, id, update = existing.is_some(), "upsert");
        Ok(self.send(builder).await?)
    }

    async fn activate_content_type(&self, scope: &SpaceScope, id: &str) -> CoreResult<JsonValue> {
        Ok(self
            .versioned_state_change(scope, &format!("content_types/{id}"), "published", Method::PUT)
            .await?)
    }
}
