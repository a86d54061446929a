use cms_mcp_client::HttpCmsClient;
use cms_mcp_core::{
    AiActionInvocationRequest, AiActionInvoker, Archivable, BulkActionStatus, BulkOperation,
    BulkPublishable, ContentCollection, CoreError, EntitiesCollection, EntityKind, EntityLink,
    EntityReader, InvocationStatus, Publishable, SpaceContent, SpaceScope,
};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

const ENV: &str = "/spaces/space-1/environments/master";

fn client(server: &MockServer) -> HttpCmsClient {
    HttpCmsClient::with_timeout(&server.base_url(), "secret-token", Duration::from_secs(5)).unwrap()
}

fn scope() -> SpaceScope {
    SpaceScope::new("space-1", "master")
}

#[tokio::test]
async fn current_version_reads_sys_version_with_auth() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{ENV}/entries/e1"))
                .header("authorization", "Bearer secret-token")
                .header("content-type", "application/vnd.contentful.management.v1+json");
            then.status(200).json_body(json!({"sys": {"id": "e1", "version": 4}}));
        })
        .await;

    let version = client(&server).current_version(&scope(), EntityKind::Entry, "e1").await.unwrap();

    assert_eq!(version, 4);
    mock.assert_async().await;
}

#[tokio::test]
async fn archive_sends_current_version() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{ENV}/assets/a1"));
            then.status(200).json_body(json!({"sys": {"id": "a1", "version": 9}}));
        })
        .await;
    let archive = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(format!("{ENV}/assets/a1/archived"))
                .header("x-contentful-version", "9");
            then.status(200).json_body(json!({"sys": {"id": "a1", "version": 10}}));
        })
        .await;

    let body = client(&server).archive(&scope(), EntityKind::Asset, "a1").await.unwrap();

    assert_eq!(body["sys"]["version"], 10);
    archive.assert_async().await;
}

#[tokio::test]
async fn remote_rejection_keeps_message_and_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{ENV}/entries/y"));
            then.status(200).json_body(json!({"sys": {"id": "y", "version": 2}}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path(format!("{ENV}/entries/y/archived"));
            then.status(422).json_body(json!({
                "sys": {"type": "Error", "id": "UnprocessableEntity"},
                "message": "Must be unpublished"
            }));
        })
        .await;

    let err = client(&server).archive(&scope(), EntityKind::Entry, "y").await.unwrap_err();

    assert_eq!(err.to_string(), "Must be unpublished");
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn publish_and_unpublish_hit_published_resource() {
    let server = MockServer::start_async().await;
    let publish = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(format!("{ENV}/entries/e1/published"))
                .header("x-contentful-version", "3");
            then.status(200).json_body(json!({"sys": {"id": "e1", "version": 4}}));
        })
        .await;
    let unpublish = server
        .mock_async(|when, then| {
            when.method(DELETE).path(format!("{ENV}/entries/e1/published"));
            then.status(200).json_body(json!({"sys": {"id": "e1", "version": 5}}));
        })
        .await;

    let client = client(&server);
    client.publish(&scope(), EntityKind::Entry, "e1", 3).await.unwrap();
    client.unpublish(&scope(), EntityKind::Entry, "e1").await.unwrap();

    publish.assert_async().await;
    unpublish.assert_async().await;
}

#[tokio::test]
async fn bulk_validate_posts_publish_action_with_entities() {
    let server = MockServer::start_async().await;
    let submit = server
        .mock_async(|when, then| {
            when.method(POST).path(format!("{ENV}/bulk_actions/validate")).json_body(json!({
                "action": "publish",
                "entities": {
                    "sys": {"type": "Array"},
                    "items": [{"sys": {"type": "Link", "linkType": "Entry", "id": "e1"}}]
                }
            }));
            then.status(201).json_body(json!({"sys": {"id": "bulk-1", "status": "created"}}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{ENV}/bulk_actions/actions/bulk-1"));
            then.status(200).json_body(json!({"sys": {"id": "bulk-1", "status": "succeeded"}}));
        })
        .await;

    let client = client(&server);
    let entities =
        EntitiesCollection::new(vec![EntityLink::unversioned(EntityKind::Entry, "e1")]).unwrap();
    let action =
        client.submit_bulk_action(&scope(), BulkOperation::Validate, &entities).await.unwrap();
    assert_eq!(action.id, "bulk-1");
    assert_eq!(action.status, BulkActionStatus::Created);

    let refreshed = client.get_bulk_action(&scope(), "bulk-1").await.unwrap();
    assert_eq!(refreshed.status, BulkActionStatus::Succeeded);
    submit.assert_async().await;
}

#[tokio::test]
async fn ai_action_invoke_then_fetch() {
    let server = MockServer::start_async().await;
    let invoke = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("{ENV}/ai/actions/act-1/invoke"))
                .json_body(json!({"outputFormat": "Markdown", "variables": []}));
            then.status(202).json_body(json!({"sys": {"id": "inv-1", "status": "SCHEDULED"}}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{ENV}/ai/actions/act-1/invocations/inv-1"));
            then.status(200).json_body(json!({
                "sys": {"id": "inv-1", "status": "COMPLETED"},
                "result": {"type": "text", "content": "Generated copy"}
            }));
        })
        .await;

    let client = client(&server);
    let request = AiActionInvocationRequest { output_format: Default::default(), variables: vec![] };
    let id = client.invoke_ai_action(&scope(), "act-1", &request).await.unwrap();
    assert_eq!(id, "inv-1");

    let invocation = client.get_ai_action_invocation(&scope(), "act-1", "inv-1").await.unwrap();
    assert_eq!(invocation.status, InvocationStatus::Completed);
    assert_eq!(invocation.content(), "Generated copy");
    invoke.assert_async().await;
}

#[tokio::test]
async fn list_page_passes_skip_and_limit() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{ENV}/locales"))
                .query_param("skip", "100")
                .query_param("limit", "100");
            then.status(200).json_body(json!({
                "total": 101, "skip": 100, "limit": 100,
                "items": [{"sys": {"id": "en-US"}}]
            }));
        })
        .await;

    let page = client(&server)
        .list_page(&scope(), ContentCollection::Locales, 100, 100)
        .await
        .unwrap();

    assert_eq!(page.total, 101);
    assert_eq!(page.items.len(), 1);
    assert!(!page.has_more());
}

#[tokio::test]
async fn upsert_creates_missing_entry_with_content_type() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{ENV}/entries/new-1"));
            then.status(404).json_body(json!({"message": "The resource could not be found."}));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(format!("{ENV}/entries/new-1"))
                .header("x-contentful-content-type", "blogPost");
            then.status(201).json_body(json!({"sys": {"id": "new-1", "version": 1}}));
        })
        .await;

    let body = json!({"fields": {"title": {"en-US": "Hello"}}});
    client(&server)
        .upsert(&scope(), ContentCollection::Entries, "new-1", &body, Some("blogPost"))
        .await
        .unwrap();

    create.assert_async().await;
}

#[tokio::test]
async fn transport_failure_is_not_a_remote_error() {
    let client =
        HttpCmsClient::with_timeout("http://127.0.0.1:9", "t", Duration::from_secs(2)).unwrap();
    let err = client.current_version(&scope(), EntityKind::Entry, "e1").await.unwrap_err();
    assert!(matches!(err, CoreError::Transport(_)));
}
