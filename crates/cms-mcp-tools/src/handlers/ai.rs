use crate::ai_action::AiActionInvocationPoller;
use crate::args::{object_schema, parse};
use crate::context::{ScopeArgs, ToolContext};
use crate::error::{ToolError, ToolResult};
use crate::registry::{ToolHandler, ToolSpec};
use crate::response::{success_response, with_error_handling, TextContent, ToolResponse};
use async_trait::async_trait;
use cms_mcp_core::{AiActionInvocationRequest, SpaceScope};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvokeArgs {
    #[serde(flatten)]
    scope: ScopeArgs,
    ai_action_id: String,
    fields: Vec<AiActionInvocationRequest>,
    #[serde(default = "default_wait")]
    wait_for_completion: bool,
}

fn default_wait() -> bool {
    true
}

pub struct InvokeAiActionTool {
    ctx: ToolContext,
}

impl InvokeAiActionTool {
    pub const NAME: &'static str = "invoke_ai_action";

    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            "Invoke AI action",
            "Invoke an AI action once per entry in `fields` and wait for every invocation to \
             complete. Set waitForCompletion to false to return the invocation IDs immediately.",
            object_schema(
                json!({
                    "aiActionId": {"type": "string", "description": "ID of the AI action"},
                    "fields": {
                        "type": "array",
                        "minItems": 1,
                        "items": {
                            "type": "object",
                            "properties": {
                                "outputFormat": {
                                    "type": "string",
                                    "enum": ["Markdown", "RichText", "PlainText"],
                                    "default": "Markdown"
                                },
                                "variables": {
                                    "type": "array",
                                    "items": {
                                        "type": "object",
                                        "properties": {
                                            "id": {"type": "string"},
                                            "value": {}
                                        },
                                        "required": ["id", "value"]
                                    }
                                }
                            }
                        }
                    },
                    "waitForCompletion": {"type": "boolean", "default": true}
                }),
                &["aiActionId", "fields"],
            ),
        )
        .with_annotations(json!({"readOnlyHint": false, "openWorldHint": true}))
    }

    async fn run(&self, scope: SpaceScope, args: InvokeArgs) -> ToolResult<ToolResponse> {
        let poller = AiActionInvocationPoller::new(self.ctx.client.as_ref(), self.ctx.ai_policy);

        if !args.wait_for_completion {
            let invocation_ids = poller.invoke_all(&scope, &args.ai_action_id, &args.fields).await?;
            return Ok(success_response(
                "AI action invoked",
                Some(&json!({"actionId": args.ai_action_id, "invocationIds": invocation_ids})),
            ));
        }

        let batch = poller.run(&scope, &args.ai_action_id, &args.fields).await?;
        let mut response = success_response(
            format!("AI action completed {} invocation(s)", batch.results.len()),
            Some(&serde_json::to_value(&batch.results)?),
        );
        response.content.push(TextContent::new(batch.guidance));
        Ok(response)
    }
}

#[async_trait]
impl ToolHandler for InvokeAiActionTool {
    async fn call(&self, args: JsonValue) -> ToolResult<ToolResponse> {
        let args: InvokeArgs = parse(args)?;
        if args.fields.is_empty() {
            return Err(ToolError::InvalidArguments("`fields` must not be empty".to_string()));
        }
        let scope = self.ctx.scope(&args.scope)?;
        Ok(with_error_handling("Error invoking AI action", self.run(scope, args)).await)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetInvocationArgs {
    #[serde(flatten)]
    scope: ScopeArgs,
    ai_action_id: String,
    invocation_id: String,
}

pub struct GetAiActionInvocationTool {
    ctx: ToolContext,
}

impl GetAiActionInvocationTool {
    pub const NAME: &'static str = "get_ai_action_invocation";

    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            "Get AI action invocation",
            "Read the current status and result of one AI action invocation.",
            object_schema(
                json!({
                    "aiActionId": {"type": "string"},
                    "invocationId": {"type": "string"}
                }),
                &["aiActionId", "invocationId"],
            ),
        )
        .with_annotations(json!({"readOnlyHint": true, "openWorldHint": true}))
    }
}

#[async_trait]
impl ToolHandler for GetAiActionInvocationTool {
    async fn call(&self, args: JsonValue) -> ToolResult<ToolResponse> {
        let args: GetInvocationArgs = parse(args)?;
        let scope = self.ctx.scope(&args.scope)?;
        let client = self.ctx.client.as_ref();
        Ok(with_error_handling("Error retrieving AI action invocation", async {
            let invocation = client
                .get_ai_action_invocation(&scope, &args.ai_action_id, &args.invocation_id)
                .await?;
            Ok::<_, ToolError>(success_response(
                format!("AI action invocation is {}", invocation.status),
                Some(&serde_json::to_value(&invocation)?),
            ))
        })
        .await)
    }
}
