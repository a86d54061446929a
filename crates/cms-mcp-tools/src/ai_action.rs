//! Invoking AI actions and waiting for their invocations.

use crate::bulk::PollPolicy;
use crate::error::{ToolError, ToolResult};
use cms_mcp_core::{AiActionInvocationRequest, AiActionInvoker, InvocationStatus, SpaceScope};
use serde::Serialize;

pub const FOLLOW_UP_GUIDANCE: &str = "The AI action produced the results above. For each item, \
take its content and apply it where it belongs, for example by writing it to the matching entry \
field, then publish the entry if the user asked for that. Do not invent content that is not in \
the results.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiActionOutput {
    pub action_id: String,
    pub invocation_id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiActionBatch {
    pub results: Vec<AiActionOutput>,
    pub guidance: &'static str,
}

pub struct AiActionInvocationPoller<'a, C: AiActionInvoker + ?Sized> {
    client: &'a C,
    policy: PollPolicy,
}

impl<'a, C: AiActionInvoker + ?Sized> AiActionInvocationPoller<'a, C> {
    pub fn new(client: &'a C, policy: PollPolicy) -> Self {
        Self { client, policy }
    }

    /// Start one invocation per request, in request order.
    pub async fn invoke_all(
        &self,
        scope: &SpaceScope,
        action_id: &str,
        requests: &[AiActionInvocationRequest],
    ) -> ToolResult<Vec<String>> {
        let mut invocation_ids = Vec::with_capacity(requests.len());
        for request in requests {
            let id = self.client.invoke_ai_action(scope, action_id, request).await?;
            tracing::info!(action_id, invocation_id = %id, "ai action invoked");
            invocation_ids.push(id);
        }
        Ok(invocation_ids)
    }

    /// Invoke every request, then wait for all invocations under one attempt budget.
    pub async fn run(
        &self,
        scope: &SpaceScope,
        action_id: &str,
        requests: &[AiActionInvocationRequest],
    ) -> ToolResult<AiActionBatch> {
        let invocation_ids = self.invoke_all(scope, action_id, requests).await?;
        let results = self.poll(scope, action_id, &invocation_ids).await?;
        Ok(AiActionBatch { results, guidance: FOLLOW_UP_GUIDANCE })
    }

    /// Only `completed` leaves the pending set; `failed` and `cancelled` wait out the budget.
    pub async fn poll(
        &self,
        scope: &SpaceScope,
        action_id: &str,
        invocation_ids: &[String],
    ) -> ToolResult<Vec<AiActionOutput>> {
        let total = invocation_ids.len();
        let mut contents: Vec<Option<String>> = vec![None; total];

        for attempt in 1..=self.policy.max_attempts {
            for (slot, invocation_id) in contents.iter_mut().zip(invocation_ids) {
                if slot.is_some() {
                    continue;
                }
                let invocation =
                    self.client.get_ai_action_invocation(scope, action_id, invocation_id).await?;
                tracing::debug!(
                    action_id,
                    invocation_id = %invocation_id,
                    attempt,
                    status = %invocation.status,
                    "invocation polled"
                );
                if invocation.status == InvocationStatus::Completed {
                    *slot = Some(invocation.content().to_string());
                }
            }

            if contents.iter().all(Option::is_some) {
                return Ok(invocation_ids
                    .iter()
                    .zip(contents)
                    .map(|(invocation_id, content)| AiActionOutput {
                        action_id: action_id.to_string(),
                        invocation_id: invocation_id.clone(),
                        content: content.unwrap_or_default(),
                    })
                    .collect());
            }

            if attempt < self.policy.max_attempts {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        let completed = contents.iter().filter(|c| c.is_some()).count();
        tracing::warn!(action_id, completed, total, "ai action polling timed out");
        Err(ToolError::PollingTimeout { completed, total, attempts: self.policy.max_attempts })
    }
}
