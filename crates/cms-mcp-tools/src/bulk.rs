use crate::error::{ToolError, ToolResult};
use cms_mcp_config::PollSettings;
use cms_mcp_core::{
    BulkAction, BulkActionStatus, BulkOperation, BulkPublishable, EntitiesCollection, SpaceScope,
};
use std::time::Duration;

/// Fixed delay between polls, bounded number of polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self { interval, max_attempts }
    }

    pub const fn bulk_default() -> Self {
        Self::new(Duration::from_millis(1_000), 30)
    }

    pub const fn ai_action_default() -> Self {
        Self::new(Duration::from_millis(3_000), 10)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::bulk_default()
    }
}

impl From<PollSettings> for PollPolicy {
    fn from(settings: PollSettings) -> Self {
        Self::new(settings.interval(), settings.max_attempts)
    }
}

/// Submits one bulk action and polls it to a terminal status.
pub struct BulkActionCoordinator<'a, C: BulkPublishable + ?Sized> {
    client: &'a C,
    policy: PollPolicy,
}

impl<'a, C: BulkPublishable + ?Sized> BulkActionCoordinator<'a, C> {
    pub fn new(client: &'a C, policy: PollPolicy) -> Self {
        Self { client, policy }
    }

    pub async fn execute(
        &self,
        scope: &SpaceScope,
        operation: BulkOperation,
        entities: &EntitiesCollection,
    ) -> ToolResult<BulkAction> {
        let submitted = self.client.submit_bulk_action(scope, operation, entities).await?;
        tracing::info!(
            action_id = %submitted.id,
            operation = operation.as_str(),
            count = entities.len(),
            "bulk action submitted"
        );
        tracing::debug!(action_id = %submitted.id, ids = ?entities.ids(), "bulk action entities");
        self.wait_for(scope, submitted).await
    }

    /// Poll an already submitted action. Never resubmits.
    pub async fn wait_for(&self, scope: &SpaceScope, submitted: BulkAction) -> ToolResult<BulkAction> {
        let action_id = submitted.id;
        let mut last_status = submitted.status;

        for attempt in 1..=self.policy.max_attempts {
            let action = self.client.get_bulk_action(scope, &action_id).await?;
            tracing::debug!(action_id = %action_id, attempt, status = %action.status, "bulk action polled");

            if action.status.is_terminal() {
                if action.status == BulkActionStatus::Failed {
                    tracing::warn!(action_id = %action_id, "bulk action failed");
                    return Err(ToolError::BulkFailed {
                        action_id,
                        status: action.status,
                        details: action.error,
                    });
                }
                return Ok(action);
            }
            last_status = action.status;

            if attempt < self.policy.max_attempts {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        tracing::warn!(action_id = %action_id, attempts = self.policy.max_attempts, status = %last_status, "bulk action timed out");
        Err(ToolError::BulkTimeout {
            action_id,
            attempts: self.policy.max_attempts,
            status: last_status,
        })
    }
}
