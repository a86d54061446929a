use crate::bulk::PollPolicy;
use crate::error::{ToolError, ToolResult};
use cms_mcp_config::ServerConfig;
use cms_mcp_core::{CmsClient, SpaceScope};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state handed to every tool handler.
#[derive(Clone)]
pub struct ToolContext {
    pub client: Arc<dyn CmsClient>,
    pub default_space_id: Option<String>,
    pub default_environment_id: String,
    pub bulk_policy: PollPolicy,
    pub ai_policy: PollPolicy,
    pub export_dir: PathBuf,
}

/// `spaceId` / `environmentId` accepted by every CMS tool.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeArgs {
    #[serde(default)]
    pub space_id: Option<String>,
    #[serde(default)]
    pub environment_id: Option<String>,
}

impl ToolContext {
    pub fn new(client: Arc<dyn CmsClient>, config: &ServerConfig) -> Self {
        Self {
            client,
            default_space_id: config.cms.space_id.clone(),
            default_environment_id: config.cms.environment_id.clone(),
            bulk_policy: config.polling.bulk_action.into(),
            ai_policy: config.polling.ai_action.into(),
            export_dir: config.migration.export_dir.clone(),
        }
    }

    /// Arguments win over configured defaults.
    pub fn scope(&self, args: &ScopeArgs) -> ToolResult<SpaceScope> {
        let space_id = args
            .space_id
            .clone()
            .or_else(|| self.default_space_id.clone())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                ToolError::InvalidArguments(
                    "spaceId is required when no default space is configured".to_string(),
                )
            })?;
        let environment_id = args
            .environment_id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.default_environment_id.clone());
        Ok(SpaceScope::new(space_id, environment_id))
    }
}
