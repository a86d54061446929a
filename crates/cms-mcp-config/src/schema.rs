use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "https://api.contentful.com";
pub const DEFAULT_ENVIRONMENT: &str = "master";

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub cms: CmsSettings,
    pub polling: PollingSettings,
    pub tools: ToolFilterSettings,
    pub migration: MigrationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsSettings {
    pub host: String,
    pub access_token: String,
    /// Default space when a tool call does not name one
    pub space_id: Option<String>,
    pub environment_id: String,
    pub request_timeout_secs: u64,
}

impl Default for CmsSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            access_token: String::new(),
            space_id: None,
            environment_id: DEFAULT_ENVIRONMENT.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl CmsSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Fixed-interval, bounded-attempt polling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSettings {
    pub interval_ms: u64,
    pub max_attempts: u32,
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    pub bulk_action: PollSettings,
    pub ai_action: PollSettings,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            bulk_action: PollSettings { interval_ms: 1_000, max_attempts: 30 },
            ai_action: PollSettings { interval_ms: 3_000, max_attempts: 10 },
        }
    }
}

/// Tool name patterns, e.g. `publish_*` or `*_asset`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolFilterSettings {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationSettings {
    pub export_dir: PathBuf,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self { export_dir: PathBuf::from("./exports") }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub access_token: Option<String>,
    pub space_id: Option<String>,
    pub environment_id: Option<String>,
}

impl ServerConfig {
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(host) = overrides.host {
            self.cms.host = host;
        }
        if let Some(token) = overrides.access_token {
            self.cms.access_token = token;
        }
        if let Some(space_id) = overrides.space_id {
            self.cms.space_id = Some(space_id);
        }
        if let Some(environment_id) = overrides.environment_id {
            self.cms.environment_id = environment_id;
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.cms.access_token.trim().is_empty() {
            return Err(ConfigError::MissingField("cms.access_token".to_string()));
        }
        if self.cms.environment_id.trim().is_empty() {
            return Err(ConfigError::MissingField("cms.environment_id".to_string()));
        }
        let host = url::Url::parse(&self.cms.host)
            .map_err(|e| ConfigError::Validation(format!("cms.host '{}': {}", self.cms.host, e)))?;
        if !matches!(host.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "cms.host must use http or https, got '{}'",
                host.scheme()
            )));
        }
        if self.cms.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "cms.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        for (name, poll) in
            [("bulk_action", &self.polling.bulk_action), ("ai_action", &self.polling.ai_action)]
        {
            if poll.max_attempts == 0 {
                return Err(ConfigError::Validation(format!(
                    "polling.{name}.max_attempts must be greater than zero"
                )));
            }
        }
        Ok(())
    }

    /// Copy safe to print or log
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.cms.access_token.is_empty() {
            copy.cms.access_token = "***".to_string();
        }
        copy
    }
}
