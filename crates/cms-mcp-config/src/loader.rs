use crate::env_resolver::EnvResolver;
use crate::error::{ConfigError, ConfigResult};
use crate::schema::ServerConfig;
use std::fs;
use std::path::Path;

/// Supported file formats for configuration
#[derive(Debug, Clone, PartialEq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// Detect file format from extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }
}

/// Loads `ServerConfig` from YAML/JSON with environment placeholders resolved
pub struct ConfigLoader {
    resolver: EnvResolver,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(EnvResolver::default())
    }
}

impl ConfigLoader {
    pub fn new(resolver: EnvResolver) -> Self {
        Self { resolver }
    }

    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<ServerConfig> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading configuration file");

        self.parse_content(&content, format)
    }

    /// Load from `path` when given, otherwise start from defaults
    pub fn load_or_default<P: AsRef<Path>>(&self, path: Option<P>) -> ConfigResult<ServerConfig> {
        match path {
            Some(path) => self.load_from_file(path),
            None => Ok(ServerConfig::default()),
        }
    }

    /// Parse configuration content directly
    pub fn parse_content(&self, content: &str, format: FileFormat) -> ConfigResult<ServerConfig> {
        let resolved = self.resolver.resolve_str(content)?;
        if resolved.trim().is_empty() {
            return Ok(ServerConfig::default());
        }

        let config = match format {
            FileFormat::Yaml => serde_yaml::from_str(&resolved)?,
            FileFormat::Json => serde_json::from_str(&resolved)?,
        };
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_detection() {
        assert_eq!(FileFormat::from_path("a.yaml").unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path("a.yml").unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path("a.json").unwrap(), FileFormat::Json);
        assert!(matches!(
            FileFormat::from_path("a.toml"),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"
        ));
        assert!(FileFormat::from_path("config").is_err());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let loader = ConfigLoader::default();
        let config = loader
            .parse_content(
                "cms:\n  access_token: abc\npolling:\n  bulk_action:\n    interval_ms: 10\n    max_attempts: 2\n",
                FileFormat::Yaml,
            )
            .unwrap();

        assert_eq!(config.cms.access_token, "abc");
        assert_eq!(config.cms.environment_id, "master");
        assert_eq!(config.polling.bulk_action.max_attempts, 2);
        assert_eq!(config.polling.ai_action.max_attempts, 10);
    }

    #[test]
    fn json_content_is_supported() {
        let loader = ConfigLoader::default();
        let config = loader
            .parse_content(
                r#"{"cms": {"space_id": "s1"}, "tools": {"deny": ["import_*"]}}"#,
                FileFormat::Json,
            )
            .unwrap();
        assert_eq!(config.cms.space_id.as_deref(), Some("s1"));
        assert_eq!(config.tools.deny, vec!["import_*".to_string()]);
    }

    #[test]
    fn empty_content_yields_defaults() {
        let config = ConfigLoader::default().parse_content("", FileFormat::Yaml).unwrap();
        assert!(config.cms.access_token.is_empty());
    }
}
