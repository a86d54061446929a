//! Allow/deny filtering of exposed tools

use cms_mcp_config::ToolFilterSettings;

/// Governance configuration for the MCP server
#[derive(Debug, Clone, Default)]
pub struct GovernanceConfig {
    /// Allowed tool patterns (e.g., ["publish_*", "get_ai_action_invocation"])
    pub allow_patterns: Vec<String>,
    /// Denied tool patterns (e.g., ["*_asset", "import_space"])
    pub deny_patterns: Vec<String>,
}

impl GovernanceConfig {
    pub fn new(allow_patterns: Vec<String>, deny_patterns: Vec<String>) -> Self {
        Self { allow_patterns, deny_patterns }
    }

    /// Check if a tool is allowed by governance policies
    pub fn is_tool_allowed(&self, tool_name: &str) -> bool {
        // If allow patterns are specified, tool must match at least one
        if !self.allow_patterns.is_empty()
            && !self.allow_patterns.iter().any(|pattern| matches_pattern(tool_name, pattern))
        {
            return false;
        }

        !self.deny_patterns.iter().any(|pattern| matches_pattern(tool_name, pattern))
    }
}

impl From<&ToolFilterSettings> for GovernanceConfig {
    fn from(settings: &ToolFilterSettings) -> Self {
        Self::new(settings.allow.clone(), settings.deny.clone())
    }
}

/// Supports "*", "exact_name", "prefix*" and "*suffix"
fn matches_pattern(tool_name: &str, pattern: &str) -> bool {
    if pattern == "*" || pattern == tool_name {
        return true;
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return tool_name.starts_with(prefix);
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return tool_name.ends_with(suffix);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pattern_matching() {
        assert!(matches_pattern("publish_entry", "publish_entry"));
        assert!(!matches_pattern("publish_asset", "publish_entry"));

        assert!(matches_pattern("publish_entry", "publish_*"));
        assert!(!matches_pattern("unpublish_entry", "publish_*"));

        assert!(matches_pattern("archive_asset", "*_asset"));
        assert!(!matches_pattern("archive_entry", "*_asset"));

        assert!(matches_pattern("anything", "*"));
    }

    #[test]
    fn test_allow_patterns() {
        let config = GovernanceConfig::new(patterns(&["publish_*", "bulk_validate"]), vec![]);

        assert!(config.is_tool_allowed("publish_entry"));
        assert!(config.is_tool_allowed("bulk_validate"));
        assert!(!config.is_tool_allowed("archive_entry"));
    }

    #[test]
    fn test_allow_and_deny_combined() {
        let config = GovernanceConfig::new(patterns(&["*_entry"]), patterns(&["unarchive_*"]));

        assert!(config.is_tool_allowed("archive_entry"));
        assert!(!config.is_tool_allowed("unarchive_entry"));
        assert!(!config.is_tool_allowed("archive_asset"));
    }

    #[test]
    fn empty_config_allows_everything() {
        assert!(GovernanceConfig::default().is_tool_allowed("import_space"));
    }
}
