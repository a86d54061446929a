//! Environment variable substitution with whitelist and default value support

use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use thiserror::Error;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}:]+)(?::([^}]*))?\}").expect("placeholder pattern"));

/// Errors that can occur during environment variable resolution
#[derive(Debug, Error)]
pub enum EnvResolverError {
    #[error("Environment variable '{0}' not found and no default provided")]
    VarNotFound(String),
    #[error("Environment variable '{0}' is not in whitelist. Allowed prefixes: {1:?}")]
    VarNotWhitelisted(String, Vec<String>),
}

/// Resolves `${VAR}` and `${VAR:default}` placeholders in raw config text
#[derive(Debug, Clone)]
pub struct EnvResolver {
    /// Allowed prefixes for environment variables. Empty means no restrictions
    allowed_prefixes: Vec<String>,
}

impl Default for EnvResolver {
    fn default() -> Self {
        Self { allowed_prefixes: vec!["CMS_MCP_".to_string(), "CONTENTFUL_".to_string()] }
    }
}

impl EnvResolver {
    /// Create a new resolver with specified allowed prefixes
    pub fn new(allowed_prefixes: Vec<String>) -> Self {
        Self { allowed_prefixes }
    }

    /// Create a resolver with no restrictions (allow all variables)
    pub fn unrestricted() -> Self {
        Self { allowed_prefixes: vec![] }
    }

    /// Substitute every placeholder in `input`.
    ///
    /// Substitution happens on the raw text before parsing, so the file
    /// format decides how the resolved value is typed.
    pub fn resolve_str(&self, input: &str) -> Result<String, EnvResolverError> {
        if !input.contains("${") {
            return Ok(input.to_string());
        }

        let mut output = String::with_capacity(input.len());
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(input) {
            let Some(full) = caps.get(0) else { continue };
            let var_name = &caps[1];
            let default_value = caps.get(2).map(|m| m.as_str());

            self.validate_var_name(var_name)?;

            let value = match env::var(var_name) {
                Ok(value) => value,
                Err(_) => match default_value {
                    Some(default) => default.to_string(),
                    None => return Err(EnvResolverError::VarNotFound(var_name.to_string())),
                },
            };

            output.push_str(&input[last..full.start()]);
            output.push_str(&value);
            last = full.end();
        }
        output.push_str(&input[last..]);
        Ok(output)
    }

    /// Validate that all placeholders in `input` are allowed, without resolving them
    pub fn validate_all_vars(&self, input: &str) -> Result<(), EnvResolverError> {
        for caps in PLACEHOLDER.captures_iter(input) {
            self.validate_var_name(&caps[1])?;
        }
        Ok(())
    }

    fn validate_var_name(&self, var_name: &str) -> Result<(), EnvResolverError> {
        if self.allowed_prefixes.is_empty()
            || self.allowed_prefixes.iter().any(|prefix| var_name.starts_with(prefix))
        {
            return Ok(());
        }

        Err(EnvResolverError::VarNotWhitelisted(
            var_name.to_string(),
            self.allowed_prefixes.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_basic_variable_resolution() {
        env::set_var("CMS_MCP_TEST_RESOLVE_TOKEN", "secret-token");

        let resolver = EnvResolver::default();
        let result = resolver.resolve_str("access_token: ${CMS_MCP_TEST_RESOLVE_TOKEN}").unwrap();

        assert_eq!(result, "access_token: secret-token");

        env::remove_var("CMS_MCP_TEST_RESOLVE_TOKEN");
    }

    #[test]
    fn test_default_value() {
        env::remove_var("CMS_MCP_NONEXISTENT");

        let resolver = EnvResolver::default();
        let result = resolver.resolve_str("environment_id: ${CMS_MCP_NONEXISTENT:master}").unwrap();

        assert_eq!(result, "environment_id: master");
    }

    #[test]
    fn test_missing_variable_error() {
        env::remove_var("CMS_MCP_MISSING");

        let resolver = EnvResolver::default();
        let result = resolver.resolve_str("${CMS_MCP_MISSING}");

        assert!(matches!(result, Err(EnvResolverError::VarNotFound(_))));
    }

    #[test]
    fn test_whitelist_validation() {
        let resolver = EnvResolver::new(vec!["ALLOWED_".to_string()]);
        let result = resolver.resolve_str("${FORBIDDEN_VAR:x}");

        assert!(matches!(result, Err(EnvResolverError::VarNotWhitelisted(_, _))));
    }

    #[test]
    fn test_multiple_placeholders_in_one_line() {
        env::set_var("CMS_MCP_TEST_SCHEME", "https");
        env::set_var("CMS_MCP_TEST_DOMAIN", "api.example.com");

        let resolver = EnvResolver::default();
        let result = resolver
            .resolve_str("host: ${CMS_MCP_TEST_SCHEME}://${CMS_MCP_TEST_DOMAIN}/${CMS_MCP_TEST_PATH:v1}")
            .unwrap();

        assert_eq!(result, "host: https://api.example.com/v1");

        env::remove_var("CMS_MCP_TEST_SCHEME");
        env::remove_var("CMS_MCP_TEST_DOMAIN");
    }

    #[test]
    fn test_text_without_placeholders_is_untouched() {
        let resolver = EnvResolver::default();
        assert_eq!(resolver.resolve_str("plain: value").unwrap(), "plain: value");
    }

    #[test]
    fn test_validation_without_resolution() {
        let resolver = EnvResolver::new(vec!["ALLOWED_".to_string()]);

        assert!(resolver.validate_all_vars("${ALLOWED_VAR1} ${ALLOWED_VAR2:default}").is_ok());
        assert!(resolver.validate_all_vars("${FORBIDDEN_VAR}").is_err());
    }
}
