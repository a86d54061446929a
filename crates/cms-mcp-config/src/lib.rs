pub mod env_resolver;
pub mod error;
pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use env_resolver::{EnvResolver, EnvResolverError};
pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, FileFormat};
pub use schema::{
    CmsSettings, ConfigOverrides, MigrationSettings, PollSettings, PollingSettings, ServerConfig,
    ToolFilterSettings, DEFAULT_ENVIRONMENT, DEFAULT_HOST,
};
