//! MCP server for CMS tools
//!
//! Exposes the tool registry over the rmcp stdio transport, filters tools with
//! allow/deny patterns and tells the client when the visible tool set changes.

pub mod error;
pub mod governance;
pub mod mapping;
pub mod server;

// Re-export key types
pub use error::{ServerError, ServerResult};
pub use governance::GovernanceConfig;
pub use server::{build_server, serve_stdio, CmsMcpServer, SERVER_NAME};
