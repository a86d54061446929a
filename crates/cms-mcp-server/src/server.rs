use crate::error::{ServerError, ServerResult};
use crate::governance::GovernanceConfig;
use crate::mapping::{arguments_value, to_mcp_call_result, to_mcp_tool};
use cms_mcp_client::HttpCmsClient;
use cms_mcp_config::ServerConfig;
use cms_mcp_tools::{build_registry, ToolContext, ToolRegistry};
use rmcp::{
    handler::server::ServerHandler,
    model as m,
    service::{serve_server, RequestContext, RoleServer},
};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

pub const SERVER_NAME: &str = "cms-mcp";

const INSTRUCTIONS: &str = "Tools for managing content in a CMS space. Publish and unpublish \
accept a single ID or a list; lists run as one bulk action. Archive and unarchive process lists \
one item at a time and stop at the first failure. Call space_to_space_migration_handler to unlock \
the export and import tools.";

pub struct CmsMcpServer {
    registry: Arc<ToolRegistry>,
    governance: GovernanceConfig,
}

impl CmsMcpServer {
    pub fn new(registry: ToolRegistry, governance: GovernanceConfig) -> Self {
        Self { registry: Arc::new(registry), governance }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Enabled tools that governance lets through
    pub fn tools(&self) -> Vec<m::Tool> {
        self.registry
            .list()
            .into_iter()
            .filter(|spec| self.governance.is_tool_allowed(&spec.name))
            .map(to_mcp_tool)
            .collect()
    }

    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<Map<String, JsonValue>>,
    ) -> ServerResult<m::CallToolResult> {
        if !self.governance.is_tool_allowed(name) {
            return Err(ServerError::PermissionDenied(name.to_string()));
        }
        let response = self.registry.call(name, arguments_value(arguments)).await?;
        Ok(to_mcp_call_result(response))
    }
}

impl ServerHandler for CmsMcpServer {
    fn get_info(&self) -> m::ServerInfo {
        m::ServerInfo {
            capabilities: m::ServerCapabilities::builder()
                .enable_tools()
                .enable_tool_list_changed()
                .build(),
            server_info: m::Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..m::Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<m::PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListToolsResult, rmcp::ErrorData>> + Send + '_ {
        async move { Ok(m::ListToolsResult { tools: self.tools(), next_cursor: None }) }
    }

    fn call_tool(
        &self,
        request: m::CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::CallToolResult, rmcp::ErrorData>> + Send + '_ {
        async move {
            let revision = self.registry.revision();
            let result = self
                .invoke(&request.name, request.arguments)
                .await
                .map_err(|e| {
                    tracing::warn!(tool = %request.name, error = %e, "tool call rejected");
                    e.to_error_data()
                })?;

            if self.registry.revision() != revision {
                tracing::info!(tool = %request.name, "tool list changed");
                if let Err(e) = context.peer.notify_tool_list_changed().await {
                    tracing::warn!(error = %e, "failed to send tools/list_changed");
                }
            }
            Ok(result)
        }
    }
}

/// Build the HTTP client and every tool from `config`.
pub fn build_server(config: &ServerConfig) -> ServerResult<CmsMcpServer> {
    let client = HttpCmsClient::new(&config.cms)?;
    let ctx = ToolContext::new(Arc::new(client), config);
    let registry = build_registry(&ctx);
    Ok(CmsMcpServer::new(registry, GovernanceConfig::from(&config.tools)))
}

/// Serve MCP over stdio until the client disconnects
pub async fn serve_stdio(config: ServerConfig) -> ServerResult<()> {
    let server = build_server(&config)?;
    tracing::info!(
        tools = server.tools().len(),
        space = config.cms.space_id.as_deref().unwrap_or("<per call>"),
        environment = %config.cms.environment_id,
        "starting MCP server on stdio"
    );
    let running = serve_server(server, (tokio::io::stdin(), tokio::io::stdout()))
        .await
        .map_err(|e| ServerError::Internal(format!("rmcp init error: {}", e)))?;
    // block until quit
    let reason = running.waiting().await;
    tracing::info!(?reason, "MCP server stopped");
    Ok(())
}
