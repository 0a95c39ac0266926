//! MCP server surface over the ForceWeaver API client.

use crate::tools;
use forceweaver_api_client::ApiClient;
use rmcp::ErrorData as McpError;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ServerHandler;
use std::sync::Arc;

/// MCP server exposing ForceWeaver health-check operations as tools.
///
/// All instances share one [`ApiClient`] (and thus one pooled HTTP session);
/// the streamable-HTTP transport creates a server per MCP session.
#[derive(Clone)]
pub struct ForceWeaverServer {
    client: Arc<ApiClient>,
}

impl ForceWeaverServer {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Execute one tool invocation.
    ///
    /// API failures are returned as error tool results (not protocol errors)
    /// so the invoking agent receives the remediation text and can relay it
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns a protocol error only for malformed invocations (unknown tool,
    /// missing/mistyped arguments).
    pub async fn handle_tool(
        &self,
        name: &str,
        args: &JsonObject,
    ) -> Result<CallToolResult, McpError> {
        let call = tools::plan_call(name, args)?;
        match self
            .client
            .dispatch(call.endpoint, call.method, call.params)
            .await
        {
            Ok(text) => Ok(CallToolResult {
                content: vec![Content::text(text)],
                structured_content: None,
                is_error: Some(false),
                meta: None,
            }),
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool call failed");
                Ok(CallToolResult {
                    content: vec![Content::text(e.to_string())],
                    structured_content: None,
                    is_error: Some(true),
                    meta: None,
                })
            }
        }
    }
}

impl ServerHandler for ForceWeaverServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "ForceWeaver MCP Client: run Salesforce Revenue Cloud health checks, bundle \
                 hierarchy analysis, org listing, and usage summaries against the ForceWeaver \
                 cloud service. Every tool requires a ForceWeaver API key from \
                 https://mcp.forceweaver.com/dashboard/keys."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: tools::catalog(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        self.handle_tool(&request.name, &args).await
    }
}
