//! MCP server implementation.
//!
//! The server is an explicit value: built once at startup from a
//! [`ToolContext`] and the registered tools, then handed to a transport.
//! Both transports (stdio for desktop clients, HTTP for remote ones) share
//! [`McpServer::handle_request`].

pub mod protocol;
pub mod stdio;
pub mod transport;

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::json;

use crate::client::CrossrefClient;
use crate::formatters;
use crate::tools::{self, McpTool, ToolContext};

use protocol::{
    INVALID_PARAMS, JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, McpToolInfo, PARSE_ERROR,
};

/// MCP server for Crossref.
pub struct McpServer {
    /// Tool execution context.
    ctx: ToolContext,

    /// Registered tools.
    tools: Vec<Box<dyn McpTool>>,
}

impl McpServer {
    /// Create a new MCP server with all tools registered.
    #[must_use]
    pub fn new(client: CrossrefClient) -> Self {
        let ctx = ToolContext::new(Arc::new(client));
        Self::with_tools(ctx, tools::register_all_tools())
    }

    /// Create a server from an explicit context and tool set.
    #[must_use]
    pub fn with_tools(ctx: ToolContext, tools: Vec<Box<dyn McpTool>>) -> Self {
        Self { ctx, tools }
    }

    /// Run the server in stdio mode.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in stdio mode");
        tracing::info!("Registered {} tools", self.tools.len());

        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        stdio::serve(&self, stdin, stdout).await
    }

    /// Run the server in HTTP mode.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in HTTP mode on port {}", port);
        tracing::info!("Registered {} tools", self.tools.len());

        let router = transport::create_router(Arc::new(self));
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }

    /// Handle one raw JSON-RPC message, answering unparseable input with a
    /// parse error. `None` for notifications.
    pub async fn handle_message(&self, raw: &[u8]) -> Option<JsonRpcResponse> {
        match serde_json::from_slice::<JsonRpcRequest>(raw) {
            Ok(request) => {
                tracing::debug!(method = %request.method, "Received request");
                self.handle_request(&request).await
            }
            Err(e) => {
                tracing::debug!(error = %e, "Unparseable JSON-RPC message");
                Some(JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e)))
            }
        }
    }

    /// Handle one JSON-RPC request. `None` for notifications.
    pub async fn handle_request(&self, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        if req.is_notification() {
            tracing::debug!(method = %req.method, "Notification received");
            return None;
        }

        let id = req.id.clone();
        let response = match req.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, protocol::initialize_result(&req.params)),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, &req.params).await,
            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", req.method),
            ),
        };

        Some(response)
    }

    fn handle_tools_list(&self, id: Option<serde_json::Value>) -> JsonRpcResponse {
        let tool_list: Vec<McpToolInfo> = self
            .tools
            .iter()
            .map(|t| McpToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tool_list }))
    }

    async fn handle_tools_call(
        &self,
        id: Option<serde_json::Value>,
        params: &serde_json::Value,
    ) -> JsonRpcResponse {
        let tool_name = match params.get("name").and_then(|v| v.as_str()) {
            Some(name) => name,
            None => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing 'name' parameter");
            }
        };

        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let tool = match self.get_tool(tool_name) {
            Some(t) => t,
            None => {
                return JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Tool not found: {}", tool_name),
                );
            }
        };

        tracing::info!(tool = %tool_name, "Executing tool");

        let result = tool.execute(&self.ctx, arguments).await.and_then(|envelope| {
            tracing::info!(
                tool = %tool_name,
                status = %envelope.status(),
                works = envelope.len(),
                "Tool finished"
            );
            formatters::tool_result(&envelope)
        });

        match result {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                tracing::error!(tool = %tool_name, error = %e, "Tool execution failed");
                JsonRpcResponse::error(id, e.code(), format!("Tool error: {}", e))
            }
        }
    }

    /// Get tool by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// List all available tools.
    #[must_use]
    pub fn list_tools(&self) -> Vec<(&str, &str)> {
        self.tools.iter().map(|t| (t.name(), t.description())).collect()
    }

    /// Get tool context for execution.
    #[must_use]
    pub const fn context(&self) -> &ToolContext {
        &self.ctx
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.tools.len()).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
