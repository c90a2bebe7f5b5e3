//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::progress::{PeerProgress, forwards_info};
use crate::tools::download_sec_filing::{DownloadSecFilingParams, download_impl};

use mcp_edgar_client::FilingRetriever;
use mcp_edgar_core::AppConfig;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo, SetLevelRequestParam,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for mcp-edgar.
#[derive(Clone)]
pub struct McpEdgarServer {
    tool_router: ToolRouter<Self>,
    retriever: Arc<FilingRetriever>,
    config: Arc<AppConfig>,
    forward_progress: Arc<AtomicBool>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl McpEdgarServer {
    /// Create a new server handler around an already configured retriever.
    pub fn new(retriever: FilingRetriever, config: AppConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            retriever: Arc::new(retriever),
            config: Arc::new(config),
            forward_progress: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Download an SEC/EDGAR filing.
    ///
    /// Finds the most recent filing of the given type from the given year,
    /// stores all of its files in the output directory, and returns the path
    /// of the primary document.
    #[tool(description = "Fetches SEC / EDGAR filings. Downloads the most recent filing of a company \
        (by CIK) for the given year (2021-2025) and form type (8-K, 10-Q, 10-K, DEF 14A) into \
        output_dir_path and returns the local path of the filing's primary document.")]
    async fn download_sec_filing(
        &self, params: Parameters<DownloadSecFilingParams>, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let progress = PeerProgress::new(context.peer.clone(), "download_sec_filing", self.forward_progress.clone());
        download_impl(&self.retriever, &self.config, params.0, &progress).await
    }
}

impl ServerHandler for McpEdgarServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-edgar".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().enable_logging().build(),
            ..Default::default()
        }
    }

    async fn set_level(
        &self, request: SetLevelRequestParam, _context: RequestContext<RoleServer>,
    ) -> Result<(), rmcp::model::ErrorData> {
        tracing::debug!(level = ?request.level, "client log level changed");
        self.forward_progress
            .store(forwards_info(request.level), Ordering::Relaxed);
        Ok(())
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> McpEdgarServer {
        let config = AppConfig::default();
        let retriever = FilingRetriever::from_config(&config).unwrap();
        McpEdgarServer::new(retriever, config)
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "mcp-edgar");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.logging.is_some());
    }

    #[test]
    fn test_tool_registered() {
        let tools = server().tool_router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "download_sec_filing");
    }
}
