//! mcp-edgar server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use mcp_edgar_client::FilingRetriever;
use mcp_edgar_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod progress;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        user_agent = %config.user_agent,
        output_root = ?config.output_root,
        selection = ?config.selection,
        "Starting mcp-edgar server on stdio transport"
    );

    let retriever = FilingRetriever::from_config(&config)?;
    let handler = handler::McpEdgarServer::new(retriever, config);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
