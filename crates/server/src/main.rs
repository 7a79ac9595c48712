//! semfw server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use semfw_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod handler;
mod setup;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let cache = Arc::new(setup::build_cache(&config)?);

    tracing::info!(
        oracle = ?config.oracle,
        live_search = config.live_search,
        "Starting semfw server on stdio transport"
    );

    let handler = handler::SemfwServer::new(cache);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
