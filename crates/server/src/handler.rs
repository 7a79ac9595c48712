//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::cache::{CacheGetParams, CacheListParams, get_impl, list_impl};
use crate::tools::search::{SearchParams, search_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use semfw_core::SemanticCache;

/// The main MCP server handler for semfw.
#[derive(Clone)]
pub struct SemfwServer {
    tool_router: ToolRouter<Self>,
    cache: Arc<SemanticCache>,
}

#[tool_router]
impl SemfwServer {
    /// Create a server around a session cache.
    pub fn new(cache: Arc<SemanticCache>) -> Self {
        Self { tool_router: Self::tool_router(), cache }
    }

    #[tool(
        description = "Search the web through a semantic cache. Reworded repeats of an earlier query are answered from the cache. Returns the result text and the outcome (HIT or MISS) as JSON."
    )]
    async fn search(&self, params: Parameters<SearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.cache, params.0).await
    }

    #[tool(description = "List cached entries in insertion order with hit/miss statistics.")]
    async fn cache_list(&self, params: Parameters<CacheListParams>) -> Result<CallToolResult, McpError> {
        list_impl(&self.cache, params.0).await
    }

    #[tool(description = "Get one cached entry by id or by its exact query text.")]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(&self.cache, params.0).await
    }
}

impl ServerHandler for SemfwServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "semfw".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Use `search` instead of calling a search engine directly; equivalent questions share one lookup."
                    .into(),
            ),
            ..Default::default()
        }
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
