//! MCP tool implementations.
//!
//! This module contains all tools exposed by the semfw server.

pub mod cache;
pub mod search;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use rmcp::model::CallToolResult;
    use semfw_client::{EmbeddingOracle, HashingEmbedder, MockTableFetcher};
    use semfw_core::SemanticCache;

    /// Offline cache: embedding oracle over the built-in mock table.
    pub fn test_cache() -> SemanticCache {
        SemanticCache::new(
            Arc::new(EmbeddingOracle::new(HashingEmbedder::default(), 0.8)),
            Arc::new(MockTableFetcher::builtin()),
        )
    }

    pub fn content_text(result: &CallToolResult, index: usize) -> String {
        let content_val = serde_json::to_value(&result.content[index]).unwrap();
        content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content")
            .to_string()
    }
}
