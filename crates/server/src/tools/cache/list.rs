//! cache_list tool implementation.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use semfw_core::{CacheEntry, CacheStats, Error, SemanticCache};
use serde::{Deserialize, Serialize};

/// Parameters for the cache_list tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheListParams {
    /// Return at most this many entries, oldest first.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Output from the cache_list tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheListOutput {
    pub stats: CacheStats,
    /// Entries in insertion order.
    pub entries: Vec<CacheEntry>,
}

/// Implementation of the cache_list tool.
pub async fn list_impl(cache: &SemanticCache, params: CacheListParams) -> Result<CallToolResult, McpError> {
    let mut entries = cache.entries();
    if let Some(limit) = params.limit {
        entries.truncate(limit);
    }

    let output = CacheListOutput { stats: cache.stats(), entries };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{content_text, test_cache};

    async fn list(cache: &SemanticCache, limit: Option<usize>) -> CacheListOutput {
        let result = list_impl(cache, CacheListParams { limit }).await.unwrap();
        serde_json::from_str(&content_text(&result, 0)).unwrap()
    }

    #[tokio::test]
    async fn test_list_empty() {
        let output = list(&test_cache(), None).await;
        assert!(output.entries.is_empty());
        assert_eq!(output.stats, CacheStats::default());
    }

    #[tokio::test]
    async fn test_list_insertion_order_and_limit() {
        let cache = test_cache();
        cache.query("berlin public ev charger availability peak hours").await.unwrap();
        cache.query("real world EV winter range vs advertised").await.unwrap();
        cache.query("EV winter range vs advertised real world").await.unwrap();

        let output = list(&cache, None).await;
        let keys: Vec<_> = output.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["berlin public ev charger availability peak hours", "real world EV winter range vs advertised"]
        );
        assert_eq!(output.stats.entries, 2);
        assert_eq!(output.stats.misses, 2);
        assert_eq!(output.stats.hits, 1);

        let limited = list(&cache, Some(1)).await;
        assert_eq!(limited.entries.len(), 1);
        assert_eq!(limited.entries[0].key, "berlin public ev charger availability peak hours");
        assert_eq!(limited.stats.entries, 2);
    }
}
