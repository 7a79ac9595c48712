//! cache_get tool implementation.
//!
//! Retrieves a cached entry by id or by its canonical query text.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use semfw_core::{CacheEntry, Error, SemanticCache};
use serde::{Deserialize, Serialize};

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// Entry id (SHA-256 of the key) or the exact canonical query text.
    pub id: String,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    /// The cached entry.
    pub entry: CacheEntry,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(cache: &SemanticCache, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    if params.id.trim().is_empty() {
        return Err(Error::InvalidInput("id cannot be empty".into()).into());
    }

    let entry = cache
        .get(&params.id)
        .ok_or_else(|| Error::CacheMiss(params.id.clone()))?;

    let output = CacheGetOutput { entry };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize entry: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
