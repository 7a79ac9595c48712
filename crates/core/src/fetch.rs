//! Fetcher capability: the expensive lookup performed on a cache miss.

use async_trait::async_trait;

use crate::cache::SearchRecord;

/// Errors from a fetcher. The engine caches these as failure payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Query rejected before any request was made.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Authentication failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Rate limited by the provider.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Provider unreachable or misconfigured.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Performs the actual lookup for a query the cache has not seen.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<Vec<SearchRecord>, FetchError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
