//! Tavily API client error types.

use std::sync::Arc;

use semfw_core::FetchError;

/// Errors from the Tavily Search API client.
#[derive(Debug, thiserror::Error)]
pub enum TavilyError {
    /// No API key configured.
    #[error("missing API key: SEMFW_TAVILY_API_KEY not set")]
    MissingApiKey,

    /// Invalid search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid max_results parameter (must be 1-20).
    #[error("invalid max_results: must be 1-20")]
    InvalidMaxResults,

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by Tavily.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TavilyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { TavilyError::Timeout } else { TavilyError::Network(Arc::new(err)) }
    }
}

impl From<TavilyError> for FetchError {
    fn from(err: TavilyError) -> Self {
        match err {
            TavilyError::InvalidQuery(msg) => FetchError::InvalidQuery(msg),
            TavilyError::InvalidMaxResults => FetchError::InvalidQuery(err.to_string()),
            TavilyError::MissingApiKey | TavilyError::AuthError => FetchError::Auth(err.to_string()),
            TavilyError::RateLimited => FetchError::RateLimited,
            TavilyError::HttpError { status } => FetchError::Http { status },
            TavilyError::Timeout => FetchError::Timeout,
            TavilyError::Network(e) => FetchError::Unavailable(e.to_string()),
            TavilyError::Parse(msg) => FetchError::Parse(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TavilyError::MissingApiKey;
        assert!(err.to_string().contains("SEMFW_TAVILY_API_KEY"));

        let err = TavilyError::InvalidQuery("test".to_string());
        assert!(err.to_string().contains("invalid query"));
    }

    #[test]
    fn test_fetch_error_mapping() {
        assert_eq!(FetchError::from(TavilyError::RateLimited), FetchError::RateLimited);
        assert_eq!(FetchError::from(TavilyError::HttpError { status: 432 }), FetchError::Http { status: 432 });
        assert_eq!(FetchError::from(TavilyError::Timeout), FetchError::Timeout);
        assert!(matches!(FetchError::from(TavilyError::AuthError), FetchError::Auth(_)));
        assert!(matches!(FetchError::from(TavilyError::InvalidMaxResults), FetchError::InvalidQuery(_)));
    }
}
