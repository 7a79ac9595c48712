//! Groq API client error types.

use std::sync::Arc;

use semfw_core::OracleError;

/// Errors from the Groq chat completions client.
#[derive(Debug, thiserror::Error)]
pub enum GroqError {
    /// No API key configured.
    #[error("missing API key: SEMFW_GROQ_API_KEY not set")]
    MissingApiKey,

    /// Request rejected before sending.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by Groq.
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

    /// Completion contained no message content.
    #[error("empty completion")]
    EmptyResponse,
}

impl From<reqwest::Error> for GroqError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { GroqError::Timeout } else { GroqError::Network(Arc::new(err)) }
    }
}

impl From<GroqError> for OracleError {
    fn from(err: GroqError) -> Self {
        match err {
            GroqError::Parse(_) | GroqError::EmptyResponse => OracleError::MalformedVerdict(err.to_string()),
            _ => OracleError::Unavailable(err.to_string()),
        }
    }
}
