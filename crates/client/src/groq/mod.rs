//! Groq chat completions client.
//!
//! Provides a client for the OpenAI-compatible Groq chat completions API,
//! used by the LLM similarity oracle.
//!
//! ### API
//!
//! - **Endpoint**: `https://api.groq.com/openai/v1/chat/completions`
//! - **Authentication**: `Authorization: Bearer <key>` header.
//! - **Rate Limiting**: minimum interval between requests (free tier allows
//!   30 requests per minute, default 2s).
//! - **Output**: the text content of the first choice.

pub mod error;
pub mod request;
pub mod response;

pub use error::GroqError;
pub use request::{ChatMessage, ChatRequest, ResponseFormat, Role};
pub use response::{ChatResponse, Usage};

use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::rate_limit::RateLimiter;

/// Default base URL for the Groq OpenAI-compatible API.
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "semfw/0.1";

/// Minimum interval between requests (30 RPM free tier).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(2);

/// Groq client configuration.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key.
    pub api_key: String,
    /// Base URL (default: https://api.groq.com/openai/v1).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: semfw/0.x).
    pub user_agent: String,
    /// Minimum interval between requests (default: 2s).
    pub min_interval: Duration,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }
}

/// Groq chat completions client.
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    config: GroqConfig,
    rate_limiter: Arc<RateLimiter>,
}

impl GroqClient {
    /// Create a new Groq client with the given configuration.
    pub fn new(config: GroqConfig) -> Result<Self, GroqError> {
        if config.api_key.is_empty() {
            return Err(GroqError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GroqError::Network(Arc::new(e)))?;

        let rate_limiter = Arc::new(RateLimiter::new(config.min_interval));
        Ok(Self { http, config, rate_limiter })
    }

    /// Send a chat completion request.
    pub async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse, GroqError> {
        req.validate()?;

        self.rate_limiter.acquire().await;

        let start = Instant::now();
        let url = format!("{}/chat/completions", self.config.base_url);

        tracing::debug!(model = %req.model, "sending chat completion");

        let http_response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.config.user_agent)
            .json(req)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("Groq API response status: {}", status);

        if status == 401 || status == 403 {
            return Err(GroqError::AuthError);
        }

        if status == 429 {
            return Err(GroqError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(GroqError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let response: ChatResponse = serde_json::from_slice(&bytes).map_err(|e| GroqError::Parse(e.to_string()))?;

        tracing::debug!(
            "completion finished in {:?}, {} tokens",
            start.elapsed(),
            response.usage.map(|u| u.total_tokens).unwrap_or(0)
        );

        Ok(response)
    }

    /// Ask for a JSON answer to a single prompt and return the raw text.
    pub async fn complete_json(&self, model: &str, prompt: &str) -> Result<String, GroqError> {
        let response = self.chat(&ChatRequest::json_prompt(model, prompt)).await?;
        response
            .first_content()
            .map(str::to_string)
            .ok_or(GroqError::EmptyResponse)
    }
}
