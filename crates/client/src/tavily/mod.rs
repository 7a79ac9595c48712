//! Tavily Search API client.
//!
//! Provides a client for the Tavily Search API with rate limiting,
//! request validation, and response normalization.
//!
//! ### API
//!
//! - **Endpoint**: `POST https://api.tavily.com/search`
//! - **Authentication**: `Authorization: Bearer <key>` header.
//! - **Rate Limiting**: minimum 1s interval between requests.
//! - **Normalization**: Converts Tavily's response into `SearchRecord`s.

pub mod error;
pub mod request;
pub mod response;

pub use error::TavilyError;
pub use request::{SearchDepth, SearchRequest};
pub use response::{SearchResponse, TavilyApiResponse, TavilyResult};

use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::rate_limit::RateLimiter;

/// Default base URL for the Tavily API.
const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "semfw/0.1";

/// Minimum interval between requests.
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Tavily API client configuration.
#[derive(Debug, Clone)]
pub struct TavilyConfig {
    /// API key.
    pub api_key: String,
    /// Base URL (default: https://api.tavily.com).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: semfw/0.x).
    pub user_agent: String,
    /// Minimum interval between requests (default: 1s).
    pub min_interval: Duration,
}

impl Default for TavilyConfig {
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

/// Tavily Search API client.
#[derive(Debug, Clone)]
pub struct TavilyClient {
    http: reqwest::Client,
    config: TavilyConfig,
    rate_limiter: Arc<RateLimiter>,
}

impl TavilyClient {
    /// Create a new Tavily client with the given configuration.
    pub fn new(config: TavilyConfig) -> Result<Self, TavilyError> {
        if config.api_key.is_empty() {
            return Err(TavilyError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TavilyError::Network(Arc::new(e)))?;

        let rate_limiter = Arc::new(RateLimiter::new(config.min_interval));
        Ok(Self { http, config, rate_limiter })
    }

    /// Execute a search query.
    ///
    /// This method handles rate limiting, request validation, and response normalization.
    pub async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, TavilyError> {
        req.validate()?;

        self.rate_limiter.acquire().await;

        let start = Instant::now();
        let url = format!("{}/search", self.config.base_url);

        tracing::debug!("searching Tavily API: query={}", req.query);

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
        tracing::debug!("Tavily API response status: {}", status);

        if status == 401 || status == 403 {
            return Err(TavilyError::AuthError);
        }

        if status == 429 {
            return Err(TavilyError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(TavilyError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let api_response: TavilyApiResponse =
            serde_json::from_slice(&bytes).map_err(|e| TavilyError::Parse(e.to_string()))?;

        tracing::debug!(
            "search completed in {:?} (provider {:?}s), {} results",
            start.elapsed(),
            api_response.response_time,
            api_response.results.len()
        );

        Ok(SearchResponse::from(api_response).with_timing(start))
    }
}
