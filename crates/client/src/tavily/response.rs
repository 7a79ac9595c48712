//! Tavily search response types and normalization.

use serde::Deserialize;
use std::time::Instant;

use semfw_core::SearchRecord;

/// Raw response from the Tavily Search API.
#[derive(Debug, Deserialize)]
pub struct TavilyApiResponse {
    #[serde(default)]
    pub results: Vec<TavilyResult>,
    /// Provider-side processing time in seconds.
    #[serde(default)]
    pub response_time: Option<f64>,
}

/// Individual result from Tavily.
#[derive(Debug, Deserialize)]
pub struct TavilyResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: Option<f64>,
}

impl From<TavilyResult> for SearchRecord {
    fn from(r: TavilyResult) -> Self {
        SearchRecord { title: r.title, url: r.url, content: r.content, score: r.score }
    }
}

/// Normalized search response for internal use.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub records: Vec<SearchRecord>,
    /// Client-side round trip in milliseconds.
    pub elapsed_ms: u64,
}

impl From<TavilyApiResponse> for SearchResponse {
    fn from(raw: TavilyApiResponse) -> Self {
        SearchResponse { records: raw.results.into_iter().map(SearchRecord::from).collect(), elapsed_ms: 0 }
    }
}

impl SearchResponse {
    /// Attach timing measured from `start`.
    pub fn with_timing(mut self, start: Instant) -> Self {
        self.elapsed_ms = start.elapsed().as_millis() as u64;
        self
    }

    /// Get the number of results.
    pub fn result_count(&self) -> usize {
        self.records.len()
    }
}
