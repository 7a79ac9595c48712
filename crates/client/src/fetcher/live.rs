//! Live search through the Tavily API.

use async_trait::async_trait;
use semfw_core::{FetchError, Fetcher, SearchRecord};

use crate::tavily::{SearchDepth, SearchRequest, TavilyClient};

/// Fetcher spending real search credits.
#[derive(Debug, Clone)]
pub struct TavilyFetcher {
    client: TavilyClient,
    search_depth: SearchDepth,
    max_results: u8,
}

impl TavilyFetcher {
    pub fn new(client: TavilyClient, search_depth: SearchDepth, max_results: u8) -> Self {
        Self { client, search_depth, max_results }
    }
}

#[async_trait]
impl Fetcher for TavilyFetcher {
    async fn fetch(&self, query: &str) -> Result<Vec<SearchRecord>, FetchError> {
        let req = SearchRequest {
            search_depth: self.search_depth,
            max_results: self.max_results,
            ..SearchRequest::new(query)
        };

        let response = self.client.search(&req).await?;
        tracing::info!(query, results = response.result_count(), elapsed_ms = response.elapsed_ms, "live search");
        Ok(response.records)
    }

    fn name(&self) -> &'static str {
        "tavily"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tavily::TavilyConfig;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(server: &MockServer) -> TavilyFetcher {
        let client = TavilyClient::new(TavilyConfig {
            api_key: "tvly-test".into(),
            base_url: server.uri(),
            min_interval: Duration::ZERO,
            ..Default::default()
        })
        .unwrap();
        TavilyFetcher::new(client, SearchDepth::Basic, 3)
    }

    #[tokio::test]
    async fn test_fetch_returns_records() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_partial_json(serde_json::json!({"search_depth": "basic", "max_results": 3})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": "q",
                "results": [
                    {"title": "One", "url": "https://one.example", "content": "first", "score": 0.7},
                    {"title": "Two", "url": "https://two.example", "content": "second"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let records = fetcher(&server).fetch("q").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].content, "first");
        assert_eq!(records[1].score, None);
    }

    #[tokio::test]
    async fn test_fetch_maps_provider_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = fetcher(&server).fetch("q").await.unwrap_err();
        assert_eq!(err, FetchError::RateLimited);
    }
}
