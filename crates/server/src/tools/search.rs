//! search tool implementation.
//!
//! Runs a query through the semantic cache. Reworded repeats of an earlier
//! query are answered from the cache without spending a search call.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use semfw_core::{Error, QueryOutcome, ResultPayload, SearchRecord, SemanticCache};
use serde::{Deserialize, Serialize};

/// Input parameters for search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Natural-language search query (required).
    pub query: String,

    /// Optional domain allowlist to filter returned records.
    /// Does not affect what is cached.
    #[serde(default)]
    pub domain_allowlist: Option<Vec<String>>,
}

/// Implementation of the search tool.
///
/// The first content item is the plain text an agent would read: record
/// contents joined by newlines, or `Search failed: {reason}`. The second is
/// the structured outcome as JSON.
pub async fn search_impl(cache: &SemanticCache, params: SearchParams) -> Result<CallToolResult, McpError> {
    let mut outcome = cache.query(&params.query).await?;

    if let Some(allowlist) = &params.domain_allowlist
        && let ResultPayload::Success { records } = &outcome.payload
    {
        outcome.payload = ResultPayload::Success { records: filter_by_domains(records, allowlist) };
    }

    let text = render_text(&outcome);
    let json = serde_json::to_string_pretty(&outcome)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize outcome: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(text), Content::text(json)]))
}

fn render_text(outcome: &QueryOutcome) -> String {
    match &outcome.payload {
        ResultPayload::Success { records } => records
            .iter()
            .map(|r| r.content.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        ResultPayload::Failure { reason } => format!("Search failed: {reason}"),
    }
}

/// Filter records by domain allowlist. Records without a parseable host are dropped.
fn filter_by_domains(records: &[SearchRecord], allowlist: &[String]) -> Vec<SearchRecord> {
    records
        .iter()
        .filter(|r| {
            if let Ok(url) = url::Url::parse(&r.url)
                && let Some(host) = url.host_str()
            {
                return allowlist
                    .iter()
                    .any(|domain| host == domain.as_str() || host.ends_with(&format!(".{}", domain)));
            }
            false
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{content_text, test_cache};
    use semfw_core::Origin;

    #[tokio::test]
    async fn test_empty_query() {
        let cache = test_cache();
        let result = search_impl(&cache, SearchParams { query: "  ".into(), ..Default::default() }).await;

        let err = result.unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_miss_then_reworded_hit() {
        let cache = test_cache();

        let first = search_impl(
            &cache,
            SearchParams { query: "real world EV winter range vs advertised".into(), ..Default::default() },
        )
        .await
        .unwrap();
        let text = content_text(&first, 0);
        assert!(text.starts_with("Electric vehicle range can be significantly impacted"), "unexpected text: {text}");

        let outcome: QueryOutcome = serde_json::from_str(&content_text(&first, 1)).unwrap();
        assert_eq!(outcome.origin, Origin::Miss);
        assert_eq!(outcome.matched_key, None);

        let second = search_impl(
            &cache,
            SearchParams { query: "EV winter range vs advertised real world".into(), ..Default::default() },
        )
        .await
        .unwrap();
        assert_eq!(content_text(&second, 0), text);

        let outcome: QueryOutcome = serde_json::from_str(&content_text(&second, 1)).unwrap();
        assert_eq!(outcome.origin, Origin::Hit);
        assert_eq!(outcome.matched_key.as_deref(), Some("real world EV winter range vs advertised"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_domain_allowlist_filters_output_only() {
        let cache = test_cache();
        let query = "real world EV winter range vs advertised";

        let filtered = search_impl(
            &cache,
            SearchParams { query: query.into(), domain_allowlist: Some(vec!["example.org".into()]) },
        )
        .await
        .unwrap();
        assert_eq!(content_text(&filtered, 0), "");

        let unfiltered = search_impl(&cache, SearchParams { query: query.into(), ..Default::default() })
            .await
            .unwrap();
        assert!(!content_text(&unfiltered, 0).is_empty());
    }

    #[test]
    fn test_render_failure() {
        let outcome = QueryOutcome {
            payload: ResultPayload::Failure { reason: "rate limited".into() },
            origin: Origin::Hit,
            matched_key: Some("q".into()),
        };
        assert_eq!(render_text(&outcome), "Search failed: rate limited");
    }

    #[test]
    fn test_filter_by_domains() {
        let record = |url: &str| SearchRecord { title: "t".into(), url: url.into(), content: "c".into(), score: None };
        let records = vec![
            record("https://example.com/page1"),
            record("https://other.com/page"),
            record("https://sub.example.com/page2"),
            record(""),
        ];

        let filtered = filter_by_domains(&records, &["example.com".to_string()]);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].url, "https://example.com/page1");
        assert_eq!(filtered[1].url, "https://sub.example.com/page2");
    }
}
