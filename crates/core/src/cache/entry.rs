//! Cache data model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::fetch::FetchError;

/// One search result record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchRecord {
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
    /// Provider relevance score, when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Stored result of a lookup. Failures are stored too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultPayload {
    Success { records: Vec<SearchRecord> },
    Failure { reason: String },
}

impl ResultPayload {
    pub fn is_failure(&self) -> bool {
        matches!(self, ResultPayload::Failure { .. })
    }

    /// Records of a successful lookup; empty for failures.
    pub fn records(&self) -> &[SearchRecord] {
        match self {
            ResultPayload::Success { records } => records,
            ResultPayload::Failure { .. } => &[],
        }
    }
}

impl From<Result<Vec<SearchRecord>, FetchError>> for ResultPayload {
    fn from(result: Result<Vec<SearchRecord>, FetchError>) -> Self {
        match result {
            Ok(records) => ResultPayload::Success { records },
            Err(e) => ResultPayload::Failure { reason: e.to_string() },
        }
    }
}

/// Whether a query was answered from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Origin {
    Hit,
    Miss,
}

/// Result of [`SemanticCache::query`](super::SemanticCache::query).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueryOutcome {
    pub payload: ResultPayload,
    pub origin: Origin,
    /// Canonical key the query was answered from. Set on hits only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_key: Option<String>,
}

/// A stored cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CacheEntry {
    pub id: String,
    pub key: String,
    pub payload: ResultPayload,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_from_fetch_result() {
        let ok: ResultPayload = Ok(vec![SearchRecord {
            title: "t".into(),
            url: "https://example.com".into(),
            content: "c".into(),
            score: Some(0.5),
        }])
        .into();
        assert!(!ok.is_failure());
        assert_eq!(ok.records().len(), 1);

        let failed: ResultPayload = Err(FetchError::RateLimited).into();
        assert!(failed.is_failure());
        assert!(failed.records().is_empty());
        assert_eq!(failed, ResultPayload::Failure { reason: "rate limited: too many requests".into() });
    }

    #[test]
    fn test_payload_serialization_tags() {
        let failed = ResultPayload::Failure { reason: "boom".into() };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["reason"], "boom");

        let ok = ResultPayload::Success {
            records: vec![SearchRecord { title: "t".into(), url: String::new(), content: "c".into(), score: None }],
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json["records"][0].get("score").is_none());
    }

    #[test]
    fn test_record_defaults_on_sparse_json() {
        let record: SearchRecord = serde_json::from_str(r#"{"title": "Mock Result"}"#).unwrap();
        assert_eq!(record.url, "");
        assert_eq!(record.content, "");
        assert!(record.score.is_none());
    }

    #[test]
    fn test_origin_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Origin::Hit).unwrap(), r#""HIT""#);
        assert_eq!(serde_json::to_string(&Origin::Miss).unwrap(), r#""MISS""#);
    }
}
