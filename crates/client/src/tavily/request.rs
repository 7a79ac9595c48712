//! Tavily search request types and validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tavily::TavilyError;

/// Search request parameters for the Tavily Search API.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Search query (required, max 400 chars).
    pub query: String,

    /// Retrieval depth (default advanced).
    pub search_depth: SearchDepth,

    /// Number of results (1-20, default 5).
    pub max_results: u8,
}

/// Tavily retrieval depth.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    #[default]
    Advanced,
}

impl fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDepth::Basic => f.write_str("basic"),
            SearchDepth::Advanced => f.write_str("advanced"),
        }
    }
}

impl FromStr for SearchDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(SearchDepth::Basic),
            "advanced" => Ok(SearchDepth::Advanced),
            other => Err(format!("unknown search depth: {other}")),
        }
    }
}

impl SearchRequest {
    /// Request with default depth and result count.
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), search_depth: SearchDepth::default(), max_results: 5 }
    }

    /// Validate the search request parameters.
    ///
    /// Returns an error if any parameters are out of range or malformed.
    pub fn validate(&self) -> Result<(), TavilyError> {
        if self.query.trim().is_empty() {
            return Err(TavilyError::InvalidQuery("query cannot be empty".to_string()));
        }

        let chars = self.query.chars().count();
        if chars > 400 {
            return Err(TavilyError::InvalidQuery(format!("query too long: {} chars (max 400)", chars)));
        }

        if !(1..=20).contains(&self.max_results) {
            return Err(TavilyError::InvalidMaxResults);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let req = SearchRequest::new("hidden costs of car ownership germany");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_query() {
        assert!(SearchRequest::new("").validate().is_err());
        assert!(SearchRequest::new("   ").validate().is_err());
    }

    #[test]
    fn test_query_too_long_chars() {
        let req = SearchRequest::new("a".repeat(401));
        assert!(matches!(req.validate(), Err(TavilyError::InvalidQuery(_))));

        let req = SearchRequest::new("ü".repeat(400));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_invalid_max_results() {
        for max_results in [0, 21] {
            let req = SearchRequest { max_results, ..SearchRequest::new("test") };
            assert!(matches!(req.validate(), Err(TavilyError::InvalidMaxResults)));
        }
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(SearchRequest::new("test")).unwrap();
        assert_eq!(json["query"], "test");
        assert_eq!(json["search_depth"], "advanced");
        assert_eq!(json["max_results"], 5);
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_search_depth_parse() {
        assert_eq!("basic".parse::<SearchDepth>(), Ok(SearchDepth::Basic));
        assert_eq!("advanced".parse::<SearchDepth>(), Ok(SearchDepth::Advanced));
        assert!("deep".parse::<SearchDepth>().is_err());
        assert_eq!(SearchDepth::Basic.to_string(), "basic");
    }
}
