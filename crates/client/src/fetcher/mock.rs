//! Offline search backed by a table of canned results.
//!
//! Lookups are by exact query string. Unknown queries get a single generic
//! record instead of an error, so offline sessions always make progress.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use semfw_core::{FetchError, Fetcher, SearchRecord};

/// Canned results shipped with the crate.
const BUILTIN_TABLE: &str = include_str!("../../data/mock_search.json");

/// Errors loading a mock table file.
#[derive(Debug, thiserror::Error)]
pub enum MockTableError {
    #[error("failed to read mock table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse mock table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetcher answering from an in-memory table. Free and deterministic.
#[derive(Debug, Clone, Default)]
pub struct MockTableFetcher {
    table: HashMap<String, Vec<SearchRecord>>,
}

impl MockTableFetcher {
    /// Fetcher over the built-in table.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_TABLE).expect("built-in mock table is valid JSON")
    }

    /// Parse a table of the form `{"query": [record, ...], ...}`.
    pub fn from_json(json: &str) -> Result<Self, MockTableError> {
        Ok(Self { table: serde_json::from_str(json)? })
    }

    /// Load a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MockTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of canned queries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn fallback(query: &str) -> Vec<SearchRecord> {
        vec![SearchRecord {
            title: "Mock Result".to_string(),
            url: String::new(),
            content: format!(
                "This is a generic mock search result for '{query}' because it was not found in the pre-canned cache."
            ),
            score: None,
        }]
    }
}

#[async_trait]
impl Fetcher for MockTableFetcher {
    async fn fetch(&self, query: &str) -> Result<Vec<SearchRecord>, FetchError> {
        match self.table.get(query) {
            Some(records) => {
                tracing::debug!(query, "found query in mock table");
                Ok(records.clone())
            }
            None => {
                tracing::debug!(query, "query not in mock table, using generic result");
                Ok(Self::fallback(query))
            }
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
