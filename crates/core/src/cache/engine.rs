//! Semantic cache engine.
//!
//! Resolves each query to a stored payload or a fresh lookup:
//!
//! 1. Empty cache: MISS without consulting the oracle.
//! 2. Byte-identical key already stored: HIT without consulting the oracle.
//! 3. Otherwise the oracle judges the query against every key in insertion
//!    order. `Match(i)` with a valid 1-based `i` is a HIT; anything else,
//!    including oracle errors, is a MISS.
//! 4. A MISS calls the fetcher once and stores the payload under the query
//!    text, failures included.
//!
//! The whole sequence runs under one async mutex, so concurrent equivalent
//! queries fetch at most once. Inspection reads never wait on it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::entry::{CacheEntry, Origin, QueryOutcome, ResultPayload};
use super::hash::{entry_id, is_entry_id};
use crate::Error;
use crate::fetch::Fetcher;
use crate::oracle::{Oracle, OracleError};

/// Session counters for the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Judgments that degraded to a miss (unavailable or malformed).
    pub oracle_failures: u64,
    /// Misses whose fetch failed and were cached as failures.
    pub fetch_failures: u64,
}

/// Semantic deduplicating cache for one session.
pub struct SemanticCache {
    oracle: Arc<dyn Oracle>,
    fetcher: Arc<dyn Fetcher>,
    entries: RwLock<Vec<CacheEntry>>,
    flight: Mutex<()>,
    hits: AtomicU64,
    misses: AtomicU64,
    oracle_failures: AtomicU64,
    fetch_failures: AtomicU64,
}

impl std::fmt::Debug for SemanticCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticCache")
            .field("oracle", &self.oracle.name())
            .field("fetcher", &self.fetcher.name())
            .field("stats", &self.stats())
            .finish()
    }
}

impl SemanticCache {
    /// Create an empty cache wired to the given collaborators.
    pub fn new(oracle: Arc<dyn Oracle>, fetcher: Arc<dyn Fetcher>) -> Self {
        tracing::info!(oracle = oracle.name(), fetcher = fetcher.name(), "semantic cache initialized");
        Self {
            oracle,
            fetcher,
            entries: RwLock::new(Vec::new()),
            flight: Mutex::new(()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            oracle_failures: AtomicU64::new(0),
            fetch_failures: AtomicU64::new(0),
        }
    }

    /// Resolve a query to a payload, from the cache when an equivalent query
    /// was already answered.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `text` is empty or whitespace only.
    /// Oracle and fetch failures are never returned as errors.
    pub async fn query(&self, text: &str) -> Result<QueryOutcome, Error> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("query cannot be empty".into()));
        }

        let _flight = self.flight.lock().await;
        let candidates = self.keys();

        if let Some(position) = candidates.iter().position(|key| key == text)
            && let Some(outcome) = self.hit(text, position)
        {
            return Ok(outcome);
        }

        if !candidates.is_empty()
            && let Some(position) = self.judge(text, &candidates).await
            && let Some(outcome) = self.hit(text, position)
        {
            return Ok(outcome);
        }

        Ok(self.miss(text).await)
    }

    /// Ask the oracle for a 0-based candidate position, degrading every
    /// failure to `None`.
    async fn judge(&self, text: &str, candidates: &[String]) -> Option<usize> {
        let verdict = self
            .oracle
            .judge(text, candidates)
            .await
            .and_then(|verdict| verdict.position(candidates.len()));

        match verdict {
            Ok(position) => position,
            Err(e) => {
                self.oracle_failures.fetch_add(1, Ordering::Relaxed);
                match &e {
                    OracleError::Unavailable(_) => {
                        tracing::warn!(oracle = self.oracle.name(), error = %e, "similarity check failed, treating as miss")
                    }
                    OracleError::MalformedVerdict(_) => {
                        tracing::warn!(oracle = self.oracle.name(), error = %e, "ignoring malformed verdict")
                    }
                }
                None
            }
        }
    }

    fn hit(&self, text: &str, position: usize) -> Option<QueryOutcome> {
        let entries = self.read();
        let entry = entries.get(position)?;
        self.hits.fetch_add(1, Ordering::Relaxed);
        tracing::info!(query = text, matched = %entry.key, "cache hit");
        Some(QueryOutcome { payload: entry.payload.clone(), origin: Origin::Hit, matched_key: Some(entry.key.clone()) })
    }

    async fn miss(&self, text: &str) -> QueryOutcome {
        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::info!(query = text, fetcher = self.fetcher.name(), "cache miss");

        let payload = ResultPayload::from(self.fetcher.fetch(text).await);
        if let ResultPayload::Failure { reason } = &payload {
            self.fetch_failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(query = text, reason = %reason, "fetch failed, caching failure");
        }

        let entry = CacheEntry {
            id: entry_id(text),
            key: text.to_string(),
            payload: payload.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.entries.write().unwrap_or_else(PoisonError::into_inner).push(entry);

        QueryOutcome { payload, origin: Origin::Miss, matched_key: None }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Canonical keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.read().iter().map(|entry| entry.key.clone()).collect()
    }

    /// Snapshot of every entry in insertion order.
    pub fn entries(&self) -> Vec<CacheEntry> {
        self.read().clone()
    }

    /// Look up an entry by id or by exact canonical key.
    pub fn get(&self, id_or_key: &str) -> Option<CacheEntry> {
        let entries = self.read();
        let found = if is_entry_id(id_or_key) {
            entries.iter().find(|entry| entry.id == id_or_key)
        } else {
            None
        };
        found
            .or_else(|| entries.iter().find(|entry| entry.key == id_or_key))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            oracle_failures: self.oracle_failures.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
        }
    }
}
