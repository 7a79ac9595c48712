//! In-memory semantic deduplicating cache.
//!
//! Queries are matched by meaning rather than exact text: a pluggable
//! [`Oracle`](crate::Oracle) decides whether a new query repeats one that was
//! already answered, and only genuinely new questions reach the
//! [`Fetcher`](crate::Fetcher). It supports:
//!
//! - Canonical keys (first-seen wording) with insertion order
//! - Failure caching so a broken backend is not hammered
//! - Content-addressed entry ids for inspection
//! - A read-only snapshot of the full contents at any time

pub mod engine;
pub mod entry;
pub mod hash;

pub use engine::{CacheStats, SemanticCache};
pub use entry::{CacheEntry, Origin, QueryOutcome, ResultPayload, SearchRecord};
