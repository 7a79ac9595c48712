//! Core types and shared functionality for semfw.
//!
//! This crate provides:
//! - The semantic deduplicating cache engine
//! - Oracle and fetcher capability traits
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod oracle;

pub use cache::{CacheEntry, CacheStats, Origin, QueryOutcome, ResultPayload, SearchRecord, SemanticCache};
pub use config::{AppConfig, ConfigError, OracleKind};
pub use error::Error;
pub use fetch::{FetchError, Fetcher};
pub use oracle::{Oracle, OracleError, Verdict};
