//! Client code for semfw.
//!
//! This crate provides the concrete collaborators of the semantic cache:
//! similarity oracles (LLM judge, local embeddings) and search fetchers
//! (Tavily live search, offline mock table), plus the HTTP clients they use.

pub mod fetcher;
pub mod groq;
pub mod oracle;
pub mod tavily;

mod rate_limit;

pub use fetcher::{MockTableError, MockTableFetcher, TavilyFetcher};
pub use groq::{GroqClient, GroqConfig, GroqError};
pub use oracle::{EmbeddingOracle, HashingEmbedder, LlmOracle};
pub use tavily::{SearchDepth, TavilyClient, TavilyConfig, TavilyError};
