//! Similarity oracle implementations.
//!
//! - [`LlmOracle`]: asks a chat model whether the new query repeats one of
//!   the candidates.
//! - [`EmbeddingOracle`]: local, deterministic cosine similarity over hashed
//!   bag-of-words embeddings. No network, no cost.

pub mod embedding;
pub mod llm;

pub use embedding::{EmbeddingOracle, HashingEmbedder, cosine_similarity};
pub use llm::{LlmOracle, build_prompt, parse_verdict};
