//! Embedding-based similarity oracle.
//!
//! Texts are embedded with feature hashing: lowercased word tokens, minus
//! stopwords, crudely singularized, each hashed with SHA-256 into a signed
//! bucket of a fixed-size vector which is then L2-normalized. The oracle
//! reports the most similar candidate at or above a cosine threshold.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use semfw_core::{Oracle, OracleError, Verdict};
use sha2::{Digest, Sha256};

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").unwrap());

const STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "by", "do", "does", "for", "from", "how", "i", "in", "is",
    "it", "me", "my", "of", "on", "or", "some", "that", "the", "to", "was", "what", "which", "who", "with",
];

/// Default embedding dimension.
const DEFAULT_DIMENSIONS: usize = 512;

/// Deterministic hashed bag-of-words embedder.
#[derive(Debug, Clone, Copy)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self { dimensions: DEFAULT_DIMENSIONS }
    }
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions: dimensions.max(1) }
    }

    /// Content tokens of `text`, lowercased and singularized.
    pub fn tokens(text: &str) -> Vec<String> {
        WORD.find_iter(&text.to_lowercase())
            .map(|m| m.as_str().to_string())
            .filter(|t| !STOPWORDS.contains(&t.as_str()))
            .map(|t| singularize(&t))
            .collect()
    }

    /// Embed `text` into a unit vector. All-stopword text yields the zero vector.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in Self::tokens(text) {
            let digest = Sha256::digest(token.as_bytes());
            let mut bucket = [0u8; 8];
            bucket.copy_from_slice(&digest[..8]);
            let index = (u64::from_le_bytes(bucket) % self.dimensions as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[index] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

fn singularize(token: &str) -> String {
    if token.len() > 4
        && let Some(stem) = token.strip_suffix("ies")
    {
        return format!("{stem}y");
    }
    if token.len() > 3 && token.ends_with('s') && !token.ends_with("ss") {
        return token[..token.len() - 1].to_string();
    }
    token.to_string()
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns 0.0 if the lengths differ or either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 { 0.0 } else { dot / (norm_a * norm_b) }
}

/// Oracle matching on embedding cosine similarity.
#[derive(Debug, Clone)]
pub struct EmbeddingOracle {
    embedder: HashingEmbedder,
    threshold: f32,
}

impl EmbeddingOracle {
    pub fn new(embedder: HashingEmbedder, threshold: f32) -> Self {
        Self { embedder, threshold: threshold.clamp(0.0, 1.0) }
    }
}

#[async_trait]
impl Oracle for EmbeddingOracle {
    async fn judge(&self, query: &str, candidates: &[String]) -> Result<Verdict, OracleError> {
        let query_vec = self.embedder.embed(query);

        let mut best: Option<(usize, f32)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            let similarity = cosine_similarity(&query_vec, &self.embedder.embed(candidate));
            if similarity >= self.threshold && best.is_none_or(|(_, s)| similarity > s) {
                best = Some((i, similarity));
            }
        }

        Ok(match best {
            Some((i, similarity)) => {
                tracing::debug!(candidate = %candidates[i], similarity, "embedding match");
                Verdict::Match(i as i64 + 1)
            }
            None => Verdict::NoMatch,
        })
    }

    fn name(&self) -> &'static str {
        "embedding"
    }
}
