//! Similarity oracle capability.
//!
//! An oracle decides whether a new query is semantically equivalent to one of
//! the queries already held in the cache. It answers with a 1-based index into
//! the candidate list it was given. The engine converts that index exactly
//! once, through [`Verdict::position`].

use async_trait::async_trait;

/// Errors an oracle may report. The engine recovers from both by treating the
/// judgment as [`Verdict::NoMatch`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// The judgment could not be obtained (network, auth, rate limit...).
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    /// The oracle answered, but the answer is unusable.
    #[error("malformed verdict: {0}")]
    MalformedVerdict(String),
}

/// Oracle answer for a single judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Equivalent to the candidate at this 1-based index. Signed so that
    /// whatever the oracle said can be represented and rejected.
    Match(i64),
    NoMatch,
}

impl Verdict {
    /// Convert the verdict into a 0-based position in a candidate list of
    /// length `candidates`.
    ///
    /// Returns `Ok(None)` for `NoMatch` and `MalformedVerdict` when the index
    /// falls outside `[1, candidates]`.
    pub fn position(self, candidates: usize) -> Result<Option<usize>, OracleError> {
        match self {
            Verdict::NoMatch => Ok(None),
            Verdict::Match(index) => match usize::try_from(index) {
                Ok(index) if index >= 1 && index <= candidates => Ok(Some(index - 1)),
                _ => Err(OracleError::MalformedVerdict(format!(
                    "match index {index} outside 1..={candidates}"
                ))),
            },
        }
    }
}

/// Semantic similarity judgment.
///
/// `candidates` is never empty and holds distinct strings in cache insertion
/// order. Implementations must not rely on being called for every query.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn judge(&self, query: &str, candidates: &[String]) -> Result<Verdict, OracleError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
