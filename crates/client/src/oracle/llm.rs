//! LLM-backed similarity oracle.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use semfw_core::{Oracle, OracleError, Verdict};
use serde_json::Value;

use crate::groq::GroqClient;

static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Oracle that delegates the equivalence judgment to a chat model.
#[derive(Debug, Clone)]
pub struct LlmOracle {
    client: GroqClient,
    model: String,
}

impl LlmOracle {
    pub fn new(client: GroqClient, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }
}

#[async_trait]
impl Oracle for LlmOracle {
    async fn judge(&self, query: &str, candidates: &[String]) -> Result<Verdict, OracleError> {
        let prompt = build_prompt(query, candidates);
        let text = self.client.complete_json(&self.model, &prompt).await?;
        tracing::debug!(model = %self.model, response = %text, "similarity verdict received");
        parse_verdict(&text)
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

/// Render the judgment prompt. Candidates are numbered from 1.
pub fn build_prompt(query: &str, candidates: &[String]) -> String {
    let numbered = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| format!("{}. {}", i + 1, candidate))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Decide whether the NEW QUERY asks the same question as any of the PREVIOUS QUERIES, \
         even if it is worded differently. Respond ONLY with JSON: \
         {{\"similar\": \"YES\" or \"NO\", \"match_index\": <number of the matching previous query> or null}}.\n\
         PREVIOUS QUERIES:\n{numbered}\n\nNEW QUERY:\n\"{query}\""
    )
}

/// Parse the model's answer into a verdict.
///
/// The answer is expected to be a JSON object; when the model wraps it in
/// prose, the outermost `{...}` block is used. `similar` other than YES is a
/// `NoMatch`. A YES without a usable `match_index` is malformed. Range checks
/// are left to [`Verdict::position`].
pub fn parse_verdict(text: &str) -> Result<Verdict, OracleError> {
    let value: Value = serde_json::from_str(text.trim())
        .ok()
        .or_else(|| {
            JSON_OBJECT
                .find(text)
                .and_then(|m| serde_json::from_str(m.as_str()).ok())
        })
        .ok_or_else(|| OracleError::MalformedVerdict(format!("response is not JSON: {text}")))?;

    let similar = match value.get("similar") {
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("yes"),
        Some(Value::Bool(b)) => *b,
        _ => false,
    };

    if !similar {
        return Ok(Verdict::NoMatch);
    }

    let index = match value.get("match_index") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    index
        .map(Verdict::Match)
        .ok_or_else(|| OracleError::MalformedVerdict(format!("similar without usable match_index: {value}")))
}
