//! Chat completion request types and validation.

use serde::{Deserialize, Serialize};

use crate::groq::GroqError;

/// Chat completion request for the OpenAI-compatible Groq endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,

    /// Forces the model to answer with a JSON object when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// Output format constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self { kind: "json_object".into() }
    }
}

impl ChatRequest {
    /// Deterministic single-turn request that must be answered in JSON.
    pub fn json_prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage { role: Role::User, content: prompt.into() }],
            temperature: 0.0,
            response_format: Some(ResponseFormat::json_object()),
        }
    }

    /// Validate the request before sending.
    pub fn validate(&self) -> Result<(), GroqError> {
        if self.model.is_empty() {
            return Err(GroqError::InvalidRequest("model cannot be empty".to_string()));
        }

        if self.messages.is_empty() {
            return Err(GroqError::InvalidRequest("at least one message is required".to_string()));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(GroqError::InvalidRequest(format!("temperature {} outside 0-2", self.temperature)));
        }

        Ok(())
    }
}
