//! Wire-shaped types for the Provider Backend Interface (`spec.md` §6).
//!
//! These are deliberately thin: the interface is consumed, not provided,
//! by this crate, so no concrete request/response payload for any real
//! backend lives here. Adapters translate to and from these shapes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Per-call generation parameters, passed through to the backend verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatParams {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// `chat_completion(model_native_id, messages[], params) → {content,
/// tokens_in, tokens_out, generation_id}` (`spec.md` §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub content: String,
    pub tokens_in: u32,
    pub tokens_out: u32,
    pub generation_id: String,
}

/// One chunk of a streamed completion; the final chunk sets `done`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeltaChunk {
    pub delta: String,
    pub done: bool,
}

/// `list_models()` entry (`spec.md` §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub context_length: u32,
    pub pricing: f64,
    pub supports_tools: bool,
    pub supports_vision: bool,
}

/// `get_generation(generation_id)` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationInfo {
    pub tokens: u32,
    pub cost: f64,
}
