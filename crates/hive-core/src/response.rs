//! `ModelResponse` and `Vote` (`spec.md` §3).

use serde::{Deserialize, Serialize};

use crate::correlation::CorrelationId;

/// A single model call's output, immutable after creation and bound to
/// exactly one correlation id for the lifetime of the request that
/// produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    pub model_id: String,
    pub content: String,
    pub tokens: u32,
    pub latency_ms: u64,
    pub raw_confidence: f64,
    pub tool_calls: Option<Vec<serde_json::Value>>,
    pub correlation_id: CorrelationId,
}

impl ModelResponse {
    /// Construct a response, clamping `raw_confidence` into `[0, 1]`.
    pub fn new(
        model_id: impl Into<String>,
        content: impl Into<String>,
        tokens: u32,
        latency_ms: u64,
        raw_confidence: f64,
        correlation_id: CorrelationId,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            content: content.into(),
            tokens,
            latency_ms,
            raw_confidence: raw_confidence.clamp(0.0, 1.0),
            tool_calls: None,
            correlation_id,
        }
    }
}

/// A model's stance on an answer, as consumed by the Consensus Manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub model_id: String,
    pub answer: String,
    pub confidence: f64,
    pub reasoning_trace: Option<String>,
}

impl From<&ModelResponse> for Vote {
    fn from(response: &ModelResponse) -> Self {
        Self {
            model_id: response.model_id.clone(),
            answer: response.content.clone(),
            confidence: response.raw_confidence,
            reasoning_trace: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped() {
        let id = CorrelationId::generate();
        let response = ModelResponse::new("m", "hi", 5, 10, 1.5, id);
        assert!((response.raw_confidence - 1.0).abs() < f64::EPSILON);
        let response = ModelResponse::new("m", "hi", 5, 10, -0.5, id);
        assert!((response.raw_confidence - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn vote_from_response_preserves_fields() {
        let id = CorrelationId::generate();
        let response = ModelResponse::new("m", "42", 3, 10, 0.9, id);
        let vote: Vote = (&response).into();
        assert_eq!(vote.model_id, "m");
        assert_eq!(vote.answer, "42");
        assert!((vote.confidence - 0.9).abs() < f64::EPSILON);
    }
}
