//! The inbound request vocabulary (`spec.md` §3).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::correlation::CorrelationId;

/// Broad classification of what the caller is asking for.
///
/// Drives strategy selection (`spec.md` §4.3), cascade classification
/// (§4.4), and consensus strategy selection (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Coding,
    Math,
    Reasoning,
    Creative,
    Factual,
    Analysis,
    Summarization,
    Conversation,
    Instruction,
    Multilingual,
}

impl TaskCategory {
    /// All categories, used to seed default skill maps.
    pub const ALL: [Self; 10] = [
        Self::Coding,
        Self::Math,
        Self::Reasoning,
        Self::Creative,
        Self::Factual,
        Self::Analysis,
        Self::Summarization,
        Self::Conversation,
        Self::Instruction,
        Self::Multilingual,
    ];
}

/// Requested accuracy/effort level, 1 (fastest) to 5 (most thorough).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccuracyLevel(u8);

impl AccuracyLevel {
    /// Build a level, clamping into the valid 1..=5 range.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.clamp(1, 5))
    }

    /// The raw 1..=5 value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for AccuracyLevel {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Overall operating mode, biasing strategy/cascade/consensus choices
/// toward latency, cost, or correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Speed,
    Balanced,
    Accuracy,
    Benchmark,
}

/// A single orchestration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub query: String,
    pub task_category: TaskCategory,
    #[serde(default)]
    pub accuracy_level: AccuracyLevel,
    pub mode: Mode,
    pub available_model_ids: BTreeSet<String>,
    pub correlation_id: CorrelationId,
}

impl Request {
    /// Build a request, generating a fresh correlation id.
    pub fn new(
        query: impl Into<String>,
        task_category: TaskCategory,
        mode: Mode,
        available_model_ids: BTreeSet<String>,
    ) -> Self {
        Self {
            query: query.into(),
            task_category,
            accuracy_level: AccuracyLevel::default(),
            mode,
            available_model_ids,
            correlation_id: CorrelationId::generate(),
        }
    }

    /// Heuristic "complexity" signal shared by strategy selection and the
    /// cascade router: length over 200 chars or more than 2 question marks.
    #[must_use]
    pub fn is_complex(&self) -> bool {
        self.query.len() > 200 || self.query.matches('?').count() > 2
    }

    /// Whether the query looks like a multiple-choice question.
    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        let lower = self.query.to_lowercase();
        ["a)", "b)", "(a)", "(b)", "option a", "option b"]
            .iter()
            .any(|marker| lower.contains(marker))
    }
}
