//! The Refinement Loop Controller's shared vocabulary (`spec.md` §4.6).

use serde::Serialize;

/// One of the six refinement strategies named in `spec.md` §4.6's
/// `priority_strategies` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementStrategyKind {
    PromptEnhance,
    ModelSwitch,
    WebSearch,
    DirectCorrect,
    Decompose,
    ChainOfThought,
}

impl RefinementStrategyKind {
    /// Parse a `priority_strategies` config entry into its strategy kind.
    /// Unrecognized names are skipped rather than treated as an error,
    /// so a typo in config degrades gracefully instead of panicking.
    #[must_use]
    pub fn from_config_name(name: &str) -> Option<Self> {
        match name {
            "prompt_enhance" => Some(Self::PromptEnhance),
            "model_switch" => Some(Self::ModelSwitch),
            "web_search" => Some(Self::WebSearch),
            "direct_correct" => Some(Self::DirectCorrect),
            "decompose" => Some(Self::Decompose),
            "chain_of_thought" => Some(Self::ChainOfThought),
            _ => None,
        }
    }

    /// The stage label passed to telemetry / `RefinementIteration`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PromptEnhance => "prompt_enhance",
            Self::ModelSwitch => "model_switch",
            Self::WebSearch => "web_search",
            Self::DirectCorrect => "direct_correct",
            Self::Decompose => "decompose",
            Self::ChainOfThought => "chain_of_thought",
        }
    }
}

/// `spec.md` §4.6: "final_status∈{passed, no_improvement,
/// max_iterations}".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalStatus {
    Passed,
    NoImprovement,
    MaxIterations,
}

/// `spec.md` §4.6: "{final_answer, iterations[], final_status,
/// final_score, total_issues_found, issues_resolved, strategies_used[],
/// convergence_history[], transparency_notes[]}".
#[derive(Debug, Clone, Serialize)]
pub struct RefinementOutcome {
    pub final_answer: String,
    pub iterations: Vec<hive_core::RefinementIteration>,
    pub final_status: FinalStatus,
    pub final_score: f64,
    pub total_issues_found: u32,
    pub issues_resolved: u32,
    pub strategies_used: Vec<String>,
    pub convergence_history: Vec<f64>,
    pub transparency_notes: Vec<String>,
}
