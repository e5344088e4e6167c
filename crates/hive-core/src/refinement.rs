//! `RefinementIteration` (`spec.md` §3, §4.6).

use serde::{Deserialize, Serialize};

use crate::verification::VerificationIssue;

/// Record of a single verify-rewrite-reverify cycle produced by the
/// Refinement Loop Controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementIteration {
    pub iteration_index: u32,
    pub input_answer: String,
    pub output_answer: String,
    pub verification_score: f64,
    pub issues_found: Vec<VerificationIssue>,
    pub issues_resolved: Vec<VerificationIssue>,
    pub strategy_used: String,
    pub model_used: String,
    pub duration_ms: u64,
}
