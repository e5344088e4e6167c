//! The Verification Pipeline's local vocabulary (`spec.md` §4.7).
//! Issues themselves are `hive_core::VerificationIssue` so the
//! Refinement Loop Controller can consume them without a translation
//! layer.

use hive_core::VerificationIssue;
use serde::Serialize;

/// A category of check the pipeline can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Math,
    Code,
    Factual,
    Format,
    Logic,
}

/// `spec.md` §4.7: "{final_answer, confidence, issues[]}".
#[derive(Debug, Clone, Serialize)]
pub struct VerificationOutcome {
    pub final_answer: String,
    pub confidence: f64,
    pub issues: Vec<VerificationIssue>,
}
