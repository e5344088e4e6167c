//! Logic check (`spec.md` §4.7): flag self-contradictory statements
//! using the same patterns `detect` uses to decide whether this check
//! applies at all.

use hive_core::{IssueKind, VerificationIssue};

use crate::detect::logic_patterns;

/// Flag contradiction patterns found in `answer`, plus this check's own
/// confidence: 0.85 if none matched, 0.6 if any did.
#[must_use]
pub fn verify_logic(answer: &str) -> (Vec<VerificationIssue>, f64) {
    let lower = answer.to_lowercase();
    let issues: Vec<VerificationIssue> = logic_patterns()
        .iter()
        .filter(|pattern| pattern.is_match(&lower))
        .map(|pattern| {
            VerificationIssue::new(IssueKind::LogicError, format!("contradiction pattern matched: {}", pattern.as_str()), 2)
        })
        .collect();
    let confidence = if issues.is_empty() { 0.85 } else { 0.6 };
    (issues, confidence)
}
