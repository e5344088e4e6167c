//! Factual check (`spec.md` §4.7): "If no verifier is wired, emit
//! `factuality_unknown` with confidence penalty." No fact-checking
//! backend is wired into this crate, so every flagged claim is reported
//! as unverifiable rather than accepted or rejected.

use std::sync::OnceLock;

use hive_core::{IssueKind, VerificationIssue};
use regex::Regex;

const UNKNOWN_CONFIDENCE: f64 = 0.7;

fn claim_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)[^.!?]*\b(in \d{4}|founded|born|died|discovered|according to|statistics show)\b[^.!?]*[.!?]")
            .expect("valid factual claim pattern")
    })
}

/// Flag red-flag factual claims in `answer`. Returns the issues and a
/// fixed confidence (`UNKNOWN_CONFIDENCE`) reflecting that none of them
/// could be checked.
#[must_use]
pub fn verify_factual(answer: &str) -> (Vec<VerificationIssue>, f64) {
    let issues: Vec<VerificationIssue> = claim_pattern()
        .find_iter(answer)
        .map(|m| VerificationIssue::new(IssueKind::FactualityUnknown, m.as_str().trim(), 1))
        .collect();
    (issues, UNKNOWN_CONFIDENCE)
}
