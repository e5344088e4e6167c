//! Format check (`spec.md` §4.7): flag answers that look too short,
//! truncated, or end mid-sentence.

use hive_core::{IssueKind, VerificationIssue};

const MIN_LENGTH: usize = 10;
const TRUNCATION_MARKERS: [&str; 3] = ["...", "etc.", "(continues)"];

/// Flag format problems in `answer`, plus this check's own confidence:
/// 0.95 if none found, 0.7 if any did.
#[must_use]
pub fn verify_format(answer: &str) -> (Vec<VerificationIssue>, f64) {
    let mut issues = Vec::new();
    let trimmed = answer.trim();

    if trimmed.len() < MIN_LENGTH {
        issues.push(VerificationIssue::new(
            IssueKind::FormatError,
            format!("answer is only {} characters", trimmed.len()),
            1,
        ));
    }

    let lower = trimmed.to_lowercase();
    if TRUNCATION_MARKERS.iter().any(|marker| lower.ends_with(marker)) {
        issues.push(VerificationIssue::new(IssueKind::FormatError, "answer appears truncated", 2));
    }

    if let Some(last) = trimmed.chars().last() {
        if !matches!(last, '.' | '!' | '?' | '"' | '\'' | ')' | '`') && !last.is_ascii_digit() {
            issues.push(VerificationIssue::new(
                IssueKind::FormatError,
                "answer does not end with terminal punctuation",
                1,
            ));
        }
    }

    let confidence = if issues.is_empty() { 0.95 } else { 0.7 };
    (issues, confidence)
}
