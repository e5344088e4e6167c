//! The Verification Pipeline's facade (`spec.md` §4.7): detect which
//! checks apply, run them, and combine their issues into one confidence
//! score and (possibly corrected) final answer.

use hive_core::VerificationIssue;

use crate::code::verify_code;
use crate::detect::needed_checks;
use crate::factual::verify_factual;
use crate::format::verify_format;
use crate::logic::verify_logic;
use crate::math::verify_math;
use crate::types::{CheckKind, VerificationOutcome};

const ISSUE_PENALTY_PER_ISSUE: f64 = 0.1;
const MAX_ISSUE_PENALTY: f64 = 0.3;
const MIN_CONFIDENCE: f64 = 0.3;

/// Run every check `needed_checks` selects for `(query, answer)`,
/// aggregate their issues, and compute a final confidence as the
/// minimum of each check's own outcome-dependent confidence (lower when
/// that specific check found something wrong), minus an issue-count
/// penalty. When the math check finds a mismatch, the returned answer
/// has the stated value corrected to the computed one.
#[must_use]
pub fn verify_answer(query: &str, answer: &str) -> VerificationOutcome {
    let checks = needed_checks(query, answer);
    let mut issues: Vec<VerificationIssue> = Vec::new();
    let mut min_per_check_confidence = f64::MAX;
    let mut final_answer = answer.to_owned();

    for check in checks {
        let check_confidence = match check {
            CheckKind::Math => {
                let (math_issues, corrected, confidence) = verify_math(answer);
                if let Some(corrected) = corrected {
                    final_answer = corrected;
                }
                issues.extend(math_issues);
                confidence
            }
            CheckKind::Code => {
                let (code_issues, confidence) = verify_code(answer);
                issues.extend(code_issues);
                confidence
            }
            CheckKind::Factual => {
                let (factual_issues, confidence) = verify_factual(answer);
                issues.extend(factual_issues);
                confidence
            }
            CheckKind::Format => {
                let (format_issues, confidence) = verify_format(answer);
                issues.extend(format_issues);
                confidence
            }
            CheckKind::Logic => {
                let (logic_issues, confidence) = verify_logic(answer);
                issues.extend(logic_issues);
                confidence
            }
        };
        min_per_check_confidence = min_per_check_confidence.min(check_confidence);
    }

    if min_per_check_confidence == f64::MAX {
        min_per_check_confidence = 1.0;
    }

    let issue_penalty = (ISSUE_PENALTY_PER_ISSUE * issues.len() as f64).min(MAX_ISSUE_PENALTY);
    let confidence = (min_per_check_confidence - issue_penalty).max(MIN_CONFIDENCE);
    tracing::debug!(issue_count = issues.len(), confidence, "verification pipeline finished");

    VerificationOutcome {
        final_answer,
        confidence,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_prose_answer_passes_with_high_confidence() {
        let outcome = verify_answer("how are you?", "I am doing well today.");
        assert!(outcome.issues.is_empty());
        assert!((outcome.confidence - 0.95).abs() < 1e-9);
        assert_eq!(outcome.final_answer, "I am doing well today.");
    }

    #[test]
    fn math_mismatch_corrects_the_answer_and_lowers_confidence() {
        let outcome = verify_answer("what is 2+2?", "the answer is 2 + 2 = 5");
        assert_eq!(outcome.issues.len(), 1);
        assert!(outcome.final_answer.contains('4'));
        assert!(outcome.confidence < 0.95);
    }

    #[test]
    fn factual_claim_caps_confidence_at_its_base() {
        let outcome = verify_answer("when was it founded?", "the company was founded in 1999.");
        assert_eq!(outcome.issues.len(), 1);
        assert!((outcome.confidence - (0.7 - 0.1)).abs() < 1e-9);
    }

    #[test]
    fn many_issues_cap_the_penalty_rather_than_compound() {
        let answer = "The company was founded in 1901. The founder was born in 1875. The co-founder died in 1950. \
            The formula was discovered in 1905. According to reports, it grew rapidly. Statistics show strong growth in 1999.";
        let outcome = verify_answer("tell me about the company", answer);
        assert!(outcome.issues.len() >= 5);
        // factual's fixed 0.7 is the minimum (format stays clean at 0.95);
        // the uncapped penalty (0.1 per issue) would be at least 0.5, but
        // MAX_ISSUE_PENALTY holds it to 0.3.
        assert!((outcome.confidence - (0.7 - MAX_ISSUE_PENALTY)).abs() < 1e-9);
    }

    #[test]
    fn a_single_math_error_caps_confidence_at_or_below_six_tenths() {
        let outcome = verify_answer("what is 2 + 3 times 4?", "2 + 3 × 4 = 20");
        assert_eq!(outcome.issues.len(), 1);
        assert!(outcome.confidence <= 0.6);
    }

    #[test]
    fn confidence_never_drops_below_the_floor() {
        assert!(verify_answer("explain", "the company was founded in 1999, it is both true and not true.").confidence >= MIN_CONFIDENCE);
    }
}
