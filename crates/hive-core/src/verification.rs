//! `VerificationIssue` (`spec.md` §3, §4.7).

use serde::{Deserialize, Serialize};

/// The kind of defect a verification checker flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    FactualError,
    MathError,
    CodeError,
    LogicError,
    FormatError,
    FactualityUnknown,
}

/// One defect found by a verification checker, carrying enough context
/// for the Refinement Loop Controller to target a rewrite at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationIssue {
    pub kind: IssueKind,
    pub claim: String,
    pub evidence: Option<String>,
    pub correction_hint: Option<String>,
    /// 1 (minor) to 3 (severe); drives whether refinement treats this as
    /// blocking convergence.
    pub priority: u8,
}

impl VerificationIssue {
    /// Build an issue, clamping `priority` into `1..=3`.
    #[must_use]
    pub fn new(kind: IssueKind, claim: impl Into<String>, priority: u8) -> Self {
        Self {
            kind,
            claim: claim.into(),
            evidence: None,
            correction_hint: None,
            priority: priority.clamp(1, 3),
        }
    }

    /// Attach supporting evidence for the flagged claim.
    #[must_use]
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    /// Attach a hint the refinement loop can pass to the rewrite step.
    #[must_use]
    pub fn with_correction_hint(mut self, hint: impl Into<String>) -> Self {
        self.correction_hint = Some(hint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_is_clamped() {
        let issue = VerificationIssue::new(IssueKind::MathError, "2+2=5", 9);
        assert_eq!(issue.priority, 3);
        let issue = VerificationIssue::new(IssueKind::MathError, "2+2=5", 0);
        assert_eq!(issue.priority, 1);
    }
}
