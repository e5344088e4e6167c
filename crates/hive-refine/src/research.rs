//! The Knowledge / Fact-Check Interface (`spec.md` §6): an optional
//! collaborator the `web_search` strategy uses to fetch evidence for
//! flagged claims. The core consumes this contract; wiring a concrete
//! implementation is the caller's concern.

use async_trait::async_trait;
use thiserror::Error;

/// One claim's research result (`spec.md` §6: "items:
/// [{text, verified, evidence?, correction?}]").
#[derive(Debug, Clone)]
pub struct ResearchItem {
    pub text: String,
    pub verified: bool,
    pub evidence: Option<String>,
    pub correction: Option<String>,
}

/// `spec.md` §6: "verify(answer, claims[]?) →
/// {verification_score∈[0,1], items: [...]}".
#[derive(Debug, Clone)]
pub struct ResearchReport {
    pub verification_score: f64,
    pub items: Vec<ResearchItem>,
}

#[derive(Debug, Clone, Error)]
#[error("research provider error: {message}")]
pub struct ResearchError {
    pub message: String,
}

/// The external Research interface `web_search` depends on.
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    async fn verify(&self, answer: &str, claims: &[String]) -> Result<ResearchReport, ResearchError>;
}
