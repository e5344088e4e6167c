//! The Orchestrator's own vocabulary: the assembled response shape
//! returned from `Orchestrator::handle` (`spec.md` §2's flow
//! description). Unlike `hive-core`'s types, nothing else in the
//! workspace consumes `Response`, so it stays local to this facade.

use hive_cascade::CascadeReport;
use hive_core::{ConsensusResult, CorrelationId};
use hive_refine::RefinementOutcome;
use serde::Serialize;

/// Which top-level path `Orchestrator::handle` took for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestrationPath {
    /// `mode=speed`: routed through the Cascade Router alone.
    Cascade,
    /// Every other mode: Model Selector → Strategy → Consensus, with an
    /// optional Refinement Loop pass.
    Ensemble,
}

/// The final result of one orchestration request (`spec.md` §2:
/// "the final answer, together with per-call traces and confidence, is
/// returned").
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub final_answer: String,
    pub confidence: f64,
    pub correlation_id: CorrelationId,
    pub path: OrchestrationPath,
    pub models_used: Vec<String>,
    pub strategy_used: Option<String>,
    pub cascade: Option<CascadeReport>,
    pub consensus: Option<ConsensusResult>,
    pub refinement: Option<RefinementOutcome>,
    pub total_latency_ms: u64,
}
