use hive_core::CorrelationId;
use serde::Serialize;

/// One dispatch attempt through the Provider Router (`spec.md` §4.1's
/// "every dispatch records ..." requirement, `spec.md` §6's
/// `record_call` contract).
#[derive(Debug, Clone, Serialize)]
pub struct CallEvent {
    pub correlation_id: CorrelationId,
    pub backend: String,
    pub native_id: String,
    pub attempt: u32,
    pub latency_ms: u64,
    pub outcome: CallOutcome,
    /// Pipeline stage this call belongs to, e.g. a strategy name.
    pub stage: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    Success,
    RateLimited,
    CircuitOpen,
    ProviderTransient,
    ProviderPermanent,
    Cancelled,
}

/// One Refinement Loop Controller iteration (`spec.md` §6's
/// `record_iteration` contract).
#[derive(Debug, Clone, Serialize)]
pub struct IterationEvent {
    pub correlation_id: CorrelationId,
    pub strategy: String,
    pub iteration: u32,
    pub score: f64,
}

/// One Consensus Manager merge (`spec.md` §6's `record_consensus`
/// contract).
#[derive(Debug, Clone, Serialize)]
pub struct ConsensusEvent {
    pub correlation_id: CorrelationId,
    pub strategy: String,
    pub participating: Vec<String>,
    pub score: f64,
}
