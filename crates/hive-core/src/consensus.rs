//! `ConsensusResult` (`spec.md` §3, §4.5).

use serde::{Deserialize, Serialize};

/// Which merge strategy the Consensus Manager used to reach a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusStrategy {
    Voting,
    WeightedMerge,
    Synthesize,
    BestOf,
    Debate,
}

/// Sub-scores that make up a consensus result's overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsensusScore {
    pub overall: f64,
    pub agreement_rate: f64,
    pub confidence_weighted: f64,
    pub quality: f64,
}

/// Output of the Consensus Manager for one round of votes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub final_answer: String,
    pub strategy_used: ConsensusStrategy,
    pub participating_models: Vec<String>,
    pub score: ConsensusScore,
    pub key_agreements: Vec<String>,
    pub key_disagreements: Vec<String>,
}
