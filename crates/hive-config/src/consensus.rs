use serde::Deserialize;

/// Consensus Manager thresholds (`spec.md` §4.5, §6).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsensusConfig {
    #[serde(default = "default_max_debate_rounds")]
    pub max_debate_rounds: u32,
    #[serde(default = "default_consensus_threshold")]
    pub consensus_threshold: f64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            max_debate_rounds: default_max_debate_rounds(),
            consensus_threshold: default_consensus_threshold(),
        }
    }
}

const fn default_max_debate_rounds() -> u32 {
    2
}

const fn default_consensus_threshold() -> f64 {
    0.75
}
