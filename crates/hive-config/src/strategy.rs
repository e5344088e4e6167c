use serde::Deserialize;

/// Reasoning Strategy Controller defaults (`spec.md` §4.3, §6).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyConfig {
    /// Sample count for self-consistency / best-of-N.
    #[serde(default = "default_samples")]
    pub default_samples: u32,
    /// Max approaches explored by tree-of-thoughts.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// Progressive-deepening stop threshold.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            default_samples: default_samples(),
            max_depth: default_max_depth(),
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

const fn default_samples() -> u32 {
    5
}

const fn default_max_depth() -> u32 {
    3
}

const fn default_confidence_threshold() -> f64 {
    0.85
}
