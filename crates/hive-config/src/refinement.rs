use serde::Deserialize;

/// Refinement Loop Controller configuration (`spec.md` §4.6, §6).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefinementConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,
    #[serde(default = "default_min_improvement")]
    pub min_improvement: f64,
    #[serde(default = "default_stagnation_tolerance")]
    pub stagnation_tolerance: u32,
    /// Ordered strategy names tried in sequence, skipping any already used.
    #[serde(default = "default_priority_strategies")]
    pub priority_strategies: Vec<String>,
    #[serde(default)]
    pub enable_web_search: bool,
    #[serde(default = "default_true")]
    pub enable_model_switch: bool,
    #[serde(default = "default_true")]
    pub enable_decompose: bool,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            convergence_threshold: default_convergence_threshold(),
            min_improvement: default_min_improvement(),
            stagnation_tolerance: default_stagnation_tolerance(),
            priority_strategies: default_priority_strategies(),
            enable_web_search: false,
            enable_model_switch: true,
            enable_decompose: true,
        }
    }
}

const fn default_max_iterations() -> u32 {
    3
}

const fn default_convergence_threshold() -> f64 {
    0.90
}

const fn default_min_improvement() -> f64 {
    0.05
}

const fn default_stagnation_tolerance() -> u32 {
    1
}

fn default_priority_strategies() -> Vec<String> {
    vec![
        "prompt_enhance".to_owned(),
        "model_switch".to_owned(),
        "direct_correct".to_owned(),
        "decompose".to_owned(),
        "chain_of_thought".to_owned(),
    ]
}

const fn default_true() -> bool {
    true
}
