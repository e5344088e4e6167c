use std::collections::HashMap;

use serde::Deserialize;

/// Static per-model skill/cost/capability table the Model Selector seeds
/// its `ModelProfile` registry from at startup (`spec.md` §3, §4.8).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelProfileConfig {
    pub model_id: String,
    pub provider: String,
    /// Per-task-category skill scores in `[0, 1]`; categories absent from
    /// this map default to 0.5 when read through the selector.
    #[serde(default)]
    pub skill: HashMap<String, f64>,
    #[serde(default = "default_avg_latency_ms")]
    pub avg_latency_ms: f64,
    #[serde(default)]
    pub cost_per_1k: f64,
    #[serde(default)]
    pub context_window: u32,
    #[serde(default)]
    pub supports_tools: bool,
    #[serde(default)]
    pub supports_vision: bool,
}

const fn default_avg_latency_ms() -> f64 {
    1500.0
}

/// Model Selector configuration: the static profile table plus ensemble
/// sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectorConfig {
    #[serde(default)]
    pub models: Vec<ModelProfileConfig>,
    #[serde(default = "default_max_models")]
    pub max_models: u32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            max_models: default_max_models(),
        }
    }
}

const fn default_max_models() -> u32 {
    3
}
