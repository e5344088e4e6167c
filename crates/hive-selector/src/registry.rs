//! `ModelRegistry`: the set of known `ModelProfile`s, built once from
//! static configuration (`spec.md` §3, §4.8).
//!
//! Grounded on `synapse-routing::registry::ModelRegistry::from_config`.

use hive_config::SelectorConfig;

use crate::profile::ModelProfile;

pub struct ModelRegistry {
    profiles: Vec<ModelProfile>,
}

impl ModelRegistry {
    #[must_use]
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self {
            profiles: config.models.iter().map(ModelProfile::from_config).collect(),
        }
    }

    #[must_use]
    pub fn profiles(&self) -> &[ModelProfile] {
        &self.profiles
    }

    #[must_use]
    pub fn find(&self, model_id: &str) -> Option<&ModelProfile> {
        self.profiles.iter().find(|p| p.model_id == model_id)
    }

    /// Record the outcome of a completed request against a model
    /// (`spec.md` §4.8: "the orchestrator calls `record_outcome`...").
    /// A no-op if `model_id` is not in the registry.
    pub fn record_outcome(&self, model_id: &str, success: bool) {
        if let Some(profile) = self.find(model_id) {
            profile.record_outcome(success);
        } else {
            tracing::warn!(model_id, "record_outcome for unknown model id");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use hive_config::ModelProfileConfig;

    use super::*;

    fn config() -> SelectorConfig {
        SelectorConfig {
            models: vec![ModelProfileConfig {
                model_id: "m1".to_owned(),
                provider: "together".to_owned(),
                skill: HashMap::new(),
                avg_latency_ms: 1000.0,
                cost_per_1k: 0.0,
                context_window: 8192,
                supports_tools: false,
                supports_vision: false,
            }],
            max_models: 3,
        }
    }

    #[test]
    fn finds_configured_model() {
        let registry = ModelRegistry::from_config(&config());
        assert!(registry.find("m1").is_some());
        assert!(registry.find("unknown").is_none());
    }

    #[test]
    fn record_outcome_updates_the_right_profile() {
        let registry = ModelRegistry::from_config(&config());
        registry.record_outcome("m1", true);
        registry.record_outcome("m1", true);
        registry.record_outcome("m1", false);
        let rate = registry.find("m1").unwrap().recent_success_rate().unwrap();
        assert!((rate - (2.0 / 3.0)).abs() < 0.001);
    }

    #[test]
    fn record_outcome_for_unknown_model_is_a_no_op() {
        let registry = ModelRegistry::from_config(&config());
        registry.record_outcome("unknown", true);
    }
}
