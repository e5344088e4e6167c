//! Ensemble scoring (`spec.md` §4.8).
//!
//! Grounded on `synapse-routing::scoring::effective_quality`'s shape
//! (base score, optionally adjusted once enough feedback has
//! accumulated) generalized to the spec's explicit three-term weighted
//! formula and per-`optimize_for` penalty.

use hive_core::TaskCategory;

use crate::profile::ModelProfile;

/// What the Model Selector is optimizing for (`spec.md` §4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizeFor {
    Quality,
    Speed,
    Cost,
}

/// `score = w1·skill[category] + w2·mode_adjust + w3·recent_success_rate`
/// (`spec.md` §4.8). `mode_adjust` is resolved here as the model's
/// generalist skill (mean skill across all categories): a signal for
/// broad reliability distinct from `skill[category]`'s specialization
/// term, since the spec names no concrete definition for it.
#[must_use]
pub fn score(profile: &ModelProfile, category: TaskCategory, optimize_for: OptimizeFor) -> f64 {
    let recent_success_rate = profile.recent_success_rate();
    let (w1, w2, w3) = if recent_success_rate.is_some() {
        (0.7, 0.2, 0.1)
    } else {
        (1.0, 0.0, 0.0)
    };

    let mut value =
        w1 * profile.skill(category) + w2 * profile.generalist_skill() + w3 * recent_success_rate.unwrap_or(0.0);

    match optimize_for {
        OptimizeFor::Quality => {}
        OptimizeFor::Speed => value -= profile.avg_latency_ms / 5000.0,
        OptimizeFor::Cost => value -= profile.cost_per_1k / 0.03,
    }

    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use hive_config::ModelProfileConfig;

    use super::*;

    fn profile(avg_latency_ms: f64, cost_per_1k: f64) -> ModelProfile {
        ModelProfile::from_config(&ModelProfileConfig {
            model_id: "m".to_owned(),
            provider: "p".to_owned(),
            skill: HashMap::from([("math".to_owned(), 0.8)]),
            avg_latency_ms,
            cost_per_1k,
            context_window: 8192,
            supports_tools: false,
            supports_vision: false,
        })
    }

    #[test]
    fn no_history_uses_skill_only_weights() {
        let profile = profile(1000.0, 0.0);
        let s = score(&profile, TaskCategory::Math, OptimizeFor::Quality);
        assert!((s - 0.8).abs() < 0.001);
    }

    #[test]
    fn speed_optimization_penalizes_high_latency() {
        let fast = profile(500.0, 0.0);
        let slow = profile(4000.0, 0.0);
        assert!(score(&fast, TaskCategory::Math, OptimizeFor::Speed) > score(&slow, TaskCategory::Math, OptimizeFor::Speed));
    }

    #[test]
    fn cost_optimization_penalizes_expensive_models() {
        let cheap = profile(1000.0, 0.001);
        let expensive = profile(1000.0, 0.05);
        assert!(score(&cheap, TaskCategory::Math, OptimizeFor::Cost) > score(&expensive, TaskCategory::Math, OptimizeFor::Cost));
    }

    #[test]
    fn history_shifts_weights_toward_success_rate() {
        let profile = profile(1000.0, 0.0);
        for _ in 0..10 {
            profile.record_outcome(false);
        }
        let s = score(&profile, TaskCategory::Math, OptimizeFor::Quality);
        // w1=0.7, w2=0.2, w3=0.1: 0.7*0.8 + 0.2*generalist + 0.1*0.0
        assert!(s < 0.8);
    }

    #[test]
    fn score_is_clamped_to_unit_interval() {
        let profile = profile(50_000.0, 0.0);
        let s = score(&profile, TaskCategory::Math, OptimizeFor::Speed);
        assert!((0.0..=1.0).contains(&s));
    }
}
