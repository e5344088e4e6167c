//! `ModelProfile` (`spec.md` §3, §4.8).
//!
//! Grounded on `synapse-routing::registry::ModelProfile` for the static
//! profile shape (`from_config`, cost/quality/capability fields), and
//! on `synapse-routing::feedback::FeedbackTracker`'s sliding-window
//! drop-oldest pattern for the rolling outcome history the spec requires
//! directly on the profile (bounded to the last 100 outcomes), rather
//! than in a separate tracker keyed by provider/model string.

use std::collections::HashMap;
use std::sync::Mutex;

use hive_config::ModelProfileConfig;
use hive_core::TaskCategory;

/// Rolling history is capped at this many outcomes (`spec.md` §3).
const HISTORY_CAP: usize = 100;

/// Render a task category the same way `hive-config`'s skill map keys
/// are written (snake_case, matching `TaskCategory`'s serde rename).
#[must_use]
pub fn category_key(category: TaskCategory) -> String {
    match serde_json::to_value(category) {
        Ok(serde_json::Value::String(key)) => key,
        _ => unreachable!("TaskCategory always serializes to a string"),
    }
}

/// A stable per-model record: static skill/cost/capability fields plus a
/// rolling success history mutated only by `record_outcome`
/// (`spec.md` §3's `ModelProfile`).
#[derive(Debug)]
pub struct ModelProfile {
    pub model_id: String,
    pub provider: String,
    skill: HashMap<String, f64>,
    pub avg_latency_ms: f64,
    pub cost_per_1k: f64,
    pub context_window: u32,
    pub supports_tools: bool,
    pub supports_vision: bool,
    history: Mutex<Vec<bool>>,
}

impl ModelProfile {
    #[must_use]
    pub fn from_config(config: &ModelProfileConfig) -> Self {
        Self {
            model_id: config.model_id.clone(),
            provider: config.provider.clone(),
            skill: config.skill.clone(),
            avg_latency_ms: config.avg_latency_ms,
            cost_per_1k: config.cost_per_1k,
            context_window: config.context_window,
            supports_tools: config.supports_tools,
            supports_vision: config.supports_vision,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Skill for a category, clamped to `[0, 1]`; categories absent from
    /// the static table default to 0.5 (`spec.md` §3 invariant).
    #[must_use]
    pub fn skill(&self, category: TaskCategory) -> f64 {
        self.skill.get(&category_key(category)).map_or(0.5, |value| value.clamp(0.0, 1.0))
    }

    /// Mean skill across every category: a generalist-competence signal
    /// independent of any single requested category.
    #[must_use]
    pub fn generalist_skill(&self) -> f64 {
        let total: f64 = TaskCategory::ALL.iter().map(|&category| self.skill(category)).sum();
        total / TaskCategory::ALL.len() as f64
    }

    /// Append an outcome, evicting the oldest entry once the history
    /// exceeds `HISTORY_CAP` (`spec.md` §4.8 `record_outcome`).
    pub fn record_outcome(&self, success: bool) {
        let mut history = self.history.lock().expect("profile history mutex poisoned");
        if history.len() >= HISTORY_CAP {
            history.remove(0);
        }
        history.push(success);
    }

    /// Fraction of recorded outcomes that succeeded; `None` until at
    /// least one outcome has been recorded (no telemetry yet).
    #[must_use]
    pub fn recent_success_rate(&self) -> Option<f64> {
        let history = self.history.lock().expect("profile history mutex poisoned");
        if history.is_empty() {
            return None;
        }
        let successes = history.iter().filter(|&&ok| ok).count();
        Some(successes as f64 / history.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ModelProfileConfig {
        ModelProfileConfig {
            model_id: "m1".to_owned(),
            provider: "together".to_owned(),
            skill: HashMap::from([("math".to_owned(), 0.9)]),
            avg_latency_ms: 1200.0,
            cost_per_1k: 0.01,
            context_window: 32_000,
            supports_tools: false,
            supports_vision: false,
        }
    }

    #[test]
    fn unknown_category_defaults_to_half() {
        let profile = ModelProfile::from_config(&test_config());
        assert!((profile.skill(TaskCategory::Creative) - 0.5).abs() < f64::EPSILON);
        assert!((profile.skill(TaskCategory::Math) - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn history_caps_at_one_hundred() {
        let profile = ModelProfile::from_config(&test_config());
        for _ in 0..150 {
            profile.record_outcome(true);
        }
        for _ in 0..10 {
            profile.record_outcome(false);
        }
        // Only the most recent 100 entries survive: 90 true + 10 false.
        let rate = profile.recent_success_rate().unwrap();
        assert!((rate - 0.9).abs() < 0.001);
    }

    #[test]
    fn no_outcomes_returns_none() {
        let profile = ModelProfile::from_config(&test_config());
        assert!(profile.recent_success_rate().is_none());
    }
}
