//! Ensemble selection (`spec.md` §4.8): greedy by score, preferring
//! provider diversity.

use std::collections::{BTreeSet, HashSet};

use hive_core::TaskCategory;

use crate::registry::ModelRegistry;
use crate::scoring::{OptimizeFor, score};

/// Select up to `max_models` model ids from `available_model_ids`,
/// highest score first, preferring a provider not yet represented in
/// the selection unless doing so would leave the ensemble short.
#[must_use]
pub fn select_ensemble(
    registry: &ModelRegistry,
    available_model_ids: &BTreeSet<String>,
    category: TaskCategory,
    optimize_for: OptimizeFor,
    max_models: u32,
) -> Vec<String> {
    let mut remaining: Vec<_> = registry
        .profiles()
        .iter()
        .filter(|profile| available_model_ids.contains(&profile.model_id))
        .map(|profile| (profile, score(profile, category, optimize_for)))
        .collect();
    remaining.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut selected = Vec::new();
    let mut used_providers = HashSet::new();

    while selected.len() < max_models as usize && !remaining.is_empty() {
        let pick_index = remaining
            .iter()
            .position(|(profile, _)| !used_providers.contains(&profile.provider))
            .unwrap_or(0);
        let (profile, _) = remaining.remove(pick_index);
        used_providers.insert(profile.provider.clone());
        selected.push(profile.model_id.clone());
    }

    selected
}

/// Select a single best model id (`spec.md` §4.8: "return either one
/// model id (best) or an ordered ensemble").
#[must_use]
pub fn select_best(
    registry: &ModelRegistry,
    available_model_ids: &BTreeSet<String>,
    category: TaskCategory,
    optimize_for: OptimizeFor,
) -> Option<String> {
    select_ensemble(registry, available_model_ids, category, optimize_for, 1).into_iter().next()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use hive_config::{ModelProfileConfig, SelectorConfig};

    use super::*;

    fn registry() -> ModelRegistry {
        ModelRegistry::from_config(&SelectorConfig {
            models: vec![
                ModelProfileConfig {
                    model_id: "a-best".to_owned(),
                    provider: "together".to_owned(),
                    skill: HashMap::from([("math".to_owned(), 0.95)]),
                    avg_latency_ms: 1000.0,
                    cost_per_1k: 0.0,
                    context_window: 8192,
                    supports_tools: false,
                    supports_vision: false,
                },
                ModelProfileConfig {
                    model_id: "b-second".to_owned(),
                    provider: "together".to_owned(),
                    skill: HashMap::from([("math".to_owned(), 0.90)]),
                    avg_latency_ms: 1000.0,
                    cost_per_1k: 0.0,
                    context_window: 8192,
                    supports_tools: false,
                    supports_vision: false,
                },
                ModelProfileConfig {
                    model_id: "c-third".to_owned(),
                    provider: "cerebras".to_owned(),
                    skill: HashMap::from([("math".to_owned(), 0.80)]),
                    avg_latency_ms: 1000.0,
                    cost_per_1k: 0.0,
                    context_window: 8192,
                    supports_tools: false,
                    supports_vision: false,
                },
            ],
            max_models: 3,
        })
    }

    #[test]
    fn best_picks_the_single_highest_scoring_model() {
        let registry = registry();
        let available = BTreeSet::from(["a-best".to_owned(), "b-second".to_owned(), "c-third".to_owned()]);
        let best = select_best(&registry, &available, TaskCategory::Math, OptimizeFor::Quality).unwrap();
        assert_eq!(best, "a-best");
    }

    #[test]
    fn ensemble_prefers_provider_diversity_over_raw_rank() {
        let registry = registry();
        let available = BTreeSet::from(["a-best".to_owned(), "b-second".to_owned(), "c-third".to_owned()]);
        let ensemble = select_ensemble(&registry, &available, TaskCategory::Math, OptimizeFor::Quality, 2);
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble[0], "a-best");
        // b-second outranks c-third but shares a-best's provider; c-third
        // is picked second to diversify providers.
        assert_eq!(ensemble[1], "c-third");
    }

    #[test]
    fn ensemble_falls_back_to_repeating_a_provider_when_out_of_diversity() {
        let registry = registry();
        let available = BTreeSet::from(["a-best".to_owned(), "b-second".to_owned()]);
        let ensemble = select_ensemble(&registry, &available, TaskCategory::Math, OptimizeFor::Quality, 2);
        assert_eq!(ensemble, vec!["a-best".to_owned(), "b-second".to_owned()]);
    }

    #[test]
    fn unavailable_models_are_excluded() {
        let registry = registry();
        let available = BTreeSet::from(["b-second".to_owned()]);
        let ensemble = select_ensemble(&registry, &available, TaskCategory::Math, OptimizeFor::Quality, 3);
        assert_eq!(ensemble, vec!["b-second".to_owned()]);
    }
}
