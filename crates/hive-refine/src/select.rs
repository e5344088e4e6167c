//! Refinement strategy selection (`spec.md` §4.6 step 3): "select a
//! refinement strategy from `priority_strategies` skipping ones already
//! tried."

use hive_config::RefinementConfig;

use crate::types::RefinementStrategyKind;

/// Whether `strategy` is enabled given `config`'s `enable_*` flags.
/// `PromptEnhance`, `DirectCorrect`, and `ChainOfThought` carry no gate
/// in `spec.md`'s config table, so they're always available when named.
fn is_enabled(strategy: RefinementStrategyKind, config: &RefinementConfig) -> bool {
    match strategy {
        RefinementStrategyKind::WebSearch => config.enable_web_search,
        RefinementStrategyKind::ModelSwitch => config.enable_model_switch,
        RefinementStrategyKind::Decompose => config.enable_decompose,
        RefinementStrategyKind::PromptEnhance | RefinementStrategyKind::DirectCorrect | RefinementStrategyKind::ChainOfThought => {
            true
        }
    }
}

/// First strategy in `config.priority_strategies` that hasn't already
/// been tried this loop and isn't disabled. `None` once every
/// configured strategy is exhausted.
#[must_use]
pub fn select_strategy(config: &RefinementConfig, used: &[RefinementStrategyKind]) -> Option<RefinementStrategyKind> {
    config
        .priority_strategies
        .iter()
        .filter_map(|name| RefinementStrategyKind::from_config_name(name))
        .find(|strategy| is_enabled(*strategy, config) && !used.contains(strategy))
}
