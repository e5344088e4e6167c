//! Strategy selection (`spec.md` §4.3): when the caller does not force a
//! strategy, pick one from `(query, task_category, mode)`.

use hive_core::{Mode, Request, TaskCategory};

use crate::types::StrategyKind;

/// Evaluate the selection table top to bottom, returning the first rule
/// that matches. `mode=speed, complexity=simple` is checked first since
/// it is the table's most specific row; `category=creative or none of
/// the above` and `mode=accuracy with nothing above triggering` are both
/// catch-alls, so creative is checked (it is a concrete category) before
/// falling through to the accuracy-mode catch-all and finally the
/// unconditional `chain_of_thought` default.
#[must_use]
pub fn select_strategy(request: &Request) -> StrategyKind {
    let simple = !request.is_complex();

    if request.mode == Mode::Speed && simple {
        return StrategyKind::Direct;
    }
    if request.task_category == TaskCategory::Math {
        return StrategyKind::StepVerify;
    }
    if request.task_category == TaskCategory::Coding {
        return StrategyKind::BestOfN;
    }
    if request.task_category == TaskCategory::Reasoning {
        return StrategyKind::SelfConsistency;
    }
    if request.task_category == TaskCategory::Factual {
        return StrategyKind::Debate;
    }
    if request.is_multiple_choice() {
        return StrategyKind::SelfConsistency;
    }
    if request.is_complex() {
        return StrategyKind::TreeOfThoughts;
    }
    if request.task_category == TaskCategory::Creative {
        return StrategyKind::ChainOfThought;
    }
    if request.mode == Mode::Accuracy {
        return StrategyKind::Mixture;
    }
    StrategyKind::ChainOfThought
}
