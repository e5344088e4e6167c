//! Reasoning Strategy Controller (`spec.md` §4.3): selects and executes
//! one of ten reasoning strategies over the Provider Router.

mod call;
mod scoring;
mod select;
mod strategies;
mod types;

#[cfg(test)]
mod testutil;

pub use select::select_strategy;
pub use strategies::{best_of_n, chain_of_thought, debate, direct, mixture, progressive, reflection, self_consistency, step_verify, tree_of_thoughts};
pub use types::{StrategyKind, StrategyOutcome};
