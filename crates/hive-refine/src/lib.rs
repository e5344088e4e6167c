//! Refinement Loop Controller (`spec.md` §4.6): iteratively verifies
//! and rewrites an answer that `hive-verify` flagged, applying one of
//! six strategies per iteration until the answer converges, stagnates,
//! or the iteration budget runs out.

mod controller;
mod research;
mod select;
mod strategies;
mod types;

pub use controller::run_refinement_loop;
pub use research::{ResearchError, ResearchItem, ResearchProvider, ResearchReport};
pub use select::select_strategy;
pub use types::{FinalStatus, RefinementOutcome, RefinementStrategyKind};
