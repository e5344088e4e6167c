//! The Cascade Router (`spec.md` §4.4): classify query complexity, start
//! from the cheapest viable tier, and escalate on low confidence.
//!
//! Grounded on `synapse-routing::strategy::cascade`'s initial/escalation
//! model split and heuristic confidence estimator, generalized from a
//! two-model (initial/escalation) shape to the spec's three ordered
//! tiers and dispatched through [`hive_provider::ProviderRouter`] instead
//! of the teacher's direct provider/model split.

mod classify;
mod confidence;
mod route;

pub use classify::{Complexity, classify, starting_tier};
pub use confidence::estimate_confidence;
pub use route::{CascadeReport, route};
