//! The Orchestrator (`spec.md` §2): the single entry point that wires
//! every other `hive-*` crate together and answers requests end to
//! end.

mod dispatch;
mod orchestrator;
mod types;

pub use orchestrator::Orchestrator;
pub use types::{OrchestrationPath, Response};
