//! Telemetry for the LLMHive orchestration core: a `TelemetrySink`
//! collaborator trait (`spec.md` §6) plus the `tracing`-backed console
//! logging setup every other crate's log lines flow through.

mod events;
mod init;
mod sink;

pub use events::{CallEvent, CallOutcome, ConsensusEvent, IterationEvent};
pub use init::{TelemetryGuard, init};
pub use sink::{InMemoryTelemetrySink, TelemetrySink, TracingTelemetrySink};
