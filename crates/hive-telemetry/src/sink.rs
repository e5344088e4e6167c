use std::sync::Mutex;

use crate::events::{CallEvent, ConsensusEvent, IterationEvent};

/// The Telemetry Sink collaborator contract (`spec.md` §6).
pub trait TelemetrySink: Send + Sync {
    fn record_call(&self, event: CallEvent);
    fn record_iteration(&self, event: IterationEvent);
    fn record_consensus(&self, event: ConsensusEvent);
}

/// Structured-logging sink: every event becomes one `tracing` event at
/// `info` level, mirroring the teacher's console logging path (the
/// non-OTLP branch of `synapse-telemetry::init`).
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record_call(&self, event: CallEvent) {
        tracing::info!(
            correlation_id = %event.correlation_id,
            backend = %event.backend,
            native_id = %event.native_id,
            attempt = event.attempt,
            latency_ms = event.latency_ms,
            outcome = ?event.outcome,
            stage = %event.stage,
            "model call"
        );
    }

    fn record_iteration(&self, event: IterationEvent) {
        tracing::info!(
            correlation_id = %event.correlation_id,
            strategy = %event.strategy,
            iteration = event.iteration,
            score = event.score,
            "refinement iteration"
        );
    }

    fn record_consensus(&self, event: ConsensusEvent) {
        tracing::info!(
            correlation_id = %event.correlation_id,
            strategy = %event.strategy,
            participating = ?event.participating,
            score = event.score,
            "consensus reached"
        );
    }
}

/// In-memory sink for tests and offline analysis: every event is
/// retained in arrival order.
#[derive(Default)]
pub struct InMemoryTelemetrySink {
    calls: Mutex<Vec<CallEvent>>,
    iterations: Mutex<Vec<IterationEvent>>,
    consensus: Mutex<Vec<ConsensusEvent>>,
}

impl InMemoryTelemetrySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<CallEvent> {
        self.calls.lock().expect("telemetry mutex poisoned").clone()
    }

    #[must_use]
    pub fn iterations(&self) -> Vec<IterationEvent> {
        self.iterations.lock().expect("telemetry mutex poisoned").clone()
    }

    #[must_use]
    pub fn consensus_events(&self) -> Vec<ConsensusEvent> {
        self.consensus.lock().expect("telemetry mutex poisoned").clone()
    }
}

impl TelemetrySink for InMemoryTelemetrySink {
    fn record_call(&self, event: CallEvent) {
        self.calls.lock().expect("telemetry mutex poisoned").push(event);
    }

    fn record_iteration(&self, event: IterationEvent) {
        self.iterations.lock().expect("telemetry mutex poisoned").push(event);
    }

    fn record_consensus(&self, event: ConsensusEvent) {
        self.consensus.lock().expect("telemetry mutex poisoned").push(event);
    }
}
