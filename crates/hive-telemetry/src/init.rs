use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Guard returned by [`init`]; dropping it is a no-op, its only purpose
/// is to keep the call site from discarding the result.
pub struct TelemetryGuard(());

/// Initialize `tracing-subscriber` console logging.
///
/// Mirrors the no-exporter fallback path of the teacher's
/// `synapse_telemetry::init`: an `EnvFilter` plus a formatted fmt layer.
/// The orchestration core has no OTLP exporter of its own — `spec.md`
/// §6 treats the telemetry sink as an external collaborator reached only
/// through [`crate::TelemetrySink`] — so this is the entire logging
/// surface.
#[must_use]
pub fn init(log_filter: &str) -> TelemetryGuard {
    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();

    TelemetryGuard(())
}
