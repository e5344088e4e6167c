//! Error taxonomy shared across every orchestration component.
//!
//! Kinds, not names: every surfaced error is one of the kinds from
//! `spec.md` §7, each with a fixed recoverability so callers can decide
//! whether to retry, fail over, or give up without inspecting a message
//! string.

use serde::Serialize;

use crate::correlation::CorrelationId;

/// The taxonomy of error kinds a component may surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller input failed a contract (bad model id, empty query).
    Validation,
    /// Backend signaled throttling; recovered locally unless failover is exhausted.
    RateLimited,
    /// Backend is temporarily quarantined by its circuit breaker.
    CircuitOpen,
    /// 5xx / connection / timeout; retried, then failed over.
    ProviderTransient,
    /// 4xx other than 429, or a malformed response; not retried.
    ProviderPermanent,
    /// Every candidate backend was exhausted.
    AllProvidersFailed,
    /// Content-policy rejection.
    Policy,
    /// A reasoning strategy's internal invariant was violated.
    Planning,
    /// The caller cancelled the in-flight request.
    Cancelled,
}

impl ErrorKind {
    /// Whether this kind is handled internally by the router/strategy layer
    /// (never escapes to the caller) or must propagate.
    #[must_use]
    pub const fn recoverable(self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::CircuitOpen | Self::ProviderTransient | Self::Cancelled
        )
    }
}

/// A surfaced error, uniform across every component.
///
/// Log messages and `details` never carry provider secrets: adapters are
/// responsible for scrubbing API keys and tokens before constructing one
/// of these.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("{kind:?}: {message}")]
pub struct HiveError {
    /// Which taxonomy kind this is.
    pub kind: ErrorKind,
    /// Developer-facing message (never shown to end users verbatim).
    pub message: String,
    /// Correlation id of the request that produced this error.
    pub correlation_id: CorrelationId,
    /// Whether the caller can retry / fail over, or must treat this as final.
    pub recoverable: bool,
    /// Structured detail (e.g. per-backend attempt causes for `all_providers_failed`).
    pub details: serde_json::Value,
}

impl HiveError {
    /// Build an error of the given kind, deriving `recoverable` from it.
    pub fn new(kind: ErrorKind, message: impl Into<String>, correlation_id: CorrelationId) -> Self {
        Self {
            kind,
            message: message.into(),
            correlation_id,
            recoverable: kind.recoverable(),
            details: serde_json::Value::Null,
        }
    }

    /// Attach structured detail (e.g. a JSON array of per-backend causes).
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// A message safe to show an end user: the taxonomy kind, not internals.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self.kind {
            ErrorKind::Validation => "the request was invalid".to_owned(),
            ErrorKind::RateLimited => "the service is temporarily busy, please retry".to_owned(),
            ErrorKind::CircuitOpen | ErrorKind::ProviderTransient | ErrorKind::AllProvidersFailed => {
                "the service is temporarily unavailable".to_owned()
            }
            ErrorKind::ProviderPermanent => "the request could not be completed".to_owned(),
            ErrorKind::Policy => "the request was rejected by content policy".to_owned(),
            ErrorKind::Planning => "an internal reasoning error occurred".to_owned(),
            ErrorKind::Cancelled => "the request was cancelled".to_owned(),
        }
    }
}
