//! Per-request correlation identifiers.
//!
//! Generated once at request entry and threaded explicitly through every
//! call, trace, and telemetry event instead of relying on implicit
//! thread-local or task-local context.

use std::fmt;

/// An 8-hex-char identifier that ties every `ModelResponse`, trace, and
/// telemetry event back to the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CorrelationId([u8; 4]);

impl CorrelationId {
    /// Generate a fresh, randomly-chosen correlation id.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 4];
        rand::Rng::fill(&mut rand::rng(), &mut bytes);
        Self(bytes)
    }

    /// Parse an existing 8-hex-char id (e.g. one propagated from a caller).
    pub fn parse(hex_str: &str) -> Option<Self> {
        if hex_str.len() != 8 {
            return None;
        }
        let mut bytes = [0u8; 4];
        hex::decode_to_slice(hex_str, &mut bytes).ok()?;
        Some(Self(bytes))
    }

    /// Render as the canonical 8-hex-char string.
    #[must_use]
    pub fn as_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::generate()
    }
}
