use thiserror::Error;

/// Errors a Provider Backend Interface implementation surfaces
/// (`spec.md` §6: `{kind∈{rate_limited, client_error, server_error,
/// network}, retry_after?, message}`).
#[derive(Debug, Clone, Error)]
pub enum ProviderCallError {
    #[error("rate limited: {message}")]
    RateLimited { retry_after: Option<u64>, message: String },

    #[error("client error: {message}")]
    ClientError { message: String },

    #[error("server error: {message}")]
    ServerError { message: String },

    #[error("network error: {message}")]
    Network { message: String },
}

impl ProviderCallError {
    /// Whether this call is worth retrying against the same backend
    /// (`spec.md` §4.1: 5xx/connection/timeout retry, 4xx other than 429
    /// does not).
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ServerError { .. } | Self::Network { .. })
    }
}
