use thiserror::Error;

/// Rate limiting errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RateLimitError {
    /// Configuration error (zero or negative `rpm_limit`).
    #[error("rate limit configuration error: {0}")]
    Config(String),

    /// The caller set `no_wait` and the backend's window is exhausted.
    #[error("rate limit exceeded")]
    Exceeded {
        /// Seconds until the window resets and capacity is available again.
        retry_after: u64,
    },
}
