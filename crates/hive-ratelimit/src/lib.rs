//! Per-backend token-bucket rate limiting (`spec.md` §4.2, §5).
//!
//! Each backend's capacity is independent: a failing or exhausted backend
//! never blocks requests routed elsewhere (`spec.md` §5 "failure
//! isolation"). `RateLimiterRegistry` owns one `RateLimitBucket` per
//! backend name behind a `DashMap`, so readers never contend with each
//! other and writers only ever contend within a single backend's bucket.

mod bucket;
mod error;

use dashmap::DashMap;

pub use bucket::RateLimitBucket;
pub use error::RateLimitError;

/// Registry of per-backend rate-limit buckets, keyed by backend name.
#[derive(Default)]
pub struct RateLimiterRegistry {
    buckets: DashMap<String, std::sync::Arc<RateLimitBucket>>,
}

impl RateLimiterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend's bucket, replacing any existing one of the
    /// same name.
    ///
    /// # Errors
    ///
    /// Returns an error if `rpm_limit` is zero.
    pub fn register(&self, backend: impl Into<String>, rpm_limit: u32) -> Result<(), RateLimitError> {
        let bucket = std::sync::Arc::new(RateLimitBucket::new(rpm_limit)?);
        self.buckets.insert(backend.into(), bucket);
        Ok(())
    }

    /// Fetch a backend's bucket, if registered.
    #[must_use]
    pub fn bucket(&self, backend: &str) -> Option<std::sync::Arc<RateLimitBucket>> {
        self.buckets.get(backend).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unregistered_backend_has_no_bucket() {
        let registry = RateLimiterRegistry::new();
        assert!(registry.bucket("primary_gateway").is_none());
    }

    #[tokio::test]
    async fn registered_backend_is_isolated_from_others() {
        let registry = RateLimiterRegistry::new();
        registry.register("a", 1).unwrap();
        registry.register("b", 1).unwrap();

        let a = registry.bucket("a").unwrap();
        let b = registry.bucket("b").unwrap();

        a.try_acquire().await.unwrap();
        assert!(a.try_acquire().await.is_err());
        // b is untouched by a's exhaustion.
        b.try_acquire().await.unwrap();
    }
}
