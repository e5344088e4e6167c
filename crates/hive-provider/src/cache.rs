//! Discovery response cache (`spec.md` §4.1): GET-style provider
//! discovery responses (model lists) are cached by key with a
//! configurable TTL; inference calls are never cached.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::types::ModelInfo;

struct Entry {
    models: Vec<ModelInfo>,
    cached_at: Instant,
}

pub struct DiscoveryCache {
    ttl: Duration,
    entries: DashMap<String, Entry>,
}

impl DiscoveryCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// Fetch a cached entry if present and not yet expired.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<ModelInfo>> {
        let entry = self.entries.get(key)?;
        if entry.cached_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.models.clone())
    }

    pub fn put(&self, key: impl Into<String>, models: Vec<ModelInfo>) {
        self.entries.insert(
            key.into(),
            Entry {
                models,
                cached_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str) -> ModelInfo {
        ModelInfo {
            id: id.to_owned(),
            context_length: 4096,
            pricing: 0.0,
            supports_tools: false,
            supports_vision: false,
        }
    }

    #[test]
    fn hits_within_ttl() {
        let cache = DiscoveryCache::new(Duration::from_secs(3600));
        cache.put("together", vec![model("a")]);
        assert!(cache.get("together").is_some());
    }

    #[test]
    fn misses_after_ttl_elapses() {
        let cache = DiscoveryCache::new(Duration::from_millis(10));
        cache.put("together", vec![model("a")]);
        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get("together").is_none());
    }

    #[test]
    fn misses_unknown_key() {
        let cache = DiscoveryCache::new(Duration::from_secs(60));
        assert!(cache.get("unknown").is_none());
    }
}
