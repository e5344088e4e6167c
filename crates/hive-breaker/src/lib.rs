//! Per-backend circuit breaker: three states, explicit half-open probe
//! counting (`spec.md` §4.2, §8).
//!
//! Grounded on `synapse-llm::health::ProviderHealthTracker`'s shape (one
//! `DashMap` of per-backend state, `record_success`/`record_failure`,
//! derived `state()`), generalized for the stricter state machine
//! `spec.md` requires: `closed → open` on a run of `consecutive_failures`
//! (not a time-windowed error count), and `half_open → closed` only after
//! every half-open probe succeeds in order, `half_open → open` on the
//! first probe failure. That bookkeeping is sequential, so each backend's
//! state lives behind its own `std::sync::Mutex` rather than teacher's
//! lock-free atomics.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Circuit breaker state for a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

/// Thresholds shared by every backend's breaker.
#[derive(Debug, Clone, Copy)]
pub struct BreakerConfig {
    pub failure_threshold: u32,
    pub reset_timeout: Duration,
    pub half_open_max: u32,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            reset_timeout: Duration::from_secs(60),
            half_open_max: 2,
        }
    }
}

struct Breaker {
    state: CircuitState,
    consecutive_failures: u32,
    last_open_ts: Option<Instant>,
    half_open_probes_remaining: u32,
}

impl Breaker {
    fn new() -> Self {
        Self {
            state: CircuitState::Closed,
            consecutive_failures: 0,
            last_open_ts: None,
            half_open_probes_remaining: 0,
        }
    }

    /// Advance `open → half_open` if `reset_timeout` has elapsed; must be
    /// called before every read or write of `state`.
    fn refresh(&mut self, config: &BreakerConfig, now: Instant) {
        if self.state == CircuitState::Open {
            if let Some(opened) = self.last_open_ts {
                if now.duration_since(opened) >= config.reset_timeout {
                    self.state = CircuitState::HalfOpen;
                    self.half_open_probes_remaining = config.half_open_max;
                }
            }
        }
    }

    fn record_success(&mut self) {
        match self.state {
            CircuitState::Closed => {
                self.consecutive_failures = 0;
            }
            CircuitState::HalfOpen => {
                self.half_open_probes_remaining = self.half_open_probes_remaining.saturating_sub(1);
                if self.half_open_probes_remaining == 0 {
                    self.state = CircuitState::Closed;
                    self.consecutive_failures = 0;
                    self.last_open_ts = None;
                }
            }
            CircuitState::Open => {}
        }
    }

    fn record_failure(&mut self, config: &BreakerConfig, now: Instant) -> bool {
        match self.state {
            CircuitState::Closed => {
                self.consecutive_failures += 1;
                if self.consecutive_failures >= config.failure_threshold {
                    self.state = CircuitState::Open;
                    self.last_open_ts = Some(now);
                    return true;
                }
                false
            }
            CircuitState::HalfOpen => {
                self.state = CircuitState::Open;
                self.last_open_ts = Some(now);
                self.half_open_probes_remaining = 0;
                true
            }
            CircuitState::Open => false,
        }
    }
}

/// Tracks circuit breaker state for every backend, independently.
pub struct CircuitBreakerRegistry {
    backends: DashMap<String, Mutex<Breaker>>,
    config: BreakerConfig,
}

impl CircuitBreakerRegistry {
    #[must_use]
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            backends: DashMap::new(),
            config,
        }
    }

    /// Current state of a backend's breaker (defaults to `Closed` for an
    /// unseen backend).
    #[must_use]
    pub fn state(&self, backend: &str) -> CircuitState {
        let entry = self.backends.entry(backend.to_owned()).or_insert_with(|| Mutex::new(Breaker::new()));
        let mut breaker = entry.lock().expect("breaker mutex poisoned");
        breaker.refresh(&self.config, Instant::now());
        breaker.state
    }

    /// Whether the backend should be tried (`Open` is skipped; `spec.md`
    /// §4.2 "the router treats open as temporarily unavailable").
    #[must_use]
    pub fn is_available(&self, backend: &str) -> bool {
        self.state(backend) != CircuitState::Open
    }

    /// Record a successful call.
    pub fn record_success(&self, backend: &str) {
        let entry = self.backends.entry(backend.to_owned()).or_insert_with(|| Mutex::new(Breaker::new()));
        let mut breaker = entry.lock().expect("breaker mutex poisoned");
        breaker.refresh(&self.config, Instant::now());
        breaker.record_success();
    }

    /// Record a failed call, returning `true` if this call tripped the
    /// breaker open.
    pub fn record_failure(&self, backend: &str) -> bool {
        let entry = self.backends.entry(backend.to_owned()).or_insert_with(|| Mutex::new(Breaker::new()));
        let mut breaker = entry.lock().expect("breaker mutex poisoned");
        let now = Instant::now();
        breaker.refresh(&self.config, now);
        let tripped = breaker.record_failure(&self.config, now);
        if tripped {
            tracing::warn!(backend, "circuit breaker opened for backend");
        }
        tripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> BreakerConfig {
        BreakerConfig {
            failure_threshold: 3,
            reset_timeout: Duration::from_millis(50),
            half_open_max: 2,
        }
    }

    #[test]
    fn healthy_backend_is_closed() {
        let registry = CircuitBreakerRegistry::new(test_config());
        assert_eq!(registry.state("x"), CircuitState::Closed);
        assert!(registry.is_available("x"));
    }

    #[test]
    fn failures_below_threshold_stay_closed() {
        let registry = CircuitBreakerRegistry::new(test_config());
        registry.record_failure("x");
        registry.record_failure("x");
        assert_eq!(registry.state("x"), CircuitState::Closed);
    }

    #[test]
    fn threshold_failures_open_the_circuit() {
        let registry = CircuitBreakerRegistry::new(test_config());
        for _ in 0..3 {
            registry.record_failure("x");
        }
        assert_eq!(registry.state("x"), CircuitState::Open);
        assert!(!registry.is_available("x"));
    }

    #[test]
    fn success_in_closed_resets_consecutive_failures() {
        let registry = CircuitBreakerRegistry::new(test_config());
        registry.record_failure("x");
        registry.record_failure("x");
        registry.record_success("x");
        registry.record_failure("x");
        registry.record_failure("x");
        assert_eq!(registry.state("x"), CircuitState::Closed);
    }

    #[test]
    fn half_open_closes_only_after_all_probes_succeed_in_order() {
        let registry = CircuitBreakerRegistry::new(test_config());
        for _ in 0..3 {
            registry.record_failure("x");
        }
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(registry.state("x"), CircuitState::HalfOpen);

        registry.record_success("x");
        assert_eq!(registry.state("x"), CircuitState::HalfOpen);

        registry.record_success("x");
        assert_eq!(registry.state("x"), CircuitState::Closed);
    }

    #[test]
    fn half_open_reopens_on_first_probe_failure() {
        let registry = CircuitBreakerRegistry::new(test_config());
        for _ in 0..3 {
            registry.record_failure("x");
        }
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(registry.state("x"), CircuitState::HalfOpen);

        registry.record_failure("x");
        assert_eq!(registry.state("x"), CircuitState::Open);
    }

    #[test]
    fn independent_backend_tracking() {
        let registry = CircuitBreakerRegistry::new(test_config());
        for _ in 0..3 {
            registry.record_failure("bad");
        }
        assert!(!registry.is_available("bad"));
        assert!(registry.is_available("good"));
    }

    #[test]
    fn closed_to_closed_path_only_via_half_open() {
        let registry = CircuitBreakerRegistry::new(test_config());
        for _ in 0..3 {
            registry.record_failure("x");
        }
        assert_eq!(registry.state("x"), CircuitState::Open);
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(registry.state("x"), CircuitState::HalfOpen);
        registry.record_success("x");
        registry.record_success("x");
        assert_eq!(registry.state("x"), CircuitState::Closed);
    }
}
