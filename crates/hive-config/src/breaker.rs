use serde::Deserialize;

/// Circuit breaker thresholds, shared by every backend (`spec.md` §4.2).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CircuitBreakerConfig {
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    #[serde(default = "default_reset_timeout")]
    pub reset_timeout: String,
    #[serde(default = "default_half_open_max")]
    pub half_open_max: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            reset_timeout: default_reset_timeout(),
            half_open_max: default_half_open_max(),
        }
    }
}

const fn default_failure_threshold() -> u32 {
    3
}

fn default_reset_timeout() -> String {
    "60s".to_owned()
}

const fn default_half_open_max() -> u32 {
    2
}
