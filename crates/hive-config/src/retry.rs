use serde::Deserialize;

/// Per-backend retry/backoff envelope (`spec.md` §4.1, §6).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_base_delay")]
    pub retry_base_delay: String,
    #[serde(default = "default_max_delay")]
    pub retry_max_delay: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_base_delay: default_base_delay(),
            retry_max_delay: default_max_delay(),
        }
    }
}

const fn default_max_retries() -> u32 {
    3
}

fn default_base_delay() -> String {
    "1s".to_owned()
}

fn default_max_delay() -> String {
    "60s".to_owned()
}
