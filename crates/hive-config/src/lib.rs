#![allow(clippy::must_use_candidate)]

//! Static startup configuration for the LLMHive orchestration core
//! (`spec.md` §6's Configuration table).

mod backend;
mod breaker;
mod cascade;
mod consensus;
mod env;
mod loader;
mod refinement;
mod retry;
mod routing;
mod selector;
mod strategy;

use indexmap::IndexMap;
use serde::Deserialize;

pub use backend::{BackendConfig, BackendName};
pub use breaker::CircuitBreakerConfig;
pub use cascade::CascadeConfig;
pub use consensus::ConsensusConfig;
pub use refinement::RefinementConfig;
pub use retry::RetryConfig;
pub use routing::{RouteTarget, RoutingConfig};
pub use selector::{ModelProfileConfig, SelectorConfig};
pub use strategy::StrategyConfig;

/// The full orchestration core configuration, loaded once at startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Enabled backends, keyed by their `BackendName`.
    #[serde(default)]
    pub backends: IndexMap<BackendName, BackendConfig>,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerConfig,
    #[serde(default)]
    pub consensus: ConsensusConfig,
    #[serde(default)]
    pub refinement: RefinementConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub cascade: CascadeConfig,
    #[serde(default)]
    pub selector: SelectorConfig,
}

impl Config {
    /// Look up a configured backend by name.
    #[must_use]
    pub fn backend(&self, name: BackendName) -> Option<&BackendConfig> {
        self.backends.get(&name)
    }
}
