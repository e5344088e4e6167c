use indexmap::IndexMap;
use serde::Deserialize;

use crate::backend::BackendName;

/// Where a logical model id resolves to: a backend plus that backend's
/// native model identifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteTarget {
    pub backend: BackendName,
    pub native_id: String,
}

/// `routing_table`: logical_model_id → (backend, native_id), plus the
/// ordered failover chain tried when the primary target is unavailable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    #[serde(default)]
    pub routing_table: IndexMap<String, RouteTarget>,
    /// Ordered backend names tried, in order, when the primary backend
    /// fails over. Defaults to `[together, cerebras, huggingface]`
    /// (`spec.md` §4.1).
    #[serde(default = "default_fallback_chain")]
    pub fallback_chain: Vec<BackendName>,
    /// GET-style provider discovery response cache TTL.
    #[serde(default = "default_discovery_cache_ttl")]
    pub discovery_cache_ttl: String,
    /// Per-logical-id substitute native ids for each fallback backend,
    /// keyed `logical_model_id -> backend -> native_id`. Consulted only
    /// when stepping through `fallback_chain`.
    #[serde(default)]
    pub failover_translations: IndexMap<String, IndexMap<BackendName, String>>,
}

fn default_fallback_chain() -> Vec<BackendName> {
    vec![BackendName::Together, BackendName::Cerebras, BackendName::Huggingface]
}

fn default_discovery_cache_ttl() -> String {
    "1h".to_owned()
}

impl RoutingConfig {
    /// Resolve the primary route target for a logical model id.
    #[must_use]
    pub fn primary(&self, logical_model_id: &str) -> Option<&RouteTarget> {
        self.routing_table.get(logical_model_id)
    }

    /// Resolve a fallback backend's substitute native id for a logical
    /// model id, if a translation was configured.
    #[must_use]
    pub fn fallback_native_id(&self, logical_model_id: &str, backend: BackendName) -> Option<&str> {
        self.failover_translations
            .get(logical_model_id)
            .and_then(|by_backend| by_backend.get(&backend))
            .map(String::as_str)
    }
}
