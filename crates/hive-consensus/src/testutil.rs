//! Shared test fixtures: a `ProviderRouter` wired to scripted in-process
//! providers, one per logical model id, each always returning the same
//! reply regardless of prompt.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use hive_config::{BackendConfig, BackendName, Config, RouteTarget, RoutingConfig};
use hive_provider::{ChatCompletion, ChatParams, DeltaChunk, GenerationInfo, Message, ModelInfo, Provider, ProviderCallError, ProviderRouter};
use hive_telemetry::InMemoryTelemetrySink;
use indexmap::IndexMap;

struct ScriptedProvider {
    replies: HashMap<String, String>,
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat_completion(
        &self,
        model_native_id: &str,
        _messages: &[Message],
        _params: &ChatParams,
    ) -> Result<ChatCompletion, ProviderCallError> {
        let content = self
            .replies
            .get(model_native_id)
            .cloned()
            .unwrap_or_else(|| format!("[{model_native_id}] no scripted reply"));
        Ok(ChatCompletion {
            content,
            tokens_in: 10,
            tokens_out: 10,
            generation_id: format!("gen-{model_native_id}"),
        })
    }

    async fn stream_chat(
        &self,
        _model_native_id: &str,
        _messages: &[Message],
        _params: &ChatParams,
    ) -> Result<BoxStream<'static, Result<DeltaChunk, ProviderCallError>>, ProviderCallError> {
        unimplemented!("consensus strategies do not stream")
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderCallError> {
        Ok(Vec::new())
    }

    async fn get_generation(&self, _generation_id: &str) -> Result<GenerationInfo, ProviderCallError> {
        Ok(GenerationInfo { tokens: 10, cost: 0.0 })
    }
}

/// Build a `ProviderRouter` where every `(model_id, reply)` pair routes
/// to a single `local_stub`-like backend that always returns `reply` for
/// that model id, regardless of prompt content.
pub(crate) fn scripted_router(pairs: &[(&str, &str)]) -> ProviderRouter {
    let mut routing = RoutingConfig::default();
    let mut replies = HashMap::new();
    for (model_id, reply) in pairs {
        routing.routing_table.insert(
            (*model_id).to_owned(),
            RouteTarget {
                backend: BackendName::LocalStub,
                native_id: (*model_id).to_owned(),
            },
        );
        replies.insert((*model_id).to_owned(), (*reply).to_owned());
    }

    let mut backends = IndexMap::new();
    backends.insert(
        BackendName::LocalStub,
        BackendConfig {
            name: BackendName::LocalStub,
            rpm_limit: 6000,
            connect_timeout: "5s".to_owned(),
            read_timeout: "30s".to_owned(),
            api_key_env: None,
            base_url: None,
        },
    );

    let config = Config {
        backends,
        routing,
        ..Config::default()
    };

    let mut router = ProviderRouter::new(config, Arc::new(InMemoryTelemetrySink::new())).unwrap();
    router.register_provider(BackendName::LocalStub, Arc::new(ScriptedProvider { replies }));
    router
}
