//! The Provider Router (`spec.md` §4.1): resolves a logical model id to
//! a concrete backend call, honoring rate limits, circuit breakers, and
//! the fallback chain.
//!
//! Grounded on `synapse-llm::router::ModelRouter::complete_with_failover`
//! for the retry-then-failover shape, generalized to the window-reset
//! rate limiter (`hive-ratelimit`) and stricter breaker (`hive-breaker`)
//! this workspace uses instead of the teacher's `governor`/atomics pair.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use hive_breaker::{BreakerConfig, CircuitBreakerRegistry};
use hive_config::{BackendName, Config};
use hive_core::{CorrelationId, ErrorKind, HiveError, ModelResponse};
use hive_ratelimit::RateLimiterRegistry;
use hive_telemetry::{CallEvent, CallOutcome, TelemetrySink};

use crate::cache::DiscoveryCache;
use crate::error::ProviderCallError;
use crate::provider::Provider;
use crate::types::{ChatParams, Message, ModelInfo};

fn parse_duration(raw: &str, what: &str) -> anyhow::Result<Duration> {
    duration_str::parse(raw).map_err(|e| anyhow::anyhow!("invalid duration for {what} `{raw}`: {e}"))
}

/// One attempted backend's failure, preserved for `all_providers_failed`.
#[derive(Debug, Clone)]
struct AttemptCause {
    backend: String,
    cause: String,
}

pub struct ProviderRouter {
    config: Config,
    providers: HashMap<BackendName, Arc<dyn Provider>>,
    rate_limiters: RateLimiterRegistry,
    breakers: CircuitBreakerRegistry,
    discovery_cache: DiscoveryCache,
    retry_base_delay: Duration,
    retry_max_delay: Duration,
    telemetry: Arc<dyn TelemetrySink>,
}

impl ProviderRouter {
    /// Build a router from static configuration. Registers a rate-limit
    /// bucket for every configured backend; no providers are registered
    /// yet, callers do that with [`Self::register_provider`].
    ///
    /// # Errors
    ///
    /// Returns an error if any configured duration string or `rpm_limit`
    /// is invalid.
    pub fn new(config: Config, telemetry: Arc<dyn TelemetrySink>) -> anyhow::Result<Self> {
        let rate_limiters = RateLimiterRegistry::new();
        for (name, backend_config) in &config.backends {
            rate_limiters
                .register(name.as_str(), backend_config.rpm_limit)
                .map_err(|e| anyhow::anyhow!("backend {}: {e}", name.as_str()))?;
        }

        let breaker_config = BreakerConfig {
            failure_threshold: config.circuit_breaker.failure_threshold,
            reset_timeout: parse_duration(&config.circuit_breaker.reset_timeout, "circuit_breaker.reset_timeout")?,
            half_open_max: config.circuit_breaker.half_open_max,
        };
        let breakers = CircuitBreakerRegistry::new(breaker_config);

        let discovery_ttl = parse_duration(&config.routing.discovery_cache_ttl, "routing.discovery_cache_ttl")?;
        let retry_base_delay = parse_duration(&config.retry.retry_base_delay, "retry.retry_base_delay")?;
        let retry_max_delay = parse_duration(&config.retry.retry_max_delay, "retry.retry_max_delay")?;

        Ok(Self {
            config,
            providers: HashMap::new(),
            rate_limiters,
            breakers,
            discovery_cache: DiscoveryCache::new(discovery_ttl),
            retry_base_delay,
            retry_max_delay,
            telemetry,
        })
    }

    /// Wire a backend's concrete `Provider` implementation.
    pub fn register_provider(&mut self, backend: BackendName, provider: Arc<dyn Provider>) {
        self.providers.insert(backend, provider);
    }

    /// `dispatch(logical_model_id, prompt, params) → ModelResponse |
    /// RouterError` (`spec.md` §4.1).
    pub async fn dispatch(
        &self,
        logical_model_id: &str,
        messages: &[Message],
        params: &ChatParams,
        correlation_id: CorrelationId,
        stage: &str,
    ) -> Result<ModelResponse, HiveError> {
        let Some(target) = self.config.routing.primary(logical_model_id) else {
            return Err(HiveError::new(
                ErrorKind::Validation,
                format!("no routing table entry for logical model id `{logical_model_id}`"),
                correlation_id,
            ));
        };
        let primary_backend = target.backend;
        let primary_native_id = target.native_id.clone();

        let mut attempted = Vec::new();

        match self
            .try_backend_with_retries(primary_backend, &primary_native_id, messages, params, correlation_id, stage)
            .await
        {
            Ok(response) => return Ok(response),
            Err(cause) => {
                tracing::warn!(
                    backend = primary_backend.as_str(),
                    logical_model_id,
                    error = %cause,
                    "primary backend failed, attempting failover"
                );
                attempted.push(AttemptCause {
                    backend: primary_backend.as_str().to_owned(),
                    cause,
                });
            }
        }

        for &fallback_backend in &self.config.routing.fallback_chain {
            if fallback_backend == primary_backend {
                continue;
            }
            let Some(native_id) = self.config.routing.fallback_native_id(logical_model_id, fallback_backend) else {
                continue;
            };
            if !self.breakers.is_available(fallback_backend.as_str()) {
                continue;
            }

            match self
                .try_backend_once(fallback_backend, native_id, messages, params, correlation_id, stage)
                .await
            {
                Ok(response) => return Ok(response),
                Err(cause) => {
                    tracing::warn!(
                        backend = fallback_backend.as_str(),
                        logical_model_id,
                        error = %cause,
                        "failover backend also failed"
                    );
                    attempted.push(AttemptCause {
                        backend: fallback_backend.as_str().to_owned(),
                        cause,
                    });
                }
            }
        }

        Err(HiveError::new(
            ErrorKind::AllProvidersFailed,
            format!("every candidate backend failed for `{logical_model_id}`"),
            correlation_id,
        )
        .with_details(serde_json::json!({
            "attempted": attempted.iter().map(|a| serde_json::json!({
                "backend": a.backend,
                "cause": a.cause,
            })).collect::<Vec<_>>(),
        })))
    }

    /// Try the primary backend, retrying transient failures up to
    /// `max_retries` with backoff before giving up on this backend.
    async fn try_backend_with_retries(
        &self,
        backend: BackendName,
        native_id: &str,
        messages: &[Message],
        params: &ChatParams,
        correlation_id: CorrelationId,
        stage: &str,
    ) -> Result<ModelResponse, String> {
        let max_retries = self.config.retry.max_retries;
        let mut last_error = String::new();

        for attempt in 0..=max_retries {
            if !self.breakers.is_available(backend.as_str()) {
                return Err("circuit open".to_owned());
            }

            match self
                .call_once(backend, native_id, messages, params, correlation_id, stage, attempt + 1)
                .await
            {
                Ok(response) => return Ok(response),
                Err(CallFailure::Permanent(message)) => return Err(message),
                Err(CallFailure::Transient { message, retry_after }) => {
                    last_error = message;
                    if attempt == max_retries {
                        break;
                    }
                    let sleep_for = retry_after.unwrap_or_else(|| {
                        let scaled = self.retry_base_delay.saturating_mul(1_u32 << attempt.min(16));
                        scaled.min(self.retry_max_delay)
                    });
                    tokio::time::sleep(sleep_for).await;
                }
            }
        }

        Err(last_error)
    }

    /// Try a fallback backend exactly once (`spec.md` §4.1: "each tried
    /// once").
    async fn try_backend_once(
        &self,
        backend: BackendName,
        native_id: &str,
        messages: &[Message],
        params: &ChatParams,
        correlation_id: CorrelationId,
        stage: &str,
    ) -> Result<ModelResponse, String> {
        match self.call_once(backend, native_id, messages, params, correlation_id, stage, 1).await {
            Ok(response) => Ok(response),
            Err(CallFailure::Permanent(message) | CallFailure::Transient { message, .. }) => Err(message),
        }
    }

    async fn call_once(
        &self,
        backend: BackendName,
        native_id: &str,
        messages: &[Message],
        params: &ChatParams,
        correlation_id: CorrelationId,
        stage: &str,
        attempt: u32,
    ) -> Result<ModelResponse, CallFailure> {
        let Some(provider) = self.providers.get(&backend) else {
            return Err(CallFailure::Permanent(format!("no provider registered for {}", backend.as_str())));
        };

        let bucket = self.rate_limiters.bucket(backend.as_str());
        if let Some(bucket) = &bucket {
            bucket.acquire().await;
        }

        let start = Instant::now();
        let outcome = provider.chat_completion(native_id, messages, params).await;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok(completion) => {
                self.breakers.record_success(backend.as_str());
                self.telemetry.record_call(CallEvent {
                    correlation_id,
                    backend: backend.as_str().to_owned(),
                    native_id: native_id.to_owned(),
                    attempt,
                    latency_ms,
                    outcome: CallOutcome::Success,
                    stage: stage.to_owned(),
                });
                let reliability = (1.0 - 0.1 * f64::from(attempt - 1)).max(0.5);
                Ok(ModelResponse::new(
                    native_id,
                    completion.content,
                    completion.tokens_out,
                    latency_ms,
                    reliability,
                    correlation_id,
                ))
            }
            Err(call_error) => {
                // A 429 is not a circuit-opening failure (`spec.md` §4.2, §7):
                // it's recovered via backoff/failover, not counted toward
                // `consecutive_failures`.
                let tripped = match &call_error {
                    ProviderCallError::RateLimited { .. } => false,
                    ProviderCallError::ClientError { .. }
                    | ProviderCallError::ServerError { .. }
                    | ProviderCallError::Network { .. } => self.breakers.record_failure(backend.as_str()),
                };
                let call_outcome = match &call_error {
                    ProviderCallError::RateLimited { .. } => CallOutcome::RateLimited,
                    ProviderCallError::ClientError { .. } => CallOutcome::ProviderPermanent,
                    ProviderCallError::ServerError { .. } | ProviderCallError::Network { .. } => {
                        CallOutcome::ProviderTransient
                    }
                };
                self.telemetry.record_call(CallEvent {
                    correlation_id,
                    backend: backend.as_str().to_owned(),
                    native_id: native_id.to_owned(),
                    attempt,
                    latency_ms,
                    outcome: if tripped { CallOutcome::CircuitOpen } else { call_outcome },
                    stage: stage.to_owned(),
                });

                match call_error {
                    ProviderCallError::RateLimited { retry_after, message } => Err(CallFailure::Transient {
                        message,
                        retry_after: retry_after.map(Duration::from_secs),
                    }),
                    ProviderCallError::ClientError { message } => Err(CallFailure::Permanent(message)),
                    ProviderCallError::ServerError { message } | ProviderCallError::Network { message } => {
                        Err(CallFailure::Transient { message, retry_after: None })
                    }
                }
            }
        }
    }

    /// Discovery read: `list_models()`, cached by backend name with the
    /// configured TTL (`spec.md` §4.1). Never used for inference calls.
    ///
    /// # Errors
    ///
    /// Returns the underlying provider error if the backend is not
    /// cached and the live call fails.
    pub async fn list_models(&self, backend: BackendName) -> Result<Vec<ModelInfo>, ProviderCallError> {
        if let Some(cached) = self.discovery_cache.get(backend.as_str()) {
            return Ok(cached);
        }
        let provider = self.providers.get(&backend).ok_or_else(|| ProviderCallError::ClientError {
            message: format!("no provider registered for {}", backend.as_str()),
        })?;
        let models = provider.list_models().await?;
        self.discovery_cache.put(backend.as_str(), models.clone());
        Ok(models)
    }
}

enum CallFailure {
    Permanent(String),
    Transient { message: String, retry_after: Option<Duration> },
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use futures::stream::BoxStream;
    use hive_config::{BackendConfig, RouteTarget};
    use hive_telemetry::InMemoryTelemetrySink;
    use indexmap::IndexMap;

    use super::*;
    use crate::types::{ChatCompletion, DeltaChunk, GenerationInfo};

    struct FlakyProvider {
        name: String,
        failures_then_success: AtomicU32,
    }

    #[async_trait]
    impl Provider for FlakyProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn chat_completion(
            &self,
            model_native_id: &str,
            _messages: &[Message],
            _params: &ChatParams,
        ) -> Result<ChatCompletion, ProviderCallError> {
            let remaining = self.failures_then_success.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                if n == 0 { None } else { Some(n - 1) }
            });
            if remaining.is_ok() {
                return Err(ProviderCallError::ServerError {
                    message: "boom".to_owned(),
                });
            }
            Ok(ChatCompletion {
                content: format!("ok from {model_native_id}"),
                tokens_in: 1,
                tokens_out: 1,
                generation_id: "gen-1".to_owned(),
            })
        }

        async fn stream_chat(
            &self,
            _model_native_id: &str,
            _messages: &[Message],
            _params: &ChatParams,
        ) -> Result<BoxStream<'static, Result<DeltaChunk, ProviderCallError>>, ProviderCallError> {
            unimplemented!("not exercised in these tests")
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderCallError> {
            Ok(vec![])
        }

        async fn get_generation(&self, _generation_id: &str) -> Result<GenerationInfo, ProviderCallError> {
            Ok(GenerationInfo { tokens: 0, cost: 0.0 })
        }
    }

    struct AlwaysFailsProvider {
        name: String,
    }

    #[async_trait]
    impl Provider for AlwaysFailsProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn chat_completion(
            &self,
            _model_native_id: &str,
            _messages: &[Message],
            _params: &ChatParams,
        ) -> Result<ChatCompletion, ProviderCallError> {
            Err(ProviderCallError::ServerError {
                message: "down".to_owned(),
            })
        }

        async fn stream_chat(
            &self,
            _model_native_id: &str,
            _messages: &[Message],
            _params: &ChatParams,
        ) -> Result<BoxStream<'static, Result<DeltaChunk, ProviderCallError>>, ProviderCallError> {
            unimplemented!("not exercised in these tests")
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderCallError> {
            Ok(vec![])
        }

        async fn get_generation(&self, _generation_id: &str) -> Result<GenerationInfo, ProviderCallError> {
            Ok(GenerationInfo { tokens: 0, cost: 0.0 })
        }
    }

    fn test_config() -> Config {
        let mut backends = IndexMap::new();
        backends.insert(
            BackendName::Together,
            BackendConfig {
                name: BackendName::Together,
                rpm_limit: 1000,
                connect_timeout: "5s".to_owned(),
                read_timeout: "30s".to_owned(),
                api_key_env: None,
                base_url: None,
            },
        );
        backends.insert(
            BackendName::Cerebras,
            BackendConfig {
                name: BackendName::Cerebras,
                rpm_limit: 1000,
                connect_timeout: "5s".to_owned(),
                read_timeout: "30s".to_owned(),
                api_key_env: None,
                base_url: None,
            },
        );

        let mut routing_table = IndexMap::new();
        routing_table.insert(
            "logical-a".to_owned(),
            RouteTarget {
                backend: BackendName::Together,
                native_id: "together-native".to_owned(),
            },
        );

        let mut failover_translations = IndexMap::new();
        let mut by_backend = IndexMap::new();
        by_backend.insert(BackendName::Cerebras, "cerebras-native".to_owned());
        failover_translations.insert("logical-a".to_owned(), by_backend);

        Config {
            backends,
            routing: hive_config::RoutingConfig {
                routing_table,
                fallback_chain: vec![BackendName::Cerebras],
                discovery_cache_ttl: "1h".to_owned(),
                failover_translations,
            },
            retry: hive_config::RetryConfig {
                max_retries: 2,
                retry_base_delay: "1ms".to_owned(),
                retry_max_delay: "5ms".to_owned(),
            },
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn succeeds_on_first_attempt_with_no_retries() {
        let telemetry = Arc::new(InMemoryTelemetrySink::new());
        let mut router = ProviderRouter::new(test_config(), telemetry.clone()).unwrap();
        router.register_provider(
            BackendName::Together,
            Arc::new(FlakyProvider {
                name: "together".to_owned(),
                failures_then_success: AtomicU32::new(0),
            }),
        );

        let response = router
            .dispatch(
                "logical-a",
                &[Message::user("hi")],
                &ChatParams::default(),
                CorrelationId::generate(),
                "direct",
            )
            .await
            .unwrap();
        assert!(response.content.contains("together-native"));
        assert_eq!(telemetry.calls().len(), 1);
    }

    #[tokio::test]
    async fn retries_transient_failures_before_succeeding() {
        let telemetry = Arc::new(InMemoryTelemetrySink::new());
        let mut router = ProviderRouter::new(test_config(), telemetry.clone()).unwrap();
        router.register_provider(
            BackendName::Together,
            Arc::new(FlakyProvider {
                name: "together".to_owned(),
                failures_then_success: AtomicU32::new(2),
            }),
        );

        let response = router
            .dispatch(
                "logical-a",
                &[Message::user("hi")],
                &ChatParams::default(),
                CorrelationId::generate(),
                "direct",
            )
            .await
            .unwrap();
        assert!(response.content.contains("together-native"));
        assert_eq!(telemetry.calls().len(), 3);
    }

    #[tokio::test]
    async fn falls_over_to_next_backend_after_retries_exhausted() {
        let telemetry = Arc::new(InMemoryTelemetrySink::new());
        let mut router = ProviderRouter::new(test_config(), telemetry.clone()).unwrap();
        router.register_provider(
            BackendName::Together,
            Arc::new(AlwaysFailsProvider {
                name: "together".to_owned(),
            }),
        );
        router.register_provider(
            BackendName::Cerebras,
            Arc::new(FlakyProvider {
                name: "cerebras".to_owned(),
                failures_then_success: AtomicU32::new(0),
            }),
        );

        let response = router
            .dispatch(
                "logical-a",
                &[Message::user("hi")],
                &ChatParams::default(),
                CorrelationId::generate(),
                "direct",
            )
            .await
            .unwrap();
        assert!(response.content.contains("cerebras-native"));
    }

    #[tokio::test]
    async fn all_providers_failed_preserves_attempt_causes() {
        let telemetry = Arc::new(InMemoryTelemetrySink::new());
        let mut router = ProviderRouter::new(test_config(), telemetry).unwrap();
        router.register_provider(
            BackendName::Together,
            Arc::new(AlwaysFailsProvider {
                name: "together".to_owned(),
            }),
        );
        router.register_provider(
            BackendName::Cerebras,
            Arc::new(AlwaysFailsProvider {
                name: "cerebras".to_owned(),
            }),
        );

        let err = router
            .dispatch(
                "logical-a",
                &[Message::user("hi")],
                &ChatParams::default(),
                CorrelationId::generate(),
                "direct",
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::AllProvidersFailed);
        assert_eq!(err.details["attempted"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_logical_model_id_is_a_validation_error() {
        let telemetry = Arc::new(InMemoryTelemetrySink::new());
        let router = ProviderRouter::new(test_config(), telemetry).unwrap();
        let err = router
            .dispatch(
                "not-configured",
                &[Message::user("hi")],
                &ChatParams::default(),
                CorrelationId::generate(),
                "direct",
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    struct AlwaysRateLimitedProvider {
        name: String,
    }

    #[async_trait]
    impl Provider for AlwaysRateLimitedProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn chat_completion(
            &self,
            _model_native_id: &str,
            _messages: &[Message],
            _params: &ChatParams,
        ) -> Result<ChatCompletion, ProviderCallError> {
            Err(ProviderCallError::RateLimited {
                retry_after: None,
                message: "slow down".to_owned(),
            })
        }

        async fn stream_chat(
            &self,
            _model_native_id: &str,
            _messages: &[Message],
            _params: &ChatParams,
        ) -> Result<BoxStream<'static, Result<DeltaChunk, ProviderCallError>>, ProviderCallError> {
            unimplemented!("not exercised in these tests")
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderCallError> {
            Ok(vec![])
        }

        async fn get_generation(&self, _generation_id: &str) -> Result<GenerationInfo, ProviderCallError> {
            Ok(GenerationInfo { tokens: 0, cost: 0.0 })
        }
    }

    #[tokio::test]
    async fn repeated_rate_limiting_never_trips_the_circuit_breaker() {
        let telemetry = Arc::new(InMemoryTelemetrySink::new());
        let mut router = ProviderRouter::new(test_config(), telemetry.clone()).unwrap();
        router.register_provider(
            BackendName::Together,
            Arc::new(AlwaysRateLimitedProvider {
                name: "together".to_owned(),
            }),
        );

        let _ = router
            .dispatch(
                "logical-a",
                &[Message::user("hi")],
                &ChatParams::default(),
                CorrelationId::generate(),
                "direct",
            )
            .await;

        let calls = telemetry.calls();
        assert!(calls.len() >= 3);
        assert!(calls.iter().all(|call| call.outcome == CallOutcome::RateLimited));
        assert!(router.breakers.is_available(BackendName::Together.as_str()));
    }
}
