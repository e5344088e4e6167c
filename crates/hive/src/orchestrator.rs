//! The top-level facade (`spec.md` §2's end-to-end flow): a request
//! comes in, is routed down the Cascade path (`mode=speed`) or the
//! full Model Selector → Strategy → Consensus → Refinement Ensemble
//! path, and a `Response` comes out.
//!
//! Grounded on `synapse-server::Server::new`'s assembly role: build
//! each subsystem once at startup, then have the request path thread
//! through the already-built pieces.

use std::sync::Arc;
use std::time::Instant;

use hive_config::Config;
use hive_core::{CorrelationId, ErrorKind, HiveError, Request, TaskCategory};
use hive_provider::{ChatParams, Message, Provider, ProviderRouter};
use hive_refine::ResearchProvider;
use hive_selector::{ModelRegistry, OptimizeFor};
use hive_telemetry::TelemetrySink;

use crate::dispatch::run_strategy;
use crate::types::{OrchestrationPath, Response};

/// `Mode` biases which of the Model Selector's optimization targets an
/// ensemble request is scored against. `Speed` never reaches this
/// mapping (it takes the cascade path), but the match must stay total.
const fn optimize_for(mode: hive_core::Mode) -> OptimizeFor {
    match mode {
        hive_core::Mode::Speed => OptimizeFor::Speed,
        hive_core::Mode::Balanced => OptimizeFor::Cost,
        hive_core::Mode::Accuracy | hive_core::Mode::Benchmark => OptimizeFor::Quality,
    }
}

/// Owns the wired-up subsystems and answers `handle` calls against
/// them (`spec.md` §2).
pub struct Orchestrator {
    router: ProviderRouter,
    registry: ModelRegistry,
    config: Config,
    research: Option<Arc<dyn ResearchProvider>>,
}

impl Orchestrator {
    /// Build every subsystem from `config`. Providers still need to be
    /// registered with [`Orchestrator::register_provider`] before
    /// [`Orchestrator::handle`] can dispatch anything.
    ///
    /// # Errors
    ///
    /// Whatever `ProviderRouter::new` returns for a malformed routing
    /// table.
    pub fn from_config(config: Config, telemetry: Arc<dyn TelemetrySink>) -> anyhow::Result<Self> {
        let registry = ModelRegistry::from_config(&config.selector);
        let router = ProviderRouter::new(config.clone(), telemetry)?;
        Ok(Self { router, registry, config, research: None })
    }

    /// Register a backend's live provider implementation.
    pub fn register_provider(&mut self, backend: hive_config::BackendName, provider: Arc<dyn Provider>) {
        self.router.register_provider(backend, provider);
    }

    /// Wire in the web-search provider the Refinement Loop's
    /// `research_gather` strategy calls out to. Refinement runs without
    /// it if never set; `research_gather` is then skipped as unsupported
    /// (`hive-refine`'s own fallback).
    pub fn set_research_provider(&mut self, research: Arc<dyn ResearchProvider>) {
        self.research = Some(research);
    }

    /// Run one request end to end (`spec.md` §2).
    ///
    /// # Errors
    ///
    /// Propagates whatever the chosen path's first failing call
    /// returns; the cascade and ensemble paths both already retry
    /// across fallback backends and tiers internally, so an `Err` here
    /// means every option was exhausted.
    pub async fn handle(&self, request: &Request) -> Result<Response, HiveError> {
        let started = Instant::now();
        let mut response = if request.mode == hive_core::Mode::Speed {
            self.handle_cascade(request).await?
        } else {
            self.handle_ensemble(request).await?
        };
        response.total_latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        Ok(response)
    }

    async fn handle_cascade(&self, request: &Request) -> Result<Response, HiveError> {
        let report = hive_cascade::route(&self.router, &self.config.cascade, request, request.correlation_id).await?;
        self.registry.record_outcome(&report.model_used, report.confidence >= self.config.cascade.min_confidence_to_proceed);
        Ok(Response {
            final_answer: report.response.clone(),
            confidence: report.confidence,
            correlation_id: request.correlation_id,
            path: OrchestrationPath::Cascade,
            models_used: vec![report.model_used.clone()],
            strategy_used: None,
            cascade: Some(report),
            consensus: None,
            refinement: None,
            total_latency_ms: 0,
        })
    }

    async fn handle_ensemble(&self, request: &Request) -> Result<Response, HiveError> {
        let models = hive_selector::select_ensemble(
            &self.registry,
            &request.available_model_ids,
            request.task_category,
            optimize_for(request.mode),
            self.config.selector.max_models,
        );
        if models.is_empty() {
            return Err(HiveError::new(ErrorKind::Validation, "no available model matches this request", request.correlation_id));
        }

        let kind = hive_strategy::select_strategy(request);
        let (model_responses, outcome) =
            run_strategy(&self.router, kind, &models, &request.query, &self.config.strategy, request.correlation_id).await?;

        for response in &model_responses {
            self.registry.record_outcome(&response.model_id, outcome.verified);
        }

        let consensus = hive_consensus::merge(
            &self.router,
            &models[0],
            &request.query,
            request.task_category,
            &model_responses,
            &self.config.consensus,
            request.correlation_id,
        )
        .await?;

        let mut final_answer = consensus.final_answer.clone();
        let mut confidence = consensus.score.overall;
        let mut refinement = None;

        if self.should_refine(request, confidence) {
            let issues = hive_verify::verify_answer(&request.query, &final_answer).issues;
            if !issues.is_empty() {
                let outcome = hive_refine::run_refinement_loop(
                    &self.router,
                    &self.registry,
                    self.research.as_deref(),
                    &request.query,
                    &final_answer,
                    &models[0],
                    request.task_category,
                    &request.available_model_ids,
                    &self.config.refinement,
                    request.correlation_id,
                )
                .await?;
                final_answer = outcome.final_answer.clone();
                confidence = outcome.final_score.max(confidence);
                refinement = Some(outcome);
            }
        }

        Ok(Response {
            final_answer,
            confidence,
            correlation_id: request.correlation_id,
            path: OrchestrationPath::Ensemble,
            models_used: models,
            strategy_used: Some(kind.label().to_owned()),
            cascade: None,
            consensus: Some(consensus),
            refinement,
            total_latency_ms: 0,
        })
    }

    /// Refine when the merged answer falls short of the configured
    /// convergence bar, or when the caller asked for the top accuracy
    /// level regardless of how confident consensus already is
    /// (`spec.md` §3: `accuracy_level=5` is "maximum effort").
    fn should_refine(&self, request: &Request, confidence: f64) -> bool {
        request.accuracy_level.value() >= 5 || confidence < self.config.refinement.convergence_threshold
    }
}
