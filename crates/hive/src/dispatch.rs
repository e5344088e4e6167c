//! Turns a chosen `StrategyKind` plus a model pool into one or more
//! `ModelResponse`s ready for the Consensus Manager (`spec.md` §2's
//! flow: "hands them to a Strategy ... results are combined by the
//! Consensus Manager").
//!
//! The ten strategies split into three shapes: single-model strategies
//! run independently across every selected model so consensus has
//! something to combine; paired strategies are one indivisible
//! two-model collaboration; ensemble strategies already consume the
//! whole pool internally. Either way this always returns at least one
//! `ModelResponse`, so the caller can call `hive_consensus::merge`
//! unconditionally.

use std::time::Instant;

use hive_config::StrategyConfig;
use hive_core::{CorrelationId, ErrorKind, HiveError, ModelResponse};
use hive_provider::ProviderRouter;
use hive_strategy::{StrategyKind, StrategyOutcome};

fn to_response(model_id: &str, outcome: &StrategyOutcome, latency_ms: u64, correlation_id: CorrelationId) -> ModelResponse {
    ModelResponse::new(model_id, outcome.answer.clone(), 0, latency_ms, outcome.confidence, correlation_id)
}

async fn timed<F>(fut: F) -> (Result<StrategyOutcome, HiveError>, u64)
where
    F: std::future::Future<Output = Result<StrategyOutcome, HiveError>>,
{
    let started = Instant::now();
    let result = fut.await;
    (result, u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX))
}

/// Run `kind` over `models` and return the resulting `ModelResponse`s
/// plus the single `StrategyOutcome` the caller can surface as
/// `Response::strategy_used`'s reasoning trace owner.
///
/// # Errors
///
/// `ErrorKind::AllProvidersFailed` if every independent per-model call
/// failed (single-model strategies only); otherwise whatever the
/// underlying strategy call returns.
pub async fn run_strategy(
    router: &ProviderRouter,
    kind: StrategyKind,
    models: &[String],
    query: &str,
    strategy_config: &StrategyConfig,
    correlation_id: CorrelationId,
) -> Result<(Vec<ModelResponse>, StrategyOutcome), HiveError> {
    match kind {
        StrategyKind::Direct | StrategyKind::ChainOfThought | StrategyKind::TreeOfThoughts => {
            let calls = models.iter().map(|model_id| {
                let model_id = model_id.clone();
                async move {
                    let outcome = match kind {
                        StrategyKind::Direct => hive_strategy::direct(router, &model_id, query, correlation_id).await,
                        StrategyKind::ChainOfThought => hive_strategy::chain_of_thought(router, &model_id, query, correlation_id).await,
                        StrategyKind::TreeOfThoughts => {
                            hive_strategy::tree_of_thoughts(router, &model_id, query, strategy_config.max_depth, correlation_id).await
                        }
                        _ => unreachable!("matched above"),
                    };
                    let (outcome, latency_ms) = timed(async { outcome }).await;
                    outcome.map(|o| (model_id, o, latency_ms))
                }
            });
            let attempts = futures::future::join_all(calls).await;
            let oks: Vec<_> = attempts.into_iter().filter_map(Result::ok).collect();
            let Some((_, best, _)) = oks.iter().max_by(|a, b| a.1.confidence.total_cmp(&b.1.confidence)) else {
                return Err(HiveError::new(ErrorKind::AllProvidersFailed, "every model failed for the selected strategy", correlation_id));
            };
            let best = best.clone();
            let responses = oks.iter().map(|(model_id, outcome, latency_ms)| to_response(model_id, outcome, *latency_ms, correlation_id)).collect();
            Ok((responses, best))
        }
        StrategyKind::Reflection | StrategyKind::StepVerify => {
            let solver = models.first().ok_or_else(|| HiveError::new(ErrorKind::Validation, "at least one model is required", correlation_id))?;
            let critic = models.get(1).unwrap_or(solver);
            let started = Instant::now();
            let outcome = match kind {
                StrategyKind::Reflection => hive_strategy::reflection(router, solver, critic, query, correlation_id).await?,
                StrategyKind::StepVerify => hive_strategy::step_verify(router, solver, critic, query, correlation_id).await?,
                _ => unreachable!("matched above"),
            };
            let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            let response = to_response(solver, &outcome, latency_ms, correlation_id);
            Ok((vec![response], outcome))
        }
        StrategyKind::SelfConsistency | StrategyKind::Debate | StrategyKind::BestOfN | StrategyKind::Mixture | StrategyKind::Progressive => {
            let anchor = models.first().ok_or_else(|| HiveError::new(ErrorKind::Validation, "at least one model is required", correlation_id))?;
            let started = Instant::now();
            let outcome = match kind {
                StrategyKind::SelfConsistency => hive_strategy::self_consistency(router, models, query, strategy_config.default_samples, correlation_id).await?,
                StrategyKind::Debate => hive_strategy::debate(router, models, query, correlation_id).await?,
                StrategyKind::BestOfN => hive_strategy::best_of_n(router, models, query, strategy_config.default_samples, correlation_id).await?,
                StrategyKind::Mixture => hive_strategy::mixture(router, models, query, correlation_id).await?,
                StrategyKind::Progressive => {
                    hive_strategy::progressive(router, models, query, strategy_config.max_depth, strategy_config.confidence_threshold, correlation_id).await?
                }
                _ => unreachable!("matched above"),
            };
            let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            let response = to_response(anchor, &outcome, latency_ms, correlation_id);
            Ok((vec![response], outcome))
        }
    }
}
