//! The Consensus Manager's facade (`spec.md` §4.5): detect conflict,
//! select a strategy, merge, and score the result.

use hive_config::ConsensusConfig;
use hive_core::text::{extract_points, normalize};
use hive_core::{CorrelationId, ErrorKind, HiveError, ModelResponse, TaskCategory};
use hive_provider::ProviderRouter;

use crate::best_of::best_of;
use crate::conflict::detect_conflict;
use crate::debate::debate;
use crate::scoring::quality_heuristic;
use crate::select::select_strategy;
use crate::synthesize::synthesize;
use crate::types::{ConsensusResult, ConsensusScore, ConsensusStrategy};
use crate::voting::vote;
use crate::weighted_merge::weighted_merge;

/// Merge `responses` into one `ConsensusResult`. `judge_model_id` is used
/// by the strategies that ask a model to do the merging
/// (`weighted_merge`, `synthesize`, `debate`'s judge).
///
/// # Errors
///
/// Returns `ErrorKind::Validation` if `responses` is empty, or whatever
/// the underlying dispatch returns for the model-calling strategies.
pub async fn merge(
    router: &ProviderRouter,
    judge_model_id: &str,
    query: &str,
    task_category: TaskCategory,
    responses: &[ModelResponse],
    config: &ConsensusConfig,
    correlation_id: CorrelationId,
) -> Result<ConsensusResult, HiveError> {
    if responses.is_empty() {
        return Err(HiveError::new(
            ErrorKind::Validation,
            "consensus requires at least one response",
            correlation_id,
        ));
    }

    let (mean_similarity, conflict) = detect_conflict(responses);
    let strategy = select_strategy(task_category, conflict, responses.len());
    tracing::debug!(?strategy, ?conflict, mean_similarity, response_count = responses.len(), "consensus strategy selected");

    let (final_answer, agreement_rate) = match strategy {
        ConsensusStrategy::Voting => vote(responses),
        ConsensusStrategy::BestOf => best_of(responses),
        ConsensusStrategy::WeightedMerge => {
            let merged = weighted_merge(router, judge_model_id, query, responses, correlation_id).await?;
            (merged, mean_similarity)
        }
        ConsensusStrategy::Synthesize => {
            let synthesis = synthesize(router, judge_model_id, query, responses, correlation_id).await?;
            (synthesis, mean_similarity)
        }
        ConsensusStrategy::Debate => {
            let verdict =
                debate(router, query, responses, config.max_debate_rounds, judge_model_id, correlation_id).await?;
            (verdict, mean_similarity)
        }
    };

    #[allow(clippy::cast_precision_loss)]
    let confidence_weighted = responses.iter().map(|r| r.raw_confidence).sum::<f64>() / responses.len() as f64;
    let quality = quality_heuristic(&final_answer);
    let overall = ((agreement_rate + confidence_weighted + quality) / 3.0).clamp(0.0, 1.0);

    let key_agreements = extract_points(&final_answer);
    let winner_key = normalize(&final_answer);
    let key_disagreements = responses
        .iter()
        .filter(|r| normalize(&r.content) != winner_key)
        .flat_map(|r| extract_points(&r.content))
        .collect();

    Ok(ConsensusResult {
        final_answer,
        strategy_used: strategy,
        participating_models: responses.iter().map(|r| r.model_id.clone()).collect(),
        score: ConsensusScore {
            overall,
            agreement_rate,
            confidence_weighted,
            quality,
        },
        key_agreements,
        key_disagreements,
    })
}
