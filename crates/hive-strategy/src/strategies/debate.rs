//! `debate` (`spec.md` §4.3): two or three models state positions, see
//! each other's positions, rebut, and a judge picks the strongest.

use futures::future::try_join_all;
use hive_core::{CorrelationId, HiveError};
use hive_provider::ProviderRouter;

use crate::call::call;
use crate::types::{StrategyOutcome, dedup_preserving_order};

/// Run a debate over `models` (2 or 3 participants). With 3 or more,
/// the last model is the designated judge and does not itself debate;
/// with fewer than 3, the spec names no separate judge, so the first
/// debater doubles as judge after the debate round.
pub async fn debate(
    router: &ProviderRouter,
    models: &[String],
    query: &str,
    correlation_id: CorrelationId,
) -> Result<StrategyOutcome, HiveError> {
    assert!(!models.is_empty(), "debate requires at least one model");
    let (debaters, judge): (&[String], &str) = if models.len() >= 3 {
        (&models[..models.len() - 1], models.last().unwrap().as_str())
    } else {
        (models, models[0].as_str())
    };

    let position_prompt = format!("{query}\n\nState your position and reasoning.");
    let position_calls = debaters.iter().map(|model_id| {
        let prompt = position_prompt.clone();
        async move {
            let response = call(router, model_id, &prompt, correlation_id, "debate").await?;
            Ok::<_, HiveError>((model_id.clone(), response.content))
        }
    });
    let positions = try_join_all(position_calls).await?;

    let rebuttal_calls = positions.iter().map(|(model_id, _)| {
        let peers: String = positions
            .iter()
            .filter(|(peer_id, _)| peer_id != model_id)
            .map(|(peer_id, position)| format!("{peer_id}: {position}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let prompt = format!("{query}\n\nOther positions:\n{peers}\n\nGiven these, restate your strongest position.");
        async move {
            let response = call(router, model_id, &prompt, correlation_id, "debate").await?;
            Ok::<_, HiveError>((model_id.clone(), response.content))
        }
    });
    let rebuttals = try_join_all(rebuttal_calls).await?;

    let options: String = rebuttals
        .iter()
        .enumerate()
        .map(|(i, (model_id, position))| format!("Position {}: ({model_id}) {position}", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n");
    let judge_prompt = format!("{query}\n\n{options}\n\nWhich position is strongest? Restate it as the final answer.");
    let verdict = call(router, judge, &judge_prompt, correlation_id, "debate").await?;

    let mut models_used: Vec<String> = debaters.to_vec();
    models_used.push(judge.to_owned());

    Ok(StrategyOutcome {
        answer: verdict.content,
        confidence: 0.85,
        reasoning_trace: Some(options),
        alternatives_considered: rebuttals.into_iter().map(|(_, position)| position).collect(),
        models_used: dedup_preserving_order(models_used),
        verified: false,
    })
}
