//! `debate` (`spec.md` §4.5): up to `max_debate_rounds`, each model sees
//! peers' current positions (truncated to 300 chars) and updates; on
//! convergence, return any position, otherwise run a judge prompt.

use futures::future::try_join_all;
use hive_core::text::jaccard_prefix;
use hive_core::{CorrelationId, HiveError, ModelResponse};
use hive_provider::ProviderRouter;

use crate::call::call;

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Positions are "the same" if the Jaccard of the first 50 tokens of
/// every pair is at least 0.8.
fn positions_converged(positions: &[(String, String)]) -> bool {
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if jaccard_prefix(&positions[i].1, &positions[j].1, 50) < 0.8 {
                return false;
            }
        }
    }
    true
}

/// Run the consensus-level debate rounds over `responses`' existing
/// positions, then either converge or defer to `judge_model_id`.
pub async fn debate(
    router: &ProviderRouter,
    query: &str,
    responses: &[ModelResponse],
    max_rounds: u32,
    judge_model_id: &str,
    correlation_id: CorrelationId,
) -> Result<String, HiveError> {
    assert!(!responses.is_empty(), "debate requires at least one response");
    let mut positions: Vec<(String, String)> =
        responses.iter().map(|r| (r.model_id.clone(), r.content.clone())).collect();

    for _round in 0..max_rounds {
        if positions_converged(&positions) {
            return Ok(positions[0].1.clone());
        }

        let round_calls = positions.iter().map(|(model_id, current)| {
            let peers: String = positions
                .iter()
                .filter(|(peer_id, _)| peer_id != model_id)
                .map(|(peer_id, position)| format!("{peer_id}: {}", truncate(position, 300)))
                .collect::<Vec<_>>()
                .join("\n\n");
            let prompt = format!(
                "Question: {query}\n\nYour current position:\n{current}\n\nOther positions:\n{peers}\n\nUpdate your position if warranted, otherwise restate it."
            );
            let owned_model_id = model_id.clone();
            async move {
                let response = call(router, &owned_model_id, &prompt, correlation_id, "consensus_debate").await?;
                Ok::<_, HiveError>((owned_model_id, response.content))
            }
        });
        positions = try_join_all(round_calls).await?;
    }

    if positions_converged(&positions) {
        return Ok(positions[0].1.clone());
    }

    let options: String = positions
        .iter()
        .enumerate()
        .map(|(i, (model_id, position))| format!("Position {}: ({model_id}) {position}", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n");
    let judge_prompt =
        format!("Question: {query}\n\n{options}\n\nWhich position is strongest? Restate it as the final answer.");
    let verdict = call(router, judge_model_id, &judge_prompt, correlation_id, "consensus_debate").await?;
    Ok(verdict.content)
}
