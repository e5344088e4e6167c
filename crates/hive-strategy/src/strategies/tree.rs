//! `tree_of_thoughts` (`spec.md` §4.3): branch into distinct approaches,
//! score each, then finish from the best.

use hive_core::{CorrelationId, HiveError};
use hive_core::text::extract_final_answer;
use hive_provider::ProviderRouter;

use crate::call::call;
use crate::scoring::extract_score;
use crate::types::StrategyOutcome;

/// Generate up to `max_approaches` distinct approaches, score a
/// reasoning trace for each, then produce the final answer from the
/// highest-scored trace. Confidence = best_score/10.
pub async fn tree_of_thoughts(
    router: &ProviderRouter,
    model_id: &str,
    query: &str,
    max_approaches: u32,
    correlation_id: CorrelationId,
) -> Result<StrategyOutcome, HiveError> {
    let approaches_prompt =
        format!("{query}\n\nList up to {max_approaches} distinct approaches to answer this, one per line.");
    let approaches_response = call(router, model_id, &approaches_prompt, correlation_id, "tree_of_thoughts").await?;
    let mut approaches: Vec<String> = approaches_response
        .content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(max_approaches as usize)
        .map(str::to_owned)
        .collect();
    if approaches.is_empty() {
        approaches.push(query.to_owned());
    }

    let mut scored_traces = Vec::with_capacity(approaches.len());
    for approach in &approaches {
        let trace_prompt = format!(
            "Approach: {approach}\n\nQuestion: {query}\n\nWork through this approach, then rate your confidence in it from 1 to 10 as \"Score: N\"."
        );
        let trace_response = call(router, model_id, &trace_prompt, correlation_id, "tree_of_thoughts").await?;
        let score = extract_score(&trace_response.content);
        scored_traces.push((trace_response.content, score));
    }

    let (best_trace, best_score) = scored_traces
        .iter()
        .max_by_key(|(_, score)| *score)
        .cloned()
        .expect("at least one approach was scored");

    let final_prompt = format!("Reasoning:\n{best_trace}\n\nGive the final answer to: {query}");
    let final_response = call(router, model_id, &final_prompt, correlation_id, "tree_of_thoughts").await?;

    Ok(StrategyOutcome {
        answer: extract_final_answer(&final_response.content),
        confidence: f64::from(best_score) / 10.0,
        reasoning_trace: Some(best_trace),
        alternatives_considered: approaches,
        models_used: vec![model_id.to_owned()],
        verified: false,
    })
}
