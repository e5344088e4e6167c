//! `direct` and `chain_of_thought` (`spec.md` §4.3): one call each, no
//! branching.

use hive_core::{CorrelationId, HiveError};
use hive_core::text::extract_final_answer;
use hive_provider::ProviderRouter;

use crate::call::call;
use crate::types::StrategyOutcome;

/// One call, no instruction shaping; confidence fixed at 0.7.
pub async fn direct(
    router: &ProviderRouter,
    model_id: &str,
    query: &str,
    correlation_id: CorrelationId,
) -> Result<StrategyOutcome, HiveError> {
    let response = call(router, model_id, query, correlation_id, "direct").await?;
    Ok(StrategyOutcome {
        answer: response.content,
        confidence: 0.7,
        reasoning_trace: None,
        alternatives_considered: Vec::new(),
        models_used: vec![model_id.to_owned()],
        verified: false,
    })
}

/// One call with a step-by-step instruction; the final answer is
/// extracted by scanning for explicit markers. Confidence fixed at 0.8.
pub async fn chain_of_thought(
    router: &ProviderRouter,
    model_id: &str,
    query: &str,
    correlation_id: CorrelationId,
) -> Result<StrategyOutcome, HiveError> {
    let prompt = format!("{query}\n\nThink step by step, then state your final answer.");
    let response = call(router, model_id, &prompt, correlation_id, "chain_of_thought").await?;
    let answer = extract_final_answer(&response.content);
    Ok(StrategyOutcome {
        answer,
        confidence: 0.8,
        reasoning_trace: Some(response.content),
        alternatives_considered: Vec::new(),
        models_used: vec![model_id.to_owned()],
        verified: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::scripted_router;

    #[tokio::test]
    async fn direct_returns_fixed_confidence() {
        let router = scripted_router(&[("m1", "[m1] echoed")]);
        let outcome = direct(&router, "m1", "2+2?", CorrelationId::generate()).await.unwrap();
        assert!((outcome.confidence - 0.7).abs() < 1e-9);
        assert_eq!(outcome.models_used, vec!["m1".to_owned()]);
    }

    #[tokio::test]
    async fn chain_of_thought_extracts_final_answer_marker() {
        let router = scripted_router(&[("m1", "reasoning...\nfinal answer: 4")]);
        let outcome = chain_of_thought(&router, "m1", "2+2?", CorrelationId::generate()).await.unwrap();
        assert_eq!(outcome.answer, "4");
        assert!((outcome.confidence - 0.8).abs() < 1e-9);
        assert!(outcome.reasoning_trace.is_some());
    }
}
