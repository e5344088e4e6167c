//! `reflection` and `step_verify` (`spec.md` §4.3): generate, critique,
//! correct if needed. Both run an explicit verification step, so
//! `verified=true` on their outcomes.

use hive_core::text::contains_issue_keywords;
use hive_core::{CorrelationId, HiveError};
use hive_provider::ProviderRouter;

use crate::call::call;
use crate::types::StrategyOutcome;

/// Generate an answer, ask a critic model to list issues, and if issues
/// are detected, ask the original model for an improved answer.
/// Confidence 0.90 clean, 0.85 after correction.
pub async fn reflection(
    router: &ProviderRouter,
    model_id: &str,
    critic_model_id: &str,
    query: &str,
    correlation_id: CorrelationId,
) -> Result<StrategyOutcome, HiveError> {
    let answer = call(router, model_id, query, correlation_id, "reflection").await?;

    let critique_prompt =
        format!("Question: {query}\n\nProposed answer:\n{}\n\nList any issues with this answer.", answer.content);
    let critique = call(router, critic_model_id, &critique_prompt, correlation_id, "reflection").await?;

    let (final_answer, confidence) = if contains_issue_keywords(&critique.content) {
        let improve_prompt = format!(
            "Question: {query}\n\nOriginal answer:\n{}\n\nIssues raised:\n{}\n\nProvide an improved answer.",
            answer.content, critique.content
        );
        let improved = call(router, model_id, &improve_prompt, correlation_id, "reflection").await?;
        (improved.content, 0.85)
    } else {
        (answer.content, 0.90)
    };

    Ok(StrategyOutcome {
        answer: final_answer,
        confidence,
        reasoning_trace: Some(critique.content),
        alternatives_considered: Vec::new(),
        models_used: vec![model_id.to_owned(), critic_model_id.to_owned()],
        verified: true,
    })
}

/// Solve step-by-step, verify each step via the same keyword scan as
/// `reflection`, and re-solve with the critique attached if errors are
/// found. Confidence 0.95 clean, 0.75 after correction.
pub async fn step_verify(
    router: &ProviderRouter,
    solver_model_id: &str,
    verifier_model_id: &str,
    query: &str,
    correlation_id: CorrelationId,
) -> Result<StrategyOutcome, HiveError> {
    let solve_prompt = format!("{query}\n\nSolve this step by step.");
    let solution = call(router, solver_model_id, &solve_prompt, correlation_id, "step_verify").await?;

    let verify_prompt = format!(
        "Question: {query}\n\nProposed solution:\n{}\n\nCheck each step for errors.",
        solution.content
    );
    let verification = call(router, verifier_model_id, &verify_prompt, correlation_id, "step_verify").await?;

    let (final_answer, confidence) = if contains_issue_keywords(&verification.content) {
        let correction_prompt = format!(
            "Question: {query}\n\nOriginal solution:\n{}\n\nCritique:\n{}\n\nRe-solve, addressing the critique.",
            solution.content, verification.content
        );
        let corrected = call(router, solver_model_id, &correction_prompt, correlation_id, "step_verify").await?;
        (corrected.content, 0.75)
    } else {
        (solution.content, 0.95)
    };

    Ok(StrategyOutcome {
        answer: final_answer,
        confidence,
        reasoning_trace: Some(verification.content),
        alternatives_considered: Vec::new(),
        models_used: vec![solver_model_id.to_owned(), verifier_model_id.to_owned()],
        verified: true,
    })
}
