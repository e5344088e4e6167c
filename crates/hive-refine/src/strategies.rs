//! The six refinement strategies (`spec.md` §4.6 step 3). Each takes
//! the current answer plus the issues that flagged it and produces a
//! new answer.

use std::collections::BTreeSet;

use futures::future::try_join_all;
use hive_core::{CorrelationId, ErrorKind, HiveError, TaskCategory, VerificationIssue};
use hive_provider::{ChatParams, Message, ProviderRouter};
use hive_selector::{ModelRegistry, OptimizeFor, select_best};

use crate::research::ResearchProvider;

async fn call(router: &ProviderRouter, model_id: &str, prompt: &str, correlation_id: CorrelationId, stage: &str) -> Result<String, HiveError> {
    let messages = [Message::user(prompt)];
    let response = router.dispatch(model_id, &messages, &ChatParams::default(), correlation_id, stage).await?;
    Ok(response.content)
}

fn issues_block(issues: &[VerificationIssue]) -> String {
    issues
        .iter()
        .map(|issue| match &issue.correction_hint {
            Some(hint) => format!("- {} (correct value: {hint})", issue.claim),
            None => format!("- {}", issue.claim),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Re-ask with the flagged issues enumerated as an "IMPORTANT" section.
pub async fn prompt_enhance(
    router: &ProviderRouter,
    model_id: &str,
    query: &str,
    issues: &[VerificationIssue],
    correlation_id: CorrelationId,
) -> Result<String, HiveError> {
    let prompt = format!("{query}\n\nIMPORTANT: your previous answer had these issues, address them:\n{}", issues_block(issues));
    call(router, model_id, &prompt, correlation_id, "refine:prompt_enhance").await
}

/// Pick a different model of comparable capability and re-ask with the
/// original query.
pub async fn model_switch(
    router: &ProviderRouter,
    registry: &ModelRegistry,
    query: &str,
    category: TaskCategory,
    current_model: &str,
    available_model_ids: &BTreeSet<String>,
    correlation_id: CorrelationId,
) -> Result<(String, String), HiveError> {
    let candidates: BTreeSet<String> = available_model_ids.iter().filter(|id| id.as_str() != current_model).cloned().collect();
    let Some(model_id) = select_best(registry, &candidates, category, OptimizeFor::Quality) else {
        return Err(HiveError::new(ErrorKind::Validation, "no alternate model available for model_switch", correlation_id));
    };
    let answer = call(router, &model_id, query, correlation_id, "refine:model_switch").await?;
    Ok((answer, model_id))
}

/// Fetch evidence via the external Research interface and substitute in
/// any corrections it returns.
pub async fn web_search(
    research: &dyn ResearchProvider,
    answer: &str,
    issues: &[VerificationIssue],
    correlation_id: CorrelationId,
) -> Result<String, HiveError> {
    let claims: Vec<String> = issues.iter().map(|issue| issue.claim.clone()).collect();
    let report = research
        .verify(answer, &claims)
        .await
        .map_err(|e| HiveError::new(ErrorKind::Planning, e.message, correlation_id))?;

    let mut corrected = answer.to_owned();
    for item in report.items {
        if let Some(correction) = item.correction {
            corrected = corrected.replace(&item.text, &correction);
        }
    }
    Ok(corrected)
}

/// Ask a model to edit the answer to fix the listed issues directly.
pub async fn direct_correct(
    router: &ProviderRouter,
    model_id: &str,
    answer: &str,
    issues: &[VerificationIssue],
    correlation_id: CorrelationId,
) -> Result<String, HiveError> {
    let prompt = format!(
        "Fix the following issues in this answer, returning only the corrected answer:\n\nAnswer:\n{answer}\n\nIssues:\n{}",
        issues_block(issues)
    );
    call(router, model_id, &prompt, correlation_id, "refine:direct_correct").await
}

/// Split the query into sub-questions and re-answer each concurrently,
/// stitching the results back together.
pub async fn decompose(router: &ProviderRouter, model_id: &str, query: &str, correlation_id: CorrelationId) -> Result<String, HiveError> {
    let sub_questions: Vec<String> = query
        .split('?')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("{segment}?"))
        .collect();

    if sub_questions.len() <= 1 {
        return call(router, model_id, query, correlation_id, "refine:decompose").await;
    }

    let answers = try_join_all(
        sub_questions
            .iter()
            .map(|question| call(router, model_id, question, correlation_id, "refine:decompose")),
    )
    .await?;

    Ok(sub_questions
        .iter()
        .zip(answers)
        .map(|(question, answer)| format!("{question} {answer}"))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Delegate to the Reasoning Strategy Controller's own
/// `chain_of_thought` rather than re-implementing the prompt shape.
pub async fn chain_of_thought(router: &ProviderRouter, model_id: &str, query: &str, correlation_id: CorrelationId) -> Result<String, HiveError> {
    let outcome = hive_strategy::chain_of_thought(router, model_id, query, correlation_id).await?;
    Ok(outcome.answer)
}
