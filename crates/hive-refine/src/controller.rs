//! The Refinement Loop Controller's facade (`spec.md` §4.6): iterate
//! verify → select-strategy → apply until converged, stagnant, or out
//! of iterations.

use std::collections::BTreeSet;
use std::time::Instant;

use hive_config::RefinementConfig;
use hive_core::{CorrelationId, ErrorKind, HiveError, RefinementIteration, TaskCategory, VerificationIssue};
use hive_provider::ProviderRouter;
use hive_selector::ModelRegistry;

use crate::research::ResearchProvider;
use crate::select::select_strategy;
use crate::strategies;
use crate::types::{FinalStatus, RefinementOutcome, RefinementStrategyKind};

fn resolved_since(previous: &[VerificationIssue], current: &[VerificationIssue]) -> Vec<VerificationIssue> {
    previous.iter().filter(|issue| !current.iter().any(|c| c.claim == issue.claim)).cloned().collect()
}

#[allow(clippy::too_many_arguments)]
async fn apply_strategy(
    strategy: RefinementStrategyKind,
    router: &ProviderRouter,
    registry: &ModelRegistry,
    research: Option<&dyn ResearchProvider>,
    query: &str,
    answer: &str,
    task_category: TaskCategory,
    current_model: &str,
    available_model_ids: &BTreeSet<String>,
    issues: &[VerificationIssue],
    correlation_id: CorrelationId,
) -> Result<(String, String), HiveError> {
    match strategy {
        RefinementStrategyKind::PromptEnhance => {
            let answer = strategies::prompt_enhance(router, current_model, query, issues, correlation_id).await?;
            Ok((answer, current_model.to_owned()))
        }
        RefinementStrategyKind::ModelSwitch => {
            strategies::model_switch(router, registry, query, task_category, current_model, available_model_ids, correlation_id).await
        }
        RefinementStrategyKind::WebSearch => {
            let research = research.ok_or_else(|| {
                HiveError::new(ErrorKind::Validation, "web_search strategy selected but no research provider is wired", correlation_id)
            })?;
            let answer = strategies::web_search(research, answer, issues, correlation_id).await?;
            Ok((answer, current_model.to_owned()))
        }
        RefinementStrategyKind::DirectCorrect => {
            let answer = strategies::direct_correct(router, current_model, answer, issues, correlation_id).await?;
            Ok((answer, current_model.to_owned()))
        }
        RefinementStrategyKind::Decompose => {
            let answer = strategies::decompose(router, current_model, query, correlation_id).await?;
            Ok((answer, current_model.to_owned()))
        }
        RefinementStrategyKind::ChainOfThought => {
            let answer = strategies::chain_of_thought(router, current_model, query, correlation_id).await?;
            Ok((answer, current_model.to_owned()))
        }
    }
}

/// Run the refinement loop starting from `initial_answer` (`spec.md`
/// §4.6's algorithm, steps 1-6).
///
/// # Errors
///
/// This function itself is infallible with respect to the loop's
/// control flow (a failing strategy application is caught and recorded
/// as a no-op rather than propagated); it returns `Err` only if
/// `available_model_ids` is empty, since no strategy could ever run.
#[allow(clippy::too_many_arguments)]
pub async fn run_refinement_loop(
    router: &ProviderRouter,
    registry: &ModelRegistry,
    research: Option<&dyn ResearchProvider>,
    query: &str,
    initial_answer: &str,
    model_id: &str,
    task_category: TaskCategory,
    available_model_ids: &BTreeSet<String>,
    config: &RefinementConfig,
    correlation_id: CorrelationId,
) -> Result<RefinementOutcome, HiveError> {
    if available_model_ids.is_empty() {
        return Err(HiveError::new(ErrorKind::Validation, "refinement loop requires at least one available model", correlation_id));
    }

    let mut answer = initial_answer.to_owned();
    let mut current_model = model_id.to_owned();
    let mut used: Vec<RefinementStrategyKind> = Vec::new();
    let mut iterations: Vec<RefinementIteration> = Vec::new();
    let mut convergence_history: Vec<f64> = Vec::new();
    let mut strategies_used: Vec<String> = Vec::new();
    let mut transparency_notes: Vec<String> = Vec::new();
    let mut previous_score: Option<f64> = None;
    let mut previous_issues: Vec<VerificationIssue> = Vec::new();
    let mut stagnant_rounds = 0u32;
    let mut final_status = None;

    for iteration_index in 1..=config.max_iterations {
        let started = Instant::now();
        let verification = hive_verify::verify_answer(query, &answer);
        answer = verification.final_answer;
        let score = verification.confidence;
        let issues = verification.issues;

        if let Some(last) = iterations.last_mut() {
            last.issues_resolved = resolved_since(&previous_issues, &issues);
        }

        if score >= config.convergence_threshold || issues.is_empty() {
            iterations.push(RefinementIteration {
                iteration_index,
                input_answer: answer.clone(),
                output_answer: answer.clone(),
                verification_score: score,
                issues_found: issues,
                issues_resolved: Vec::new(),
                strategy_used: "none".to_owned(),
                model_used: current_model.clone(),
                duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            });
            convergence_history.push(score);
            transparency_notes.push(format!("iteration {iteration_index}: verification passed at {score:.2}"));
            final_status = Some(FinalStatus::Passed);
            break;
        }

        let Some(strategy) = select_strategy(config, &used) else {
            convergence_history.push(score);
            transparency_notes.push(format!("iteration {iteration_index}: no untried strategy left"));
            final_status = Some(FinalStatus::NoImprovement);
            break;
        };

        let (new_answer, model_used) = match apply_strategy(
            strategy,
            router,
            registry,
            research,
            query,
            &answer,
            task_category,
            &current_model,
            available_model_ids,
            &issues,
            correlation_id,
        )
        .await
        {
            Ok(pair) => pair,
            Err(err) => {
                transparency_notes.push(format!("iteration {iteration_index}: {} failed: {}", strategy.label(), err.message));
                (answer.clone(), current_model.clone())
            }
        };

        iterations.push(RefinementIteration {
            iteration_index,
            input_answer: answer.clone(),
            output_answer: new_answer.clone(),
            verification_score: score,
            issues_found: issues.clone(),
            issues_resolved: Vec::new(),
            strategy_used: strategy.label().to_owned(),
            model_used: model_used.clone(),
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        });
        convergence_history.push(score);
        strategies_used.push(strategy.label().to_owned());
        used.push(strategy);
        transparency_notes.push(format!("iteration {iteration_index}: applied {}", strategy.label()));

        let mut stagnation_triggered = false;
        if let Some(prev) = previous_score {
            if score - prev < config.min_improvement {
                stagnant_rounds += 1;
            } else {
                stagnant_rounds = 0;
            }
            if stagnant_rounds >= config.stagnation_tolerance {
                stagnation_triggered = true;
            }
        }
        previous_score = Some(score);
        previous_issues = issues;
        answer = new_answer;
        current_model = model_used;

        if stagnation_triggered {
            transparency_notes.push(format!("iteration {iteration_index}: stagnant for {stagnant_rounds} round(s), stopping"));
            final_status = Some(FinalStatus::NoImprovement);
            break;
        }
    }

    let final_status = final_status.unwrap_or(FinalStatus::MaxIterations);
    let total_issues_found = u32::try_from(iterations.iter().map(|it| it.issues_found.len()).sum::<usize>()).unwrap_or(u32::MAX);
    let issues_resolved = u32::try_from(iterations.iter().map(|it| it.issues_resolved.len()).sum::<usize>()).unwrap_or(u32::MAX);
    let final_score = convergence_history.last().copied().unwrap_or(0.0);

    Ok(RefinementOutcome {
        final_answer: answer,
        iterations,
        final_status,
        final_score,
        total_issues_found,
        issues_resolved,
        strategies_used,
        convergence_history,
        transparency_notes,
    })
}
