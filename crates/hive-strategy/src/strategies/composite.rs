//! `progressive` and `mixture` (`spec.md` §4.3): strategies built on top
//! of the other nine.

use std::collections::HashMap;

use hive_core::text::normalize;
use hive_core::{CorrelationId, HiveError};
use hive_provider::ProviderRouter;

use super::sampling::self_consistency;
use super::single_call::{chain_of_thought, direct};
use super::tree::tree_of_thoughts;
use crate::strategies::critique::reflection;
use crate::types::{StrategyOutcome, dedup_preserving_order};

/// Attempt `direct` → `chain_of_thought` → `self_consistency(3)` →
/// `tree_of_thoughts`, stopping at the first result meeting
/// `confidence_threshold`; `tree_of_thoughts` is returned unconditionally
/// as the last resort.
pub async fn progressive(
    router: &ProviderRouter,
    models: &[String],
    query: &str,
    max_approaches: u32,
    confidence_threshold: f64,
    correlation_id: CorrelationId,
) -> Result<StrategyOutcome, HiveError> {
    assert!(!models.is_empty(), "progressive requires at least one model");
    let primary = &models[0];

    let attempt = direct(router, primary, query, correlation_id).await?;
    if attempt.confidence >= confidence_threshold {
        return Ok(attempt);
    }

    let attempt = chain_of_thought(router, primary, query, correlation_id).await?;
    if attempt.confidence >= confidence_threshold {
        return Ok(attempt);
    }

    let attempt = self_consistency(router, models, query, 3, correlation_id).await?;
    if attempt.confidence >= confidence_threshold {
        return Ok(attempt);
    }

    tree_of_thoughts(router, primary, query, max_approaches, correlation_id).await
}

/// Run `chain_of_thought`, `self_consistency(3)`, and `reflection`
/// concurrently; weight each answer by its reported confidence, group by
/// normalized form, and return the highest weight-sum group in its
/// original form. Confidence = winning_weight / total_weight, capped at
/// 0.95.
pub async fn mixture(
    router: &ProviderRouter,
    models: &[String],
    query: &str,
    correlation_id: CorrelationId,
) -> Result<StrategyOutcome, HiveError> {
    assert!(!models.is_empty(), "mixture requires at least one model");
    let primary = &models[0];
    let critic = models.get(1).unwrap_or(primary);

    let (cot, sample, critique) = tokio::try_join!(
        chain_of_thought(router, primary, query, correlation_id),
        self_consistency(router, models, query, 3, correlation_id),
        reflection(router, primary, critic, query, correlation_id),
    )?;

    let candidates = [cot, sample, critique];
    let mut total_weight = 0.0;
    let mut groups: HashMap<String, (String, f64)> = HashMap::new();
    for candidate in &candidates {
        total_weight += candidate.confidence;
        let key = normalize(&candidate.answer);
        let entry = groups.entry(key).or_insert_with(|| (candidate.answer.clone(), 0.0));
        entry.1 += candidate.confidence;
    }

    let (winning_answer, winning_weight) = groups
        .into_values()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .expect("at least one candidate was collected");

    let confidence = if total_weight > 0.0 {
        (winning_weight / total_weight).min(0.95)
    } else {
        0.0
    };

    let models_used = dedup_preserving_order(candidates.iter().flat_map(|c| c.models_used.clone()));
    let alternatives_considered = candidates.iter().map(|c| c.answer.clone()).collect();

    Ok(StrategyOutcome {
        answer: winning_answer,
        confidence,
        reasoning_trace: None,
        alternatives_considered,
        models_used,
        verified: false,
    })
}
