//! `self_consistency` and `best_of_N` (`spec.md` §4.3): N concurrent
//! generations, round-robin over the provided models, reduced by vote or
//! by self-rated score.

use std::collections::HashMap;

use futures::future::try_join_all;
use hive_core::text::{extract_final_answer, normalize};
use hive_core::{CorrelationId, HiveError};
use hive_provider::ProviderRouter;

use crate::call::call;
use crate::scoring::extract_score;
use crate::types::{StrategyOutcome, dedup_preserving_order};

/// N parallel CoT calls, round-robin over `models`; majority-vote on the
/// normalized final answer. Confidence = plurality_count / N. Ties are
/// broken by lexical order of the normalized form, the same deterministic
/// rule voting uses.
pub async fn self_consistency(
    router: &ProviderRouter,
    models: &[String],
    query: &str,
    n: u32,
    correlation_id: CorrelationId,
) -> Result<StrategyOutcome, HiveError> {
    assert!(!models.is_empty(), "self_consistency requires at least one model");
    let prompt = format!("{query}\n\nThink step by step, then state your final answer.");

    let calls = (0..n).map(|i| {
        let model_id = models[i as usize % models.len()].clone();
        let prompt = prompt.clone();
        async move {
            let response = call(router, &model_id, &prompt, correlation_id, "self_consistency").await?;
            Ok::<_, HiveError>((model_id, extract_final_answer(&response.content)))
        }
    });
    let results = try_join_all(calls).await?;

    let mut groups: HashMap<String, (String, u32)> = HashMap::new();
    for (_, answer) in &results {
        let entry = groups.entry(normalize(answer)).or_insert_with(|| (answer.clone(), 0));
        entry.1 += 1;
    }
    let (_, winning_answer, plurality_count) = groups
        .into_iter()
        .map(|(key, (answer, count))| (key, answer, count))
        .max_by(|a, b| a.2.cmp(&b.2).then_with(|| a.0.cmp(&b.0)))
        .expect("at least one sample was collected");

    Ok(StrategyOutcome {
        answer: winning_answer,
        confidence: f64::from(plurality_count) / f64::from(n),
        reasoning_trace: None,
        alternatives_considered: results.iter().map(|(_, answer)| answer.clone()).collect(),
        models_used: dedup_preserving_order(results.into_iter().map(|(model_id, _)| model_id)),
        verified: false,
    })
}

/// N parallel generations, round-robin over `models`, each self-scored
/// 1-10; returns the highest-scored. Confidence = best_score/10.
pub async fn best_of_n(
    router: &ProviderRouter,
    models: &[String],
    query: &str,
    n: u32,
    correlation_id: CorrelationId,
) -> Result<StrategyOutcome, HiveError> {
    assert!(!models.is_empty(), "best_of_n requires at least one model");
    let prompt = format!("{query}\n\nProvide your best answer, then rate your own confidence from 1 to 10 as \"Score: N\".");

    let calls = (0..n).map(|i| {
        let model_id = models[i as usize % models.len()].clone();
        let prompt = prompt.clone();
        async move {
            let response = call(router, &model_id, &prompt, correlation_id, "best_of_n").await?;
            let score = extract_score(&response.content);
            Ok::<_, HiveError>((model_id, response.content, score))
        }
    });
    let mut results = try_join_all(calls).await?;
    results.sort_by(|a, b| b.2.cmp(&a.2));
    let (_, best_answer, best_score) = results[0].clone();
    let alternatives = results[1..].iter().map(|(_, answer, _)| answer.clone()).collect();

    Ok(StrategyOutcome {
        answer: best_answer,
        confidence: f64::from(best_score) / 10.0,
        reasoning_trace: None,
        alternatives_considered: alternatives,
        models_used: dedup_preserving_order(results.into_iter().map(|(model_id, _, _)| model_id)),
        verified: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::scripted_router;

    #[tokio::test]
    async fn self_consistency_picks_the_plurality_answer() {
        let router = scripted_router(&[
            ("m1", "final answer: 42"),
            ("m2", "final answer: 42"),
            ("m3", "final answer: 7"),
        ]);
        let models = vec!["m1".to_owned(), "m2".to_owned(), "m3".to_owned()];
        let outcome = self_consistency(&router, &models, "what is 6*7?", 3, CorrelationId::generate())
            .await
            .unwrap();
        assert_eq!(outcome.answer, "42");
        assert!((outcome.confidence - (2.0 / 3.0)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn self_consistency_round_robins_over_fewer_models_than_samples() {
        let router = scripted_router(&[("m1", "final answer: a")]);
        let models = vec!["m1".to_owned()];
        let outcome = self_consistency(&router, &models, "q", 4, CorrelationId::generate())
            .await
            .unwrap();
        assert!((outcome.confidence - 1.0).abs() < 1e-9);
        assert_eq!(outcome.models_used, vec!["m1".to_owned()]);
    }

    #[tokio::test]
    async fn self_consistency_breaks_an_exact_tie_lexically() {
        let router = scripted_router(&[("m1", "final answer: zebra"), ("m2", "final answer: apple")]);
        let models = vec!["m1".to_owned(), "m2".to_owned()];
        let outcome = self_consistency(&router, &models, "q", 2, CorrelationId::generate())
            .await
            .unwrap();
        assert_eq!(outcome.answer, "apple");
    }

    #[tokio::test]
    async fn best_of_n_returns_the_highest_self_rated_answer() {
        let router = scripted_router(&[
            ("m1", "A decent answer. Score: 6"),
            ("m2", "A sharper answer. Score: 9"),
        ]);
        let models = vec!["m1".to_owned(), "m2".to_owned()];
        let outcome = best_of_n(&router, &models, "q", 2, CorrelationId::generate()).await.unwrap();
        assert!(outcome.answer.contains("sharper"));
        assert!((outcome.confidence - 0.9).abs() < 1e-9);
    }
}
