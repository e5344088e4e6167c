//! `weighted_merge` (`spec.md` §4.5): ask a model to merge responses,
//! preserving the facts from the highest-weighted ones.
//!
//! `spec.md` names the weight as "skill × quality", but the Consensus
//! Manager's input contract (`spec.md` §3) is a bare list of
//! `ModelResponse`, with no model-profile/skill data attached. Resolved
//! as each response's own `raw_confidence`, the only per-response
//! quality signal this contract carries.

use hive_core::ModelResponse;
use hive_core::{CorrelationId, HiveError};
use hive_provider::ProviderRouter;

use crate::call::call;

/// Compose a prompt listing each response with its weight and ask
/// `merge_model_id` to merge them, preserving the highest-weighted
/// facts.
pub async fn weighted_merge(
    router: &ProviderRouter,
    merge_model_id: &str,
    query: &str,
    responses: &[ModelResponse],
    correlation_id: CorrelationId,
) -> Result<String, HiveError> {
    assert!(!responses.is_empty(), "weighted_merge requires at least one response");

    let entries: String = responses
        .iter()
        .map(|r| format!("[weight {:.2}] {}", r.raw_confidence, r.content))
        .collect::<Vec<_>>()
        .join("\n\n");
    let prompt = format!(
        "Question: {query}\n\nCandidate answers, each tagged with its weight:\n\n{entries}\n\nMerge these into one answer, preserving the facts from the highest-weighted candidates."
    );

    let merged = call(router, merge_model_id, &prompt, correlation_id, "weighted_merge").await?;
    Ok(merged.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::scripted_router;

    #[tokio::test]
    async fn merges_via_the_designated_model() {
        let router = scripted_router(&[("merger", "merged answer")]);
        let responses = vec![
            ModelResponse::new("a", "answer a", 10, 10, 0.6, CorrelationId::generate()),
            ModelResponse::new("b", "answer b", 10, 10, 0.9, CorrelationId::generate()),
        ];
        let merged = weighted_merge(&router, "merger", "q", &responses, CorrelationId::generate())
            .await
            .unwrap();
        assert_eq!(merged, "merged answer");
    }
}
