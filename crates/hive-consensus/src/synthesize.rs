//! `synthesize` (`spec.md` §4.5): ask a model to produce a unified
//! answer from labeled perspectives.

use hive_core::ModelResponse;
use hive_core::{CorrelationId, HiveError};
use hive_provider::ProviderRouter;

use crate::call::call;

/// Compose a prompt listing each response as "Perspective A/B/…" and ask
/// `synthesis_model_id` to produce a unified answer.
pub async fn synthesize(
    router: &ProviderRouter,
    synthesis_model_id: &str,
    query: &str,
    responses: &[ModelResponse],
    correlation_id: CorrelationId,
) -> Result<String, HiveError> {
    assert!(!responses.is_empty(), "synthesize requires at least one response");

    let perspectives: String = responses
        .iter()
        .enumerate()
        .map(|(i, r)| format!("Perspective {}: {}", perspective_label(i), r.content))
        .collect::<Vec<_>>()
        .join("\n\n");
    let prompt = format!("Question: {query}\n\n{perspectives}\n\nProduce one unified answer drawing on these perspectives.");

    let synthesis = call(router, synthesis_model_id, &prompt, correlation_id, "synthesize").await?;
    Ok(synthesis.content)
}

fn perspective_label(index: usize) -> char {
    char::from(b'A' + u8::try_from(index % 26).unwrap_or(0))
}
