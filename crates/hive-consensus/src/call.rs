//! Shared dispatch primitive for the merge strategies that ask a model
//! to do the merging (`weighted_merge`, `synthesize`, `debate`'s judge
//! and per-round updates).

use hive_core::{CorrelationId, HiveError, ModelResponse};
use hive_provider::{ChatParams, Message, ProviderRouter};

pub(crate) async fn call(
    router: &ProviderRouter,
    model_id: &str,
    prompt: &str,
    correlation_id: CorrelationId,
    stage: &str,
) -> Result<ModelResponse, HiveError> {
    let messages = [Message::user(prompt)];
    router.dispatch(model_id, &messages, &ChatParams::default(), correlation_id, stage).await
}
