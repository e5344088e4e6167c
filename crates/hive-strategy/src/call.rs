//! The shared call primitive every strategy is built from (`spec.md`
//! §4.3: "Common primitive: `call(model_id, prompt) → text` routes
//! through §4.1").

use hive_core::{CorrelationId, HiveError, ModelResponse};
use hive_provider::{ChatParams, Message, ProviderRouter};

/// Dispatch one prompt to `model_id` through the Provider Router,
/// tagging the telemetry/stage label with this strategy's name.
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
