use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::ProviderCallError;
use crate::types::{ChatCompletion, ChatParams, DeltaChunk, GenerationInfo, ModelInfo, Message};

/// The Provider Backend Interface (`spec.md` §6): one implementation per
/// backend. Exact wire details are the implementor's concern; the router
/// only ever goes through this contract.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Backend name this implementation serves, e.g. `"together"`.
    fn name(&self) -> &str;

    async fn chat_completion(
        &self,
        model_native_id: &str,
        messages: &[Message],
        params: &ChatParams,
    ) -> Result<ChatCompletion, ProviderCallError>;

    async fn stream_chat(
        &self,
        model_native_id: &str,
        messages: &[Message],
        params: &ChatParams,
    ) -> Result<BoxStream<'static, Result<DeltaChunk, ProviderCallError>>, ProviderCallError>;

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderCallError>;

    async fn get_generation(&self, generation_id: &str) -> Result<GenerationInfo, ProviderCallError>;
}
