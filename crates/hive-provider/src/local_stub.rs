//! `local_stub`: the one concrete `Provider` implementation this crate
//! ships. Every real backend's payload shape is out of scope per
//! `spec.md` §1 ("provider-specific HTTP payload shapes"); this adapter
//! exists so the router, strategies, and tests have something to dispatch
//! to without a network.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

use crate::error::ProviderCallError;
use crate::provider::Provider;
use crate::types::{ChatCompletion, ChatParams, DeltaChunk, GenerationInfo, ModelInfo, Message};

/// Deterministic in-process provider: echoes the last user message back
/// with a fixed prefix. Useful for tests and local development with no
/// real backend configured.
pub struct LocalStubProvider {
    name: String,
}

impl LocalStubProvider {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Provider for LocalStubProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat_completion(
        &self,
        model_native_id: &str,
        messages: &[Message],
        _params: &ChatParams,
    ) -> Result<ChatCompletion, ProviderCallError> {
        let last_user = messages.iter().rev().find(|m| matches!(m.role, crate::types::Role::User));
        let content = match last_user {
            Some(message) => format!("[{model_native_id}] {}", message.content),
            None => format!("[{model_native_id}] (no user message)"),
        };
        let tokens_in = messages.iter().map(|m| m.content.split_whitespace().count() as u32).sum();
        let tokens_out = content.split_whitespace().count() as u32;
        Ok(ChatCompletion {
            content,
            tokens_in,
            tokens_out,
            generation_id: format!("local-{model_native_id}-{tokens_out}"),
        })
    }

    async fn stream_chat(
        &self,
        model_native_id: &str,
        messages: &[Message],
        params: &ChatParams,
    ) -> Result<BoxStream<'static, Result<DeltaChunk, ProviderCallError>>, ProviderCallError> {
        let completion = self.chat_completion(model_native_id, messages, params).await?;
        let chunks = vec![
            Ok(DeltaChunk {
                delta: completion.content,
                done: false,
            }),
            Ok(DeltaChunk {
                delta: String::new(),
                done: true,
            }),
        ];
        Ok(stream::iter(chunks).boxed())
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderCallError> {
        Ok(vec![ModelInfo {
            id: "local-stub-1".to_owned(),
            context_length: 8192,
            pricing: 0.0,
            supports_tools: false,
            supports_vision: false,
        }])
    }

    async fn get_generation(&self, generation_id: &str) -> Result<GenerationInfo, ProviderCallError> {
        Ok(GenerationInfo {
            tokens: generation_id.len() as u32,
            cost: 0.0,
        })
    }
}
