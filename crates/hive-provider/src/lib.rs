//! The Provider Router and Provider Backend Interface (`spec.md` §4.1,
//! §4.2, §6): resolves a logical model id to a concrete backend call,
//! enforcing per-backend rate limits and circuit breakers and failing
//! over on transient or permanent provider errors.

mod cache;
mod error;
mod local_stub;
mod provider;
mod router;
mod types;

pub use error::ProviderCallError;
pub use local_stub::LocalStubProvider;
pub use provider::Provider;
pub use router::ProviderRouter;
pub use types::{ChatCompletion, ChatParams, DeltaChunk, GenerationInfo, Message, ModelInfo, Role};
