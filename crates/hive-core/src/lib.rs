//! Shared request/response vocabulary and error taxonomy for the LLMHive
//! orchestration core.
//!
//! Every other `hive-*` crate depends on this one for the types that
//! cross component boundaries, so that `hive-consensus`, `hive-refine`,
//! `hive-verify`, `hive-selector`, and `hive-provider` never need to
//! depend on each other directly.

mod consensus;
mod correlation;
mod error;
mod refinement;
mod request;
mod response;
pub mod text;
mod verification;

pub use consensus::{ConsensusResult, ConsensusScore, ConsensusStrategy};
pub use correlation::CorrelationId;
pub use error::{ErrorKind, HiveError};
pub use refinement::RefinementIteration;
pub use request::{AccuracyLevel, Mode, Request, TaskCategory};
pub use response::{ModelResponse, Vote};
pub use verification::{IssueKind, VerificationIssue};
