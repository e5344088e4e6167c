//! The Consensus Manager's result types are `hive_core::{ConsensusResult,
//! ConsensusScore, ConsensusStrategy}` — this crate re-exports them
//! rather than defining its own, since `hive-core`'s module doc already
//! designates it the cross-boundary vocabulary for these shapes
//! (`spec.md` §3, §4.5).

pub use hive_core::{ConsensusResult, ConsensusScore, ConsensusStrategy};
