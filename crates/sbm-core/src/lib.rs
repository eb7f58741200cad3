#![deny(missing_docs)]

//! Core data types shared by the SBM sampler crates: the canonical error type,
//! the deterministic RNG handle, moves and model kinds, and edge probabilities.

pub mod errors;
pub mod probabilities;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, SbmError};
pub use probabilities::EdgeProbabilities;
pub use rng::RngHandle;
pub use types::{BlockId, ModelKind, Move, ProposalKind, VertexId};
