use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a vertex, contiguous in `[0, N)`.
pub type VertexId = usize;

/// Index of a block, contiguous in `[0, g)`.
pub type BlockId = usize;

/// One atomic reassignment proposed by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Vertex being reassigned.
    pub vertex: VertexId,
    /// Block the vertex belongs to before the move.
    pub source: BlockId,
    /// Block the vertex belongs to after the move.
    pub target: BlockId,
}

impl Move {
    /// Creates a new move.
    pub const fn new(vertex: VertexId, source: BlockId, target: BlockId) -> Self {
        Self {
            vertex,
            source,
            target,
        }
    }

    /// Returns whether the move leaves the vertex in its current block.
    pub fn is_self_move(&self) -> bool {
        self.source == self.target
    }
}

/// Kind of proposal distribution used by the sampler.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalKind {
    /// Move one uniformly chosen vertex to a uniformly chosen block.
    SingleVertex,
    /// Exchange the blocks of two uniformly chosen vertices.
    #[default]
    Swap,
}

impl ProposalKind {
    /// Stable identifier used in logs and manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalKind::SingleVertex => "single-vertex",
            ProposalKind::Swap => "swap",
        }
    }
}

impl fmt::Display for ProposalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generative model scored by the acceptance ratio.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Full stochastic block model with a g×g probability matrix.
    #[default]
    Sbm,
    /// Planted partition model with in-block and out-of-block probabilities.
    Ppm,
}

impl ModelKind {
    /// Stable identifier used in logs and manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Sbm => "sbm",
            ModelKind::Ppm => "ppm",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
