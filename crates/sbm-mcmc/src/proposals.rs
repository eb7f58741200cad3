use sbm_core::{Move, ProposalKind, RngHandle};

use crate::blockmodel::BlockModel;

/// Samples one batch of moves from the proposal distribution.
pub type ProposalFn = fn(&BlockModel<'_>, &mut RngHandle) -> Vec<Move>;

/// Single-vertex reassignment: one move.
pub fn single_vertex(model: &BlockModel<'_>, rng: &mut RngHandle) -> Vec<Move> {
    model.propose_single_vertex(rng)
}

/// Vertex-pair swap: exactly two moves.
pub fn swap(model: &BlockModel<'_>, rng: &mut RngHandle) -> Vec<Move> {
    model.propose_swap(rng)
}

/// Resolves the proposal function for `kind`.
pub fn proposal_fn(kind: ProposalKind) -> ProposalFn {
    match kind {
        ProposalKind::SingleVertex => single_vertex,
        ProposalKind::Swap => swap,
    }
}
