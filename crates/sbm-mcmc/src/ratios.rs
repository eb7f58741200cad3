//! Metropolis-Hastings acceptance ratios.
//!
//! Each function returns the likelihood ratio `P(after) / P(before)` of the
//! Bernoulli edge model for one proposed batch, evaluated in closed form from
//! the block sizes and block-degree vectors *before* the batch is applied.
//! Only the blocks touched by the move get special terms; every other block
//! contributes through a product over `l ∉ {r, s}`.

use sbm_core::{EdgeProbabilities, ModelKind, Move, ProposalKind};

use crate::blockmodel::BlockModel;

/// Computes the acceptance ratio of a move batch.
pub type RatioFn = fn(&BlockModel<'_>, &EdgeProbabilities, &[Move]) -> f64;

/// Resolves the ratio function for a (proposal, model) pair.
pub fn ratio_fn(proposal: ProposalKind, model: ModelKind) -> RatioFn {
    match (proposal, model) {
        (ProposalKind::SingleVertex, ModelKind::Sbm) => single_vertex_sbm,
        (ProposalKind::SingleVertex, ModelKind::Ppm) => single_vertex_ppm,
        (ProposalKind::Swap, ModelKind::Sbm) => swap_sbm,
        (ProposalKind::Swap, ModelKind::Ppm) => swap_ppm,
    }
}

#[inline]
fn signed(count: usize) -> i32 {
    count as i32
}

/// Single vertex moved from block `r` to block `s` under the full SBM.
pub fn single_vertex_sbm(model: &BlockModel<'_>, p: &EdgeProbabilities, moves: &[Move]) -> f64 {
    let mv = moves[0];
    let ki = model.block_degree(mv.vertex);
    let n = model.block_sizes();
    let (r, s) = (mv.source, mv.target);
    let (p_rr, p_rs, p_ss) = (p.get(r, r), p.get(r, s), p.get(s, s));

    let mut a = ((1.0 - p_ss) / (1.0 - p_rs)).powi(signed(n[s]) - signed(ki[s]))
        * ((1.0 - p_rs) / (1.0 - p_rr)).powi(signed(n[r]) - signed(ki[r]) - 1)
        * (p_rs / p_rr).powi(signed(ki[r]))
        * (p_ss / p_rs).powi(signed(ki[s]));
    for l in 0..n.len() {
        if l != r && l != s {
            let (p_rl, p_sl) = (p.get(r, l), p.get(s, l));
            a *= ((1.0 - p_sl) / (1.0 - p_rl)).powi(signed(n[l]) - signed(ki[l]))
                * (p_sl / p_rl).powi(signed(ki[l]));
        }
    }
    a
}

/// Single vertex moved from block `r` to block `s` under the planted partition model.
pub fn single_vertex_ppm(model: &BlockModel<'_>, p: &EdgeProbabilities, moves: &[Move]) -> f64 {
    let mv = moves[0];
    let ki = model.block_degree(mv.vertex);
    let n = model.block_sizes();
    let (r, s) = (mv.source, mv.target);
    let (p_in, p_out) = p.in_out();

    ((1.0 - p_in) / (1.0 - p_out))
        .powi(signed(n[s]) - signed(ki[s]) - signed(n[r]) + signed(ki[r]) + 1)
        * (p_in / p_out).powi(signed(ki[s]) - signed(ki[r]))
}

/// Vertices `x ∈ r` and `y ∈ s` exchanged under the full SBM.
pub fn swap_sbm(model: &BlockModel<'_>, p: &EdgeProbabilities, moves: &[Move]) -> f64 {
    let (x, y) = (moves[0].vertex, moves[1].vertex);
    let kx = model.block_degree(x);
    let ky = model.block_degree(y);
    let (r, s) = (moves[0].source, moves[1].source);
    let a_xy = i32::from(model.connected(x, y));
    let (p_rr, p_rs, p_ss) = (p.get(r, r), p.get(r, s), p.get(s, s));

    let mut a = ((p_rs / p_rr) * (1.0 - p_rr) / (1.0 - p_rs))
        .powi(signed(kx[r]) - signed(ky[r]) + a_xy)
        * ((p_ss / p_rs) * (1.0 - p_rs) / (1.0 - p_ss))
            .powi(signed(kx[s]) - signed(ky[s]) - a_xy);
    for l in 0..kx.len() {
        if l != r && l != s {
            let (p_rl, p_sl) = (p.get(r, l), p.get(s, l));
            a *= ((p_sl / p_rl) * (1.0 - p_rl) / (1.0 - p_sl)).powi(signed(kx[l]) - signed(ky[l]));
        }
    }
    a
}

/// Vertices `x ∈ r` and `y ∈ s` exchanged under the planted partition model.
pub fn swap_ppm(model: &BlockModel<'_>, p: &EdgeProbabilities, moves: &[Move]) -> f64 {
    let (x, y) = (moves[0].vertex, moves[1].vertex);
    let kx = model.block_degree(x);
    let ky = model.block_degree(y);
    let (r, s) = (moves[0].source, moves[1].source);
    let a_xy = i32::from(model.connected(x, y));
    let (p_in, p_out) = p.in_out();

    ((p_out / p_in) * (1.0 - p_in) / (1.0 - p_out)).powi(signed(kx[r]) - signed(ky[r]) + a_xy)
        * ((p_in / p_out) * (1.0 - p_out) / (1.0 - p_in))
            .powi(signed(kx[s]) - signed(ky[s]) - a_xy)
}
