use sbm_core::EdgeProbabilities;

use crate::blockmodel::BlockModel;

/// Log-likelihood of the graph under the Bernoulli block model for the
/// current partition.
///
/// Every unordered vertex pair contributes `ln p_rs` when linked and
/// `ln(1 − p_rs)` otherwise; pairs are grouped by block pair, with
/// `n_r · n_s` candidate pairs across blocks and `n_r (n_r − 1) / 2` inside
/// a block.
pub fn log_likelihood(model: &BlockModel<'_>, p: &EdgeProbabilities) -> f64 {
    let counts = model.edge_count_matrix();
    let sizes = model.block_sizes();
    let blocks = model.block_count();
    let mut total = 0.0;
    for r in 0..blocks {
        for s in r..blocks {
            let (n_r, n_s) = (sizes[r] as f64, sizes[s] as f64);
            let pairs = if r == s {
                n_r * (n_r - 1.0) / 2.0
            } else {
                n_r * n_s
            };
            let edges = counts[r][s] as f64;
            let prob = p.get(r, s);
            total += edges * prob.ln() + (pairs - edges) * (1.0 - prob).ln();
        }
    }
    total
}
