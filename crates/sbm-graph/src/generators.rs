use sbm_core::errors::{ErrorInfo, SbmError};
use sbm_core::rng::RngHandle;
use sbm_core::EdgeProbabilities;

use crate::graph::Graph;

/// Samples a graph from the Bernoulli stochastic block model.
///
/// Vertices are laid out contiguously by block: the first `sizes[0]` vertices
/// belong to block 0, the next `sizes[1]` to block 1 and so on. Every vertex
/// pair is visited once in lexicographic order and linked with probability
/// `p(block(u), block(v))`.
pub fn gen_stochastic_block(
    sizes: &[usize],
    probabilities: &EdgeProbabilities,
    rng: &mut RngHandle,
) -> Result<Graph, SbmError> {
    if sizes.is_empty() {
        return Err(SbmError::Graph(ErrorInfo::new(
            "empty-block-sizes",
            "stochastic block generator requires at least one block",
        )));
    }
    probabilities.validate()?;
    if let Some(blocks) = probabilities.block_count() {
        if blocks != sizes.len() {
            return Err(SbmError::Model(
                ErrorInfo::new(
                    "block-count-mismatch",
                    "probability matrix size differs from the number of blocks",
                )
                .with_context("matrix", blocks)
                .with_context("blocks", sizes.len()),
            ));
        }
    }

    let labels: Vec<usize> = sizes
        .iter()
        .enumerate()
        .flat_map(|(block, &size)| std::iter::repeat(block).take(size))
        .collect();
    let mut graph = Graph::with_vertices(labels.len());
    for u in 0..labels.len() {
        for v in (u + 1)..labels.len() {
            if rng.uniform_real() < probabilities.get(labels[u], labels[v]) {
                graph.add_edge(u, v)?;
            }
        }
    }
    Ok(graph)
}

/// Samples a graph from the planted partition model.
pub fn gen_planted_partition(
    sizes: &[usize],
    p_in: f64,
    p_out: f64,
    rng: &mut RngHandle,
) -> Result<Graph, SbmError> {
    let probabilities = EdgeProbabilities::planted(p_in, p_out)?;
    gen_stochastic_block(sizes, &probabilities, rng)
}
