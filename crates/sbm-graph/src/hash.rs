use sha2::{Digest, Sha256};

use crate::graph::Graph;

/// Computes the canonical structural hash for the provided graph.
///
/// The digest covers the vertex count and the sorted edge list, so two graphs
/// hash equal exactly when they have the same vertices and edges.
pub fn canonical_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();
    hasher.update((graph.vertex_count() as u64).to_le_bytes());
    hasher.update((graph.edge_count() as u64).to_le_bytes());
    for (u, v) in graph.edges() {
        hasher.update((u as u64).to_le_bytes());
        hasher.update((v as u64).to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}
