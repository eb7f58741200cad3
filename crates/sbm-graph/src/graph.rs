use std::collections::BTreeSet;

use sbm_core::errors::{ErrorInfo, SbmError};
use sbm_core::VertexId;

/// Simple undirected graph stored as symmetric adjacency sets.
///
/// Vertices are the contiguous range `[0, N)`. Self-loops are rejected and
/// repeated edges collapse, so the graph is always simple. The structure is
/// built once and then only read by the sampler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    neighbors: Vec<BTreeSet<VertexId>>,
    edge_count: usize,
}

impl Graph {
    /// Creates a graph with `vertices` isolated vertices.
    pub fn with_vertices(vertices: usize) -> Self {
        Self {
            neighbors: vec![BTreeSet::new(); vertices],
            edge_count: 0,
        }
    }

    /// Builds a graph with at least `vertices` vertices from an edge list.
    ///
    /// Endpoints beyond `vertices - 1` grow the vertex range.
    pub fn from_edges(
        vertices: usize,
        edges: impl IntoIterator<Item = (VertexId, VertexId)>,
    ) -> Result<Self, SbmError> {
        let mut graph = Self::with_vertices(vertices);
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Inserts the undirected edge `{u, v}`.
    ///
    /// Returns `false` when the edge was already present.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<bool, SbmError> {
        if u == v {
            return Err(SbmError::Graph(
                ErrorInfo::new("self-loop", "self-loops are not supported by simple graphs")
                    .with_context("vertex", u),
            ));
        }
        let required = u.max(v).checked_add(1).ok_or_else(|| {
            SbmError::Graph(
                ErrorInfo::new("vertex-id-overflow", "vertex id does not fit the vertex range")
                    .with_context("u", u)
                    .with_context("v", v),
            )
        })?;
        if required > self.neighbors.len() {
            self.neighbors.resize(required, BTreeSet::new());
        }
        let inserted = self.neighbors[u].insert(v);
        self.neighbors[v].insert(u);
        if inserted {
            self.edge_count += 1;
        }
        Ok(inserted)
    }

    /// Number of vertices `N`.
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of undirected edges `|E|`.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbor set of `vertex`.
    ///
    /// Panics if `vertex` is out of range.
    pub fn neighbors(&self, vertex: VertexId) -> &BTreeSet<VertexId> {
        &self.neighbors[vertex]
    }

    /// Degree of `vertex`.
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.neighbors[vertex].len()
    }

    /// Returns whether `u` and `v` are adjacent; out-of-range ids are never adjacent.
    pub fn connected(&self, u: VertexId, v: VertexId) -> bool {
        self.neighbors
            .get(u)
            .map(|set| set.contains(&v))
            .unwrap_or(false)
    }

    /// Iterates over every edge once as `(u, v)` with `u < v`, in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(u, set)| set.range((u + 1)..).map(move |&v| (u, v)))
    }
}
