use rand::seq::SliceRandom;
use sbm_core::errors::{ErrorInfo, SbmError};
use sbm_core::{BlockId, Move, RngHandle, VertexId};
use sbm_graph::Graph;

/// Partition of the vertices of a graph into blocks, together with the
/// aggregates the acceptance ratios read.
///
/// The block sizes `n[r]` and the block-degree matrix `k[v][r]` (number of
/// neighbours of `v` in block `r`) are computed once at construction and then
/// updated in place by [`BlockModel::apply_moves`]. At every point
/// `Σ_r n[r] == N` and `Σ_r k[v][r] == degree(v)`.
///
/// The partition borrows the graph, which must outlive it.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockModel<'g> {
    graph: &'g Graph,
    membership: Vec<BlockId>,
    sizes: Vec<usize>,
    block_degrees: Vec<Vec<usize>>,
}

impl<'g> BlockModel<'g> {
    /// Builds the partition state from an explicit membership vector.
    pub fn new(graph: &'g Graph, membership: Vec<BlockId>, blocks: usize) -> Result<Self, SbmError> {
        if blocks == 0 {
            return Err(SbmError::Partition(ErrorInfo::new(
                "no-blocks",
                "a partition needs at least one block",
            )));
        }
        if graph.vertex_count() == 0 {
            return Err(SbmError::Partition(ErrorInfo::new(
                "empty-graph",
                "cannot partition a graph without vertices",
            )));
        }
        if membership.len() != graph.vertex_count() {
            return Err(SbmError::Partition(
                ErrorInfo::new(
                    "membership-length",
                    "membership vector length differs from the vertex count",
                )
                .with_context("membership", membership.len())
                .with_context("vertices", graph.vertex_count()),
            ));
        }
        let mut sizes = vec![0usize; blocks];
        for (vertex, &block) in membership.iter().enumerate() {
            if block >= blocks {
                return Err(SbmError::Partition(
                    ErrorInfo::new("membership-out-of-range", "block index out of range")
                        .with_context("vertex", vertex)
                        .with_context("block", block)
                        .with_context("blocks", blocks),
                ));
            }
            sizes[block] += 1;
        }
        let mut model = Self {
            graph,
            membership,
            sizes,
            block_degrees: Vec::new(),
        };
        model.recompute_block_degrees();
        Ok(model)
    }

    /// Builds a contiguous partition: the first `sizes[0]` vertices go to
    /// block 0, the next `sizes[1]` to block 1, and so on.
    pub fn from_block_sizes(graph: &'g Graph, sizes: &[usize]) -> Result<Self, SbmError> {
        let total: usize = sizes.iter().sum();
        if total != graph.vertex_count() {
            return Err(SbmError::Partition(
                ErrorInfo::new(
                    "block-sizes-sum",
                    "block sizes must add up to the number of vertices",
                )
                .with_context("sum", total)
                .with_context("vertices", graph.vertex_count())
                .with_hint("vertices referenced by the edge list count towards N"),
            ));
        }
        let membership = sizes
            .iter()
            .enumerate()
            .flat_map(|(block, &size)| std::iter::repeat(block).take(size))
            .collect();
        Self::new(graph, membership, sizes.len())
    }

    /// Proposes moving one uniformly drawn vertex to a uniformly drawn block.
    ///
    /// The target may equal the current block.
    pub fn propose_single_vertex(&self, rng: &mut RngHandle) -> Vec<Move> {
        let vertex = rng.uniform_index(self.vertex_count());
        let target = rng.uniform_index(self.block_count());
        vec![Move::new(vertex, self.membership[vertex], target)]
    }

    /// Proposes exchanging the blocks of two vertices drawn with replacement.
    ///
    /// Both moves are computed from the current memberships; drawing the same
    /// vertex twice yields a pair of self-moves.
    pub fn propose_swap(&self, rng: &mut RngHandle) -> Vec<Move> {
        let first = rng.uniform_index(self.vertex_count());
        let second = rng.uniform_index(self.vertex_count());
        let first_block = self.membership[first];
        let second_block = self.membership[second];
        vec![
            Move::new(first, first_block, second_block),
            Move::new(second, second_block, first_block),
        ]
    }

    /// Block-degree vector `k[vertex]`, of length `g`.
    pub fn block_degree(&self, vertex: VertexId) -> &[usize] {
        &self.block_degrees[vertex]
    }

    /// Whether `u` and `v` are adjacent in the underlying graph.
    pub fn connected(&self, u: VertexId, v: VertexId) -> bool {
        self.graph.connected(u, v)
    }

    /// Block sizes `n`, of length `g`.
    pub fn block_sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Current membership vector.
    pub fn membership(&self) -> &[BlockId] {
        &self.membership
    }

    /// Block of `vertex`.
    pub fn block_of(&self, vertex: VertexId) -> BlockId {
        self.membership[vertex]
    }

    /// Number of vertices `N`.
    pub fn vertex_count(&self) -> usize {
        self.membership.len()
    }

    /// Number of blocks `g`.
    pub fn block_count(&self) -> usize {
        self.sizes.len()
    }

    /// Graph the partition is defined over.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Edge counts between blocks, recomputed from the adjacency sets.
    ///
    /// Off-diagonal entries hold the number of edges joining blocks `r` and
    /// `s`; diagonal entries hold the number of edges inside a block. The
    /// matrix is symmetric and `Σ m + trace(m) == 2·|E|`.
    ///
    /// Internal edges are counted once on the diagonal rather than twice, so
    /// the plain entry sum `Σ m` is not `2·|E|` unless no edge is internal.
    pub fn edge_count_matrix(&self) -> Vec<Vec<usize>> {
        let blocks = self.block_count();
        let mut counts = vec![vec![0usize; blocks]; blocks];
        for (vertex, &block) in self.membership.iter().enumerate() {
            for &neighbour in self.graph.neighbors(vertex) {
                counts[block][self.membership[neighbour]] += 1;
            }
        }
        // each internal edge was seen from both endpoints
        for (r, row) in counts.iter_mut().enumerate() {
            row[r] /= 2;
        }
        counts
    }

    /// Applies the moves in order, updating `k`, `n` and the membership.
    ///
    /// Each move's source must be the vertex's block at the time the move is
    /// applied, which holds for every batch produced by the proposal methods.
    pub fn apply_moves(&mut self, moves: &[Move]) {
        let graph = self.graph;
        for mv in moves {
            debug_assert_eq!(self.membership[mv.vertex], mv.source);
            for &neighbour in graph.neighbors(mv.vertex) {
                let degrees = &mut self.block_degrees[neighbour];
                degrees[mv.source] -= 1;
                degrees[mv.target] += 1;
            }
            self.sizes[mv.source] -= 1;
            self.sizes[mv.target] += 1;
            self.membership[mv.vertex] = mv.target;
        }
    }

    /// Recomputes the block-degree matrix from scratch in `O(N·g + |E|)`.
    pub fn recompute_block_degrees(&mut self) {
        let blocks = self.block_count();
        let mut block_degrees = vec![vec![0usize; blocks]; self.vertex_count()];
        for (vertex, degrees) in block_degrees.iter_mut().enumerate() {
            for &neighbour in self.graph.neighbors(vertex) {
                degrees[self.membership[neighbour]] += 1;
            }
        }
        self.block_degrees = block_degrees;
    }

    /// Applies a uniform random permutation to the membership vector.
    ///
    /// Block sizes are unchanged; block degrees are recomputed.
    pub fn shuffle(&mut self, rng: &mut RngHandle) {
        self.membership.shuffle(rng);
        self.recompute_block_degrees();
    }
}
