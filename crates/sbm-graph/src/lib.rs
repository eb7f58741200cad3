#![deny(missing_docs)]

//! Read-only simple undirected graphs for the SBM sampler, with edge-list
//! loading and random block-model generators.

mod generators;
mod graph;
mod hash;
pub mod io;

pub use generators::{gen_planted_partition, gen_stochastic_block};
pub use graph::Graph;
pub use hash::canonical_hash;
pub use io::{load_edge_list, parse_edge_list};
