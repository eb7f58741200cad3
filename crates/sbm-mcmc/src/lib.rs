#![deny(missing_docs)]

//! Metropolis-Hastings inference of block memberships under the stochastic
//! block model and the planted partition model.
//!
//! A [`BlockModel`] holds the partition of a borrowed [`sbm_graph::Graph`]
//! together with the block sizes and block degrees the closed-form acceptance
//! ratios need. An [`MhEngine`] samples the posterior at unit temperature
//! ([`MhEngine::marginalize`]) or anneals towards a maximum a posteriori
//! partition ([`MhEngine::anneal`]); [`run`] drives either from a
//! [`RunConfig`].

/// Partition state and the proposal samplers.
pub mod blockmodel;
/// YAML configuration schema and defaults.
pub mod config;
/// Metropolis-Hastings engine, observers and marginals.
pub mod engine;
/// Single-chain run driver.
pub mod kernel;
/// Log-likelihood diagnostic.
pub mod likelihood;
/// Run manifest serialization helpers.
pub mod manifest;
/// Proposal function pointers.
pub mod proposals;
/// Closed-form acceptance ratios.
pub mod ratios;
/// Cooling schedules for simulated annealing.
pub mod schedules;

pub use blockmodel::BlockModel;
pub use config::{RunConfig, RunMode, SeedPolicy};
pub use engine::{Marginals, MhEngine, NoopObserver, StepObserver, TrajectoryRecorder};
pub use kernel::{run, RunSummary};
pub use likelihood::log_likelihood;
pub use manifest::{membership_hash, RunManifest};
pub use schedules::CoolingSchedule;
