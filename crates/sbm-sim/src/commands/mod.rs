pub mod generate;
pub mod marginalize;
pub mod maximize;
pub mod run;

use std::error::Error;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Args;
use log::info;
use sbm_core::errors::{ErrorInfo, SbmError};
use sbm_core::{EdgeProbabilities, ModelKind, ProposalKind};
use sbm_graph::{canonical_hash, load_edge_list};
use sbm_mcmc::{BlockModel, RunConfig, RunMode};

use crate::output::{write_matrix, write_vec};

/// Graph, initial partition and edge probabilities of a run.
#[derive(Args, Debug)]
pub struct ProblemArgs {
    /// Edge list, one whitespace separated `u v` pair per line.
    #[arg(short = 'e', long = "edge-list")]
    pub edge_list: PathBuf,
    /// Block sizes; the first n0 vertices start in block 0, the next n1 in block 1, ...
    #[arg(short = 'n', long = "sizes", num_args = 1.., required = true)]
    pub sizes: Vec<usize>,
    /// Edge probabilities: g*g values in row-major order, or p_in p_out for the PPM.
    #[arg(
        short = 'P',
        long = "probabilities",
        num_args = 1..,
        required = true,
        allow_negative_numbers = true
    )]
    pub probabilities: Vec<f64>,
    /// Write a JSON manifest of the run to this path.
    #[arg(long)]
    pub manifest: Option<PathBuf>,
    /// Write the full run summary as JSON to this path.
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

/// Switches shared by the sampling commands.
#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Shuffle the initial membership before sampling.
    #[arg(short = 'r', long)]
    pub randomize: bool,
    /// Score proposals with the planted partition model.
    #[arg(short = 'u', long = "use-ppm")]
    pub use_ppm: bool,
    /// Propose single vertex moves instead of swaps.
    #[arg(short = 's', long = "use-single-vertex")]
    pub use_single_vertex: bool,
    /// Seed of the random stream; derived from the clock when absent.
    #[arg(short = 'd', long)]
    pub seed: Option<u64>,
    /// Print the membership at every sample point or annealing step.
    #[arg(long)]
    pub trajectory: bool,
}

impl ChainArgs {
    /// Builds a run configuration for `mode` from the switches.
    pub fn to_config(&self, mode: RunMode) -> RunConfig {
        let mut config = RunConfig {
            mode,
            ..RunConfig::default()
        };
        config.proposal = if self.use_single_vertex {
            ProposalKind::SingleVertex
        } else {
            ProposalKind::Swap
        };
        config.model = if self.use_ppm {
            ModelKind::Ppm
        } else {
            ModelKind::Sbm
        };
        config.randomize = self.randomize;
        config.record_trajectory = self.trajectory;
        config.seed_policy.master_seed = self.seed.unwrap_or_else(clock_seed);
        config
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Interprets the probability values for `model` over `blocks` blocks.
pub fn edge_probabilities(
    values: &[f64],
    model: ModelKind,
    blocks: usize,
) -> Result<EdgeProbabilities, SbmError> {
    match (model, values) {
        (ModelKind::Ppm, &[p_in, p_out]) => EdgeProbabilities::planted(p_in, p_out),
        (ModelKind::Ppm, _) => Err(SbmError::Config(
            ErrorInfo::new(
                "ppm-probability-count",
                "the planted partition model takes exactly two probabilities",
            )
            .with_context("given", values.len())
            .with_hint("pass -P p_in p_out"),
        )),
        (ModelKind::Sbm, _) => EdgeProbabilities::from_row_major(values, blocks),
    }
}

/// Loads the problem, runs the chain and prints the results.
///
/// Recorded trajectory states and the reported membership go to stdout, one
/// membership per line.
pub fn execute(problem: &ProblemArgs, config: &RunConfig) -> Result<(), Box<dyn Error>> {
    let vertices: usize = problem.sizes.iter().sum();
    let graph = load_edge_list(&problem.edge_list, vertices)?;
    let blocks = problem.sizes.len();
    let p = edge_probabilities(&problem.probabilities, config.model, blocks)?;

    info!("edge list {}", problem.edge_list.display());
    let mut matrix = Vec::new();
    write_matrix(&p.to_matrix(blocks), &mut matrix)?;
    info!(
        "probabilities:\n{}",
        String::from_utf8_lossy(&matrix).trim_end()
    );
    info!("sizes (g={blocks}) {:?}", problem.sizes);

    let model = BlockModel::from_block_sizes(&graph, &problem.sizes)?;
    let summary = sbm_mcmc::run(config, model, &p)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for state in &summary.trajectory {
        write_vec(state, &mut out)?;
    }
    write_vec(&summary.membership, &mut out)?;
    if let RunMode::Marginalize { .. } = config.mode {
        eprintln!("acceptance ratio {}", summary.acceptance_rate);
    }

    if let Some(path) = &problem.manifest {
        summary
            .manifest(config, canonical_hash(&graph))
            .write(path)?;
        info!("manifest written to {}", path.display());
    }
    if let Some(path) = &problem.summary {
        fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        info!("summary written to {}", path.display());
    }
    Ok(())
}
