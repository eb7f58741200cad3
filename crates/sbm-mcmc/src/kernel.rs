use log::info;
use sbm_core::errors::SbmError;
use sbm_core::{BlockId, EdgeProbabilities, RngHandle};
use serde::{Deserialize, Serialize};

use crate::blockmodel::BlockModel;
use crate::config::{RunConfig, RunMode};
use crate::engine::{Marginals, MhEngine, NoopObserver, StepObserver, TrajectoryRecorder};
use crate::likelihood::log_likelihood;
use crate::manifest::{membership_hash, RunManifest};

/// Summary returned to callers after a run completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Reported partition: the per-vertex argmax of the marginals when
    /// marginalizing, the final state when maximizing.
    pub membership: Vec<BlockId>,
    /// State of the chain after the last step.
    pub final_membership: Vec<BlockId>,
    /// Per-vertex block histogram (marginalize only).
    pub marginals: Option<Marginals>,
    /// Acceptance rate of the sampling or annealing phase.
    pub acceptance_rate: f64,
    /// Log-likelihood of the final state.
    pub log_likelihood: f64,
    /// Edge counts between blocks in the final state.
    pub edge_counts: Vec<Vec<usize>>,
    /// Block sizes in the final state.
    pub block_sizes: Vec<usize>,
    /// Memberships recorded by the trajectory observer, if enabled.
    pub trajectory: Vec<Vec<BlockId>>,
}

impl RunSummary {
    /// Builds the manifest documenting this run.
    pub fn manifest(&self, config: &RunConfig, graph_hash: String) -> RunManifest {
        RunManifest {
            config: config.clone(),
            master_seed: config.seed_policy.master_seed,
            seed_label: config.seed_policy.label.clone(),
            graph_hash,
            membership_hash: membership_hash(&self.membership),
            acceptance_rate: self.acceptance_rate,
            log_likelihood: self.log_likelihood,
        }
    }
}

/// Runs one chain from `model` as described by `config`.
///
/// The random stream is seeded from `config.seed_policy.master_seed`, so two
/// calls with equal inputs produce equal summaries.
pub fn run(
    config: &RunConfig,
    mut model: BlockModel<'_>,
    p: &EdgeProbabilities,
) -> Result<RunSummary, SbmError> {
    config.validate()?;
    p.check_compatible(config.model, model.block_count())?;

    let mut rng = RngHandle::from_seed(config.seed_policy.master_seed);
    if config.randomize {
        model.shuffle(&mut rng);
    }
    let engine = MhEngine::new(config.proposal, config.model);
    info!(
        "{} run: {} vertices, {} edges, {} blocks, {} model, {} proposal, seed {}",
        config.mode.name(),
        model.vertex_count(),
        model.graph().edge_count(),
        model.block_count(),
        config.model,
        config.proposal,
        config.seed_policy.master_seed
    );
    info!("initial block sizes {:?}", model.block_sizes());

    let mut recorder = TrajectoryRecorder::default();
    let mut noop = NoopObserver;
    let observer: &mut dyn StepObserver = if config.record_trajectory {
        &mut recorder
    } else {
        &mut noop
    };

    let (membership, marginals, acceptance_rate) = match &config.mode {
        RunMode::Marginalize {
            burn_in,
            sample_every,
            samples,
        } => {
            let marginals = engine.marginalize_with(
                &mut model,
                p,
                *burn_in,
                *sample_every,
                *samples,
                &mut rng,
                observer,
            )?;
            let rate = marginals.acceptance_rate;
            (marginals.argmax(), Some(marginals), rate)
        }
        RunMode::Maximize { duration, schedule } => {
            info!(
                "{} schedule with parameters {:?} over {duration} steps",
                schedule.name(),
                schedule.params()
            );
            let rate = engine.anneal_with(&mut model, p, schedule, *duration, &mut rng, observer)?;
            (model.membership().to_vec(), None, rate)
        }
    };

    let log_likelihood = log_likelihood(&model, p);
    info!("acceptance rate {acceptance_rate:.4}, final log-likelihood {log_likelihood:.4}");

    Ok(RunSummary {
        membership,
        final_membership: model.membership().to_vec(),
        marginals,
        acceptance_rate,
        log_likelihood,
        edge_counts: model.edge_count_matrix(),
        block_sizes: model.block_sizes().to_vec(),
        trajectory: recorder.states,
    })
}
