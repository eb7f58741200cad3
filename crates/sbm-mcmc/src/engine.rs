use std::fmt;

use log::debug;
use sbm_core::errors::{ErrorInfo, SbmError};
use sbm_core::{BlockId, EdgeProbabilities, ModelKind, Move, ProposalKind, RngHandle};
use serde::{Deserialize, Serialize};

use crate::blockmodel::BlockModel;
use crate::proposals::{proposal_fn, ProposalFn};
use crate::ratios::{ratio_fn, RatioFn};
use crate::schedules::CoolingSchedule;

/// Hooks invoked by the engine at step boundaries.
///
/// Both methods default to doing nothing, so observers only implement the
/// events they care about.
pub trait StepObserver {
    /// Called before the sampling step with index `index`, right after the
    /// state has been recorded into the histogram.
    fn on_sample(&mut self, _index: usize, _model: &BlockModel<'_>) {}

    /// Called before annealing step `step`, evaluated at `temperature`.
    fn on_anneal_step(&mut self, _step: usize, _temperature: f64, _model: &BlockModel<'_>) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {}

/// Observer that copies the membership at every event.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryRecorder {
    /// Recorded memberships, in event order.
    pub states: Vec<Vec<BlockId>>,
}

impl StepObserver for TrajectoryRecorder {
    fn on_sample(&mut self, _index: usize, model: &BlockModel<'_>) {
        self.states.push(model.membership().to_vec());
    }

    fn on_anneal_step(&mut self, _step: usize, _temperature: f64, model: &BlockModel<'_>) {
        self.states.push(model.membership().to_vec());
    }
}

/// Per-vertex block histogram collected by [`MhEngine::marginalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marginals {
    /// `histogram[v][b]` counts the samples in which vertex `v` sat in block `b`.
    pub histogram: Vec<Vec<usize>>,
    /// Number of recorded samples; every histogram row sums to it.
    pub samples: usize,
    /// Fraction of accepted proposals during the sampling phase.
    pub acceptance_rate: f64,
}

impl Marginals {
    /// Most frequent block of every vertex. Ties go to the lowest block index.
    pub fn argmax(&self) -> Vec<BlockId> {
        self.histogram
            .iter()
            .map(|row| {
                let mut best = 0;
                for (block, &count) in row.iter().enumerate() {
                    if count > row[best] {
                        best = block;
                    }
                }
                best
            })
            .collect()
    }

    /// Histogram normalised by the sample count.
    pub fn probabilities(&self) -> Vec<Vec<f64>> {
        let total = self.samples.max(1) as f64;
        self.histogram
            .iter()
            .map(|row| row.iter().map(|&count| count as f64 / total).collect())
            .collect()
    }
}

/// Metropolis-Hastings engine for one (proposal, model) combination.
///
/// The proposal distribution and the acceptance ratio are resolved once at
/// construction; the engine holds no chain state of its own.
#[derive(Clone, Copy)]
pub struct MhEngine {
    proposal_kind: ProposalKind,
    model_kind: ModelKind,
    propose: ProposalFn,
    ratio: RatioFn,
}

impl fmt::Debug for MhEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MhEngine")
            .field("proposal", &self.proposal_kind)
            .field("model", &self.model_kind)
            .finish()
    }
}

impl MhEngine {
    /// Resolves the proposal and ratio functions for the given kinds.
    pub fn new(proposal: ProposalKind, model: ModelKind) -> Self {
        Self {
            proposal_kind: proposal,
            model_kind: model,
            propose: proposal_fn(proposal),
            ratio: ratio_fn(proposal, model),
        }
    }

    /// Proposal kind the engine was built for.
    pub fn proposal_kind(&self) -> ProposalKind {
        self.proposal_kind
    }

    /// Model kind the engine was built for.
    pub fn model_kind(&self) -> ModelKind {
        self.model_kind
    }

    /// Draws one batch of moves from the proposal distribution.
    pub fn propose(&self, model: &BlockModel<'_>, rng: &mut RngHandle) -> Vec<Move> {
        (self.propose)(model, rng)
    }

    /// Likelihood ratio of `moves` against the current state.
    pub fn acceptance_ratio(
        &self,
        model: &BlockModel<'_>,
        p: &EdgeProbabilities,
        moves: &[Move],
    ) -> f64 {
        (self.ratio)(model, p, moves)
    }

    /// Performs one Metropolis-Hastings step at `temperature`.
    ///
    /// Exactly one proposal and one uniform real are drawn. The moves are
    /// accepted iff `u < a` or `a > 1`, where `a = ratio^(1/T)`; accepted moves
    /// are applied in place. Returns whether the step was accepted.
    pub fn step(
        &self,
        model: &mut BlockModel<'_>,
        p: &EdgeProbabilities,
        temperature: f64,
        rng: &mut RngHandle,
    ) -> bool {
        debug_assert!(temperature > 0.0);
        let moves = self.propose(model, rng);
        let a = self.acceptance_ratio(model, p, &moves).powf(1.0 / temperature);
        let u = rng.uniform_real();
        let accepted = u < a || a > 1.0;
        if accepted {
            model.apply_moves(&moves);
        }
        accepted
    }

    /// Samples the posterior over partitions at unit temperature.
    pub fn marginalize(
        &self,
        model: &mut BlockModel<'_>,
        p: &EdgeProbabilities,
        burn_in: usize,
        sample_every: usize,
        samples: usize,
        rng: &mut RngHandle,
    ) -> Result<Marginals, SbmError> {
        self.marginalize_with(
            model,
            p,
            burn_in,
            sample_every,
            samples,
            rng,
            &mut NoopObserver,
        )
    }

    /// Like [`MhEngine::marginalize`], reporting every sample to `observer`.
    ///
    /// Runs `burn_in` steps, then `sample_every * samples` steps. Before each
    /// sampling step whose index is a multiple of `sample_every` the membership
    /// is added to the histogram. The acceptance rate covers the sampling
    /// phase only.
    #[allow(clippy::too_many_arguments)]
    pub fn marginalize_with<O: StepObserver + ?Sized>(
        &self,
        model: &mut BlockModel<'_>,
        p: &EdgeProbabilities,
        burn_in: usize,
        sample_every: usize,
        samples: usize,
        rng: &mut RngHandle,
        observer: &mut O,
    ) -> Result<Marginals, SbmError> {
        p.check_compatible(self.model_kind, model.block_count())?;
        if sample_every == 0 {
            return Err(SbmError::Config(ErrorInfo::new(
                "invalid-sample-every",
                "sampling frequency must be greater than 0",
            )));
        }
        if samples == 0 {
            return Err(SbmError::Config(ErrorInfo::new(
                "invalid-samples",
                "number of samples must be greater than 0",
            )));
        }
        let total = sample_every.checked_mul(samples).ok_or_else(|| {
            SbmError::Config(
                ErrorInfo::new(
                    "sample-count-overflow",
                    "sampling frequency times number of samples overflows the step counter",
                )
                .with_context("sample_every", sample_every)
                .with_context("samples", samples),
            )
        })?;

        for _ in 0..burn_in {
            self.step(model, p, 1.0, rng);
        }
        debug!("burn-in finished after {burn_in} steps");

        let blocks = model.block_count();
        let mut histogram = vec![vec![0usize; blocks]; model.vertex_count()];
        let mut accepted = 0usize;
        for t in 0..total {
            if t % sample_every == 0 {
                for (row, &block) in histogram.iter_mut().zip(model.membership()) {
                    row[block] += 1;
                }
                observer.on_sample(t / sample_every, model);
            }
            if self.step(model, p, 1.0, rng) {
                accepted += 1;
            }
        }
        let acceptance_rate = accepted as f64 / total as f64;
        debug!("sampling finished: {samples} samples over {total} steps, acceptance {acceptance_rate:.4}");

        Ok(Marginals {
            histogram,
            samples,
            acceptance_rate,
        })
    }

    /// Simulated annealing towards a maximum a posteriori partition.
    ///
    /// Returns the acceptance rate over the `duration` steps.
    pub fn anneal(
        &self,
        model: &mut BlockModel<'_>,
        p: &EdgeProbabilities,
        schedule: &CoolingSchedule,
        duration: usize,
        rng: &mut RngHandle,
    ) -> Result<f64, SbmError> {
        self.anneal_with(model, p, schedule, duration, rng, &mut NoopObserver)
    }

    /// Like [`MhEngine::anneal`], reporting every step to `observer`.
    ///
    /// The schedule is validated against `duration` before the first step;
    /// step `t` runs at `schedule.temperature(t)`.
    pub fn anneal_with<O: StepObserver + ?Sized>(
        &self,
        model: &mut BlockModel<'_>,
        p: &EdgeProbabilities,
        schedule: &CoolingSchedule,
        duration: usize,
        rng: &mut RngHandle,
        observer: &mut O,
    ) -> Result<f64, SbmError> {
        p.check_compatible(self.model_kind, model.block_count())?;
        schedule.validate(duration)?;

        let mut accepted = 0usize;
        for t in 0..duration {
            let temperature = schedule.temperature(t);
            observer.on_anneal_step(t, temperature, model);
            if self.step(model, p, temperature, rng) {
                accepted += 1;
            }
        }
        if duration == 0 {
            return Ok(0.0);
        }
        let rate = accepted as f64 / duration as f64;
        debug!(
            "annealing finished after {duration} steps ({} schedule), acceptance {rate:.4}",
            schedule.name()
        );
        Ok(rate)
    }
}
