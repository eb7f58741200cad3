use std::fs;
use std::path::Path;

use sbm_core::errors::{ErrorInfo, SbmError};
use sbm_core::{ModelKind, ProposalKind};
use serde::{Deserialize, Serialize};

use crate::schedules::CoolingSchedule;

/// YAML-configurable parameters governing a single chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// What the chain computes.
    #[serde(default)]
    pub mode: RunMode,
    /// Proposal distribution.
    #[serde(default)]
    pub proposal: ProposalKind,
    /// Likelihood model scoring the proposals.
    #[serde(default)]
    pub model: ModelKind,
    /// Shuffle the initial membership before the first step.
    #[serde(default)]
    pub randomize: bool,
    /// Master seed of the random stream.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Record the membership at every sample point or annealing step.
    #[serde(default)]
    pub record_trajectory: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            proposal: ProposalKind::default(),
            model: ModelKind::default(),
            randomize: false,
            seed_policy: SeedPolicy::default(),
            record_trajectory: false,
        }
    }
}

/// Inference task performed by a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RunMode {
    /// Posterior sampling at unit temperature.
    Marginalize {
        /// Steps discarded before sampling starts.
        #[serde(default = "default_burn_in")]
        burn_in: usize,
        /// Steps between two consecutive samples.
        #[serde(default = "default_sample_every")]
        sample_every: usize,
        /// Number of samples recorded.
        #[serde(default = "default_samples")]
        samples: usize,
    },
    /// Simulated annealing towards a maximum a posteriori partition.
    Maximize {
        /// Number of annealing steps.
        #[serde(default = "default_duration")]
        duration: usize,
        /// Temperature schedule.
        #[serde(default)]
        schedule: CoolingSchedule,
    },
}

fn default_burn_in() -> usize {
    1000
}

fn default_sample_every() -> usize {
    10
}

fn default_samples() -> usize {
    1000
}

fn default_duration() -> usize {
    1000
}

impl Default for RunMode {
    fn default() -> Self {
        RunMode::Marginalize {
            burn_in: default_burn_in(),
            sample_every: default_sample_every(),
            samples: default_samples(),
        }
    }
}

impl RunMode {
    /// Stable name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            RunMode::Marginalize { .. } => "marginalize",
            RunMode::Maximize { .. } => "maximize",
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label documented in manifests.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    42
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

impl RunConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, SbmError> {
        serde_yaml::from_str(text).map_err(|err| {
            SbmError::Serde(ErrorInfo::new("config-parse", err.to_string()))
        })
    }

    /// Reads and parses a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, SbmError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            SbmError::Serde(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            SbmError::Serde(info) => SbmError::Serde(info.with_context("path", path.display())),
            other => other,
        })
    }

    /// Serialises the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String, SbmError> {
        serde_yaml::to_string(self)
            .map_err(|err| SbmError::Serde(ErrorInfo::new("config-serialize", err.to_string())))
    }

    /// Checks the sampling parameters and the cooling schedule.
    pub fn validate(&self) -> Result<(), SbmError> {
        match &self.mode {
            RunMode::Marginalize {
                sample_every,
                samples,
                ..
            } => {
                if *sample_every == 0 {
                    return Err(SbmError::Config(
                        ErrorInfo::new(
                            "invalid-sample-every",
                            "sampling frequency must be greater than 0",
                        )
                        .with_context("sample_every", sample_every),
                    ));
                }
                if *samples == 0 {
                    return Err(SbmError::Config(
                        ErrorInfo::new(
                            "invalid-samples",
                            "number of samples must be greater than 0",
                        )
                        .with_context("samples", samples),
                    ));
                }
                if sample_every.checked_mul(*samples).is_none() {
                    return Err(SbmError::Config(
                        ErrorInfo::new(
                            "sample-count-overflow",
                            "sampling frequency times number of samples overflows the step counter",
                        )
                        .with_context("sample_every", sample_every)
                        .with_context("samples", samples),
                    ));
                }
                Ok(())
            }
            RunMode::Maximize { duration, schedule } => schedule.validate(*duration),
        }
    }
}
