use std::fs;
use std::path::Path;

use sbm_core::errors::{ErrorInfo, SbmError};
use sbm_core::BlockId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::RunConfig;

/// Structured manifest describing a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Configuration used for the run.
    pub config: RunConfig,
    /// Master seed of the random stream.
    pub master_seed: u64,
    /// Optional seed label captured from the configuration.
    pub seed_label: Option<String>,
    /// Canonical hash of the input graph.
    pub graph_hash: String,
    /// Hash of the reported membership.
    pub membership_hash: String,
    /// Acceptance rate of the sampling or annealing phase.
    pub acceptance_rate: f64,
    /// Log-likelihood of the final state.
    pub log_likelihood: f64,
}

impl RunManifest {
    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), SbmError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                SbmError::Serde(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            SbmError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            SbmError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, SbmError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            SbmError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            SbmError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display()),
            )
        })
    }
}

/// SHA-256 hex digest of a membership vector.
pub fn membership_hash(membership: &[BlockId]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((membership.len() as u64).to_le_bytes());
    for &block in membership {
        hasher.update((block as u64).to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}
