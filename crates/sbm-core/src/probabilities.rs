//! Edge-probability parameters of the SBM and PPM likelihoods.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SbmError};
use crate::types::{BlockId, ModelKind};

const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Edge probabilities between blocks.
///
/// Every entry lies in the open interval `(0, 1)`. Values built through the
/// constructors are validated; values obtained through deserialization must be
/// checked with [`EdgeProbabilities::validate`] before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EdgeProbabilities {
    /// Symmetric g×g matrix, `matrix[r][s]` being the edge probability between
    /// a vertex of block `r` and a vertex of block `s`.
    Full {
        /// Row-major probability matrix.
        matrix: Vec<Vec<f64>>,
    },
    /// Planted partition pair.
    Planted {
        /// Probability of an edge between two vertices of the same block.
        p_in: f64,
        /// Probability of an edge between vertices of different blocks.
        p_out: f64,
    },
}

impl EdgeProbabilities {
    /// Builds a validated full matrix.
    pub fn full(matrix: Vec<Vec<f64>>) -> Result<Self, SbmError> {
        let probabilities = EdgeProbabilities::Full { matrix };
        probabilities.validate()?;
        Ok(probabilities)
    }

    /// Builds a full matrix from `g * g` values listed in row-major order.
    pub fn from_row_major(values: &[f64], blocks: usize) -> Result<Self, SbmError> {
        if blocks == 0 || values.len() != blocks * blocks {
            return Err(SbmError::Model(
                ErrorInfo::new(
                    "matrix-shape",
                    "row-major probabilities must contain g * g values",
                )
                .with_context("blocks", blocks)
                .with_context("values", values.len()),
            ));
        }
        let matrix = values.chunks(blocks).map(|row| row.to_vec()).collect();
        Self::full(matrix)
    }

    /// Builds a validated planted partition pair.
    pub fn planted(p_in: f64, p_out: f64) -> Result<Self, SbmError> {
        let probabilities = EdgeProbabilities::Planted { p_in, p_out };
        probabilities.validate()?;
        Ok(probabilities)
    }

    /// Checks that the matrix is square, symmetric and strictly inside `(0, 1)`.
    pub fn validate(&self) -> Result<(), SbmError> {
        match self {
            EdgeProbabilities::Full { matrix } => {
                let blocks = matrix.len();
                if blocks == 0 {
                    return Err(SbmError::Model(ErrorInfo::new(
                        "empty-matrix",
                        "probability matrix must have at least one block",
                    )));
                }
                for (r, row) in matrix.iter().enumerate() {
                    if row.len() != blocks {
                        return Err(SbmError::Model(
                            ErrorInfo::new("matrix-shape", "probability matrix must be square")
                                .with_context("row", r)
                                .with_context("len", row.len())
                                .with_context("blocks", blocks),
                        ));
                    }
                    for (s, &value) in row.iter().enumerate() {
                        check_open_unit(value, r, s)?;
                    }
                }
                for r in 0..blocks {
                    for s in (r + 1)..blocks {
                        if (matrix[r][s] - matrix[s][r]).abs() > SYMMETRY_TOLERANCE {
                            return Err(SbmError::Model(
                                ErrorInfo::new(
                                    "asymmetric-matrix",
                                    "undirected models require a symmetric probability matrix",
                                )
                                .with_context("r", r)
                                .with_context("s", s),
                            ));
                        }
                    }
                }
                Ok(())
            }
            EdgeProbabilities::Planted { p_in, p_out } => {
                check_open_unit(*p_in, 0, 0)?;
                check_open_unit(*p_out, 0, 1)
            }
        }
    }

    /// Checks that the probabilities can drive a chain over `blocks` blocks
    /// scored with `model`.
    pub fn check_compatible(&self, model: ModelKind, blocks: usize) -> Result<(), SbmError> {
        self.validate()?;
        if let Some(matrix_blocks) = self.block_count() {
            if matrix_blocks != blocks {
                return Err(SbmError::Model(
                    ErrorInfo::new(
                        "block-count-mismatch",
                        "probability matrix size differs from the number of blocks",
                    )
                    .with_context("matrix", matrix_blocks)
                    .with_context("blocks", blocks),
                ));
            }
        }
        if model == ModelKind::Ppm && !self.is_planted() {
            return Err(SbmError::Model(
                ErrorInfo::new(
                    "ppm-requires-planted",
                    "the planted partition model needs one in-block and one out-of-block probability",
                )
                .with_hint("pass (p_in, p_out) or a matrix with a constant diagonal and constant off-diagonal"),
            ));
        }
        Ok(())
    }

    /// Edge probability between blocks `r` and `s`.
    #[inline]
    pub fn get(&self, r: BlockId, s: BlockId) -> f64 {
        match self {
            EdgeProbabilities::Full { matrix } => matrix[r][s],
            EdgeProbabilities::Planted { p_in, p_out } => {
                if r == s {
                    *p_in
                } else {
                    *p_out
                }
            }
        }
    }

    /// Returns `(p_in, p_out)`.
    ///
    /// For a full matrix these are `matrix[0][0]` and `matrix[0][1]`; a single
    /// block matrix reports `p_out == p_in`.
    pub fn in_out(&self) -> (f64, f64) {
        match self {
            EdgeProbabilities::Full { matrix } => {
                let p_in = matrix[0][0];
                let p_out = matrix[0].get(1).copied().unwrap_or(p_in);
                (p_in, p_out)
            }
            EdgeProbabilities::Planted { p_in, p_out } => (*p_in, *p_out),
        }
    }

    /// Number of blocks fixed by the matrix, `None` for a planted pair.
    pub fn block_count(&self) -> Option<usize> {
        match self {
            EdgeProbabilities::Full { matrix } => Some(matrix.len()),
            EdgeProbabilities::Planted { .. } => None,
        }
    }

    /// Whether every diagonal entry equals `p_in` and every off-diagonal entry
    /// equals `p_out`.
    pub fn is_planted(&self) -> bool {
        match self {
            EdgeProbabilities::Planted { .. } => true,
            EdgeProbabilities::Full { matrix } => {
                let (p_in, p_out) = self.in_out();
                matrix.iter().enumerate().all(|(r, row)| {
                    row.iter().enumerate().all(|(s, &value)| {
                        let expected = if r == s { p_in } else { p_out };
                        (value - expected).abs() <= SYMMETRY_TOLERANCE
                    })
                })
            }
        }
    }

    /// Materializes the g×g matrix.
    pub fn to_matrix(&self, blocks: usize) -> Vec<Vec<f64>> {
        (0..blocks)
            .map(|r| (0..blocks).map(|s| self.get(r, s)).collect())
            .collect()
    }
}

fn check_open_unit(value: f64, r: usize, s: usize) -> Result<(), SbmError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(SbmError::Model(
            ErrorInfo::new(
                "probability-out-of-range",
                "edge probabilities must lie strictly between 0 and 1",
            )
            .with_context("r", r)
            .with_context("s", s)
            .with_context("value", value),
        ))
    }
}
