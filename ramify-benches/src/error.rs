//! Benchmark setup error type.

use ramify_core::{RamifyError, WeightSourceError};

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic weight generation failed.
    #[error("synthetic weight generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The generated matrix was rejected.
    #[error("weight matrix rejected: {0}")]
    Weights(#[from] WeightSourceError),
    /// Labelling or graph construction failed.
    #[error("branch analysis failed: {0}")]
    Ramify(#[from] RamifyError),
}
