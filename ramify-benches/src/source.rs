//! Seeded synthetic curve weights.
//!
//! [`SyntheticWeights`] draws every weight uniformly from `[0, 1)`, so with
//! the default `1 / L` threshold most cells share several lineages and the
//! label universe grows quickly with `L`.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use ramify_core::{CurveFit, WeightMatrix, WeightSourceError};

use crate::params::MatrixBenchParams;

/// Errors that may occur during synthetic weight generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested cell count was zero.
    #[error("cell count must be greater than zero")]
    ZeroCells,
    /// The requested lineage count was zero.
    #[error("lineage count must be greater than zero")]
    ZeroLineages,
}

/// Configuration for synthetic weight generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Matrix shape.
    pub shape: MatrixBenchParams,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Random curve weights for benchmarking.
///
/// # Examples
///
/// ```
/// use ramify_benches::{
///     params::MatrixBenchParams,
///     source::{SyntheticConfig, SyntheticWeights},
/// };
///
/// let config = SyntheticConfig {
///     shape: MatrixBenchParams { cells: 10, lineages: 3 },
///     seed: 42,
/// };
/// let weights = SyntheticWeights::generate(&config).expect("valid config");
/// assert_eq!(weights.matrix().cells(), 10);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticWeights {
    matrix: WeightMatrix,
}

impl SyntheticWeights {
    /// Generates weights eagerly from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroCells`] or
    /// [`SyntheticError::ZeroLineages`] for an empty shape.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        let MatrixBenchParams { cells, lineages } = config.shape;
        if cells == 0 {
            return Err(SyntheticError::ZeroCells);
        }
        if lineages == 0 {
            return Err(SyntheticError::ZeroLineages);
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let values: Vec<f64> = (0..cells.saturating_mul(lineages))
            .map(|_| rng.gen_range(0.0_f64..1.0_f64))
            .collect();
        let matrix = WeightMatrix::try_new(lineages, values).map_err(|err| match err {
            WeightSourceError::NoLineages => SyntheticError::ZeroLineages,
            _ => SyntheticError::ZeroCells,
        })?;
        Ok(Self { matrix })
    }

    /// Returns the generated matrix.
    #[must_use]
    pub const fn matrix(&self) -> &WeightMatrix {
        &self.matrix
    }

    /// Wraps the matrix in a [`CurveFit`] named `synthetic`.
    #[must_use]
    pub fn into_fit(self) -> CurveFit {
        CurveFit::new("synthetic", self.matrix)
    }
}
