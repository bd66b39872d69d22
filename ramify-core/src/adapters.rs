//! In-memory [`WeightSource`] adapters for the two shapes an upstream
//! trajectory fit arrives in: the bare fit result and an experiment container
//! that carries the fit alongside per-cell identifiers.

use crate::{error::WeightSourceError, matrix::WeightMatrix, source::WeightSource};

/// Raw trajectory-fit result holding the curve weights directly.
///
/// # Examples
/// ```
/// use ramify_core::{CurveFit, WeightMatrix, WeightSource};
///
/// let weights = WeightMatrix::try_from_rows(vec![vec![1.0, 0.0], vec![0.7, 0.8]])?;
/// let fit = CurveFit::new("pseudotime", weights);
/// assert_eq!(fit.name(), "pseudotime");
/// assert_eq!(fit.lineage_count(), 2);
/// # Ok::<(), ramify_core::WeightSourceError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CurveFit {
    name: String,
    weights: WeightMatrix,
}

impl CurveFit {
    /// Wraps a weight matrix produced by an external fit.
    #[must_use]
    pub fn new(name: impl Into<String>, weights: WeightMatrix) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }
}

impl WeightSource for CurveFit {
    fn name(&self) -> &str {
        &self.name
    }

    fn lineage_count(&self) -> usize {
        self.weights.lineage_count()
    }

    fn weights(&self) -> Result<&WeightMatrix, WeightSourceError> {
        Ok(&self.weights)
    }
}

/// Experiment container: a set of named cells that may carry a trajectory
/// fit. Reports zero lineages and [`WeightSourceError::MissingFit`] until a
/// fit is attached.
///
/// # Examples
/// ```
/// use ramify_core::{CellExperiment, CurveFit, WeightMatrix, WeightSource};
///
/// let weights = WeightMatrix::try_from_rows(vec![vec![0.9, 0.1], vec![0.4, 0.6]])?;
/// let experiment = CellExperiment::new("marrow", ["c1", "c2"])
///     .with_fit(CurveFit::new("fit", weights))?;
/// assert_eq!(experiment.lineage_count(), 2);
/// assert_eq!(experiment.cell_ids(), ["c1", "c2"]);
/// # Ok::<(), ramify_core::WeightSourceError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CellExperiment {
    name: String,
    cell_ids: Vec<String>,
    fit: Option<CurveFit>,
}

impl CellExperiment {
    /// Creates a container for the given cells with no fit attached.
    pub fn new<I, S>(name: impl Into<String>, cell_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            cell_ids: cell_ids.into_iter().map(Into::into).collect(),
            fit: None,
        }
    }

    /// Attaches a fit whose rows correspond positionally to the cells.
    ///
    /// # Errors
    /// Returns [`WeightSourceError::CellCountMismatch`] when the fit's row
    /// count differs from the number of registered cells.
    pub fn with_fit(mut self, fit: CurveFit) -> Result<Self, WeightSourceError> {
        let rows = fit.weights.cells();
        if rows != self.cell_ids.len() {
            return Err(WeightSourceError::CellCountMismatch {
                cells: self.cell_ids.len(),
                rows,
            });
        }
        self.fit = Some(fit);
        Ok(self)
    }

    /// Identifiers of the cells, in row order.
    #[must_use]
    pub fn cell_ids(&self) -> &[String] {
        &self.cell_ids
    }

    /// The attached fit, if any.
    #[must_use]
    pub const fn fit(&self) -> Option<&CurveFit> {
        self.fit.as_ref()
    }
}

impl WeightSource for CellExperiment {
    fn name(&self) -> &str {
        &self.name
    }

    fn lineage_count(&self) -> usize {
        self.fit.as_ref().map_or(0, WeightSource::lineage_count)
    }

    fn weights(&self) -> Result<&WeightMatrix, WeightSourceError> {
        self.fit
            .as_ref()
            .ok_or(WeightSourceError::MissingFit)
            .and_then(WeightSource::weights)
    }
}
