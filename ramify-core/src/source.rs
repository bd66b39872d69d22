//! Weight source abstraction consumed by the [`crate::Ramify`] runtime.

use crate::{error::WeightSourceError, matrix::WeightMatrix};

/// Capability interface over an upstream trajectory-fitting result that can
/// hand out a cell-by-lineage weight matrix.
///
/// `lineage_count` must be answerable without materialising the matrix so the
/// default threshold (`1 / L`) can be resolved before any weight is read.
///
/// # Examples
/// ```
/// use ramify_core::{WeightMatrix, WeightSource, WeightSourceError};
///
/// struct Fixed(WeightMatrix);
///
/// impl WeightSource for Fixed {
///     fn name(&self) -> &str { "fixed" }
///     fn lineage_count(&self) -> usize { self.0.lineage_count() }
///     fn weights(&self) -> Result<&WeightMatrix, WeightSourceError> { Ok(&self.0) }
/// }
///
/// let source = Fixed(WeightMatrix::try_from_rows(vec![vec![0.2, 0.9]])?);
/// assert_eq!(source.lineage_count(), 2);
/// assert_eq!(source.cells()?, 1);
/// assert_eq!(source.lineage_names()?, ["Lineage1", "Lineage2"]);
/// # Ok::<(), WeightSourceError>(())
/// ```
pub trait WeightSource {
    /// Returns a human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Returns the number of lineages described by the source.
    fn lineage_count(&self) -> usize;

    /// Returns the weight matrix.
    ///
    /// # Errors
    /// Returns a [`WeightSourceError`] when the source cannot provide a
    /// matrix, for example an experiment container without a fit.
    fn weights(&self) -> Result<&WeightMatrix, WeightSourceError>;

    /// Returns the number of cells in the weight matrix.
    ///
    /// # Errors
    /// Propagates any error surfaced by [`WeightSource::weights`].
    fn cells(&self) -> Result<usize, WeightSourceError> {
        self.weights().map(WeightMatrix::cells)
    }

    /// Returns one display name per lineage column.
    ///
    /// # Errors
    /// Propagates any error surfaced by [`WeightSource::weights`].
    fn lineage_names(&self) -> Result<&[String], WeightSourceError> {
        self.weights().map(WeightMatrix::lineage_names)
    }
}
