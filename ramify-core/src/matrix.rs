//! Dense cell-by-lineage weight matrix.

use crate::error::WeightSourceError;

/// Row-major matrix of lineage membership weights, one row per cell and one
/// column per lineage.
///
/// Construction validates the shape and rejects non-finite weights. Weights
/// are not required to lie in `[0, 1]` or to sum to one across a row.
///
/// # Examples
/// ```
/// use ramify_core::WeightMatrix;
///
/// let weights = WeightMatrix::try_from_rows(vec![vec![0.9, 0.1], vec![0.6, 0.7]])?;
/// assert_eq!(weights.cells(), 2);
/// assert_eq!(weights.lineage_count(), 2);
/// assert_eq!(weights.row(1)?, &[0.6, 0.7]);
/// assert_eq!(weights.lineage_names(), ["Lineage1", "Lineage2"]);
/// # Ok::<(), ramify_core::WeightSourceError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WeightMatrix {
    cells: usize,
    lineages: usize,
    values: Vec<f64>,
    lineage_names: Vec<String>,
}

impl WeightMatrix {
    /// Builds a matrix from a contiguous row-major buffer.
    ///
    /// # Errors
    /// Returns [`WeightSourceError::NoLineages`] when `lineages == 0`,
    /// [`WeightSourceError::EmptyWeights`] when `values` is empty,
    /// [`WeightSourceError::RaggedRow`] when `values.len()` is not a multiple
    /// of `lineages`, and [`WeightSourceError::NonFiniteWeight`] for NaN or
    /// infinite entries.
    pub fn try_new(lineages: usize, values: Vec<f64>) -> Result<Self, WeightSourceError> {
        if lineages == 0 {
            return Err(WeightSourceError::NoLineages);
        }
        if values.is_empty() {
            return Err(WeightSourceError::EmptyWeights);
        }
        let remainder = values.len() % lineages;
        let cells = values.len() / lineages;
        if remainder != 0 {
            return Err(WeightSourceError::RaggedRow {
                row: cells,
                expected: lineages,
                actual: remainder,
            });
        }
        validate_finite(&values, lineages)?;
        Ok(Self {
            cells,
            lineages,
            values,
            lineage_names: default_lineage_names(lineages),
        })
    }

    /// Builds a matrix from one vector of weights per cell.
    ///
    /// # Errors
    /// Returns [`WeightSourceError::EmptyWeights`] when `rows` is empty,
    /// [`WeightSourceError::NoLineages`] when the first row is empty and
    /// [`WeightSourceError::RaggedRow`] when row lengths differ, plus the
    /// errors of [`Self::try_new`].
    pub fn try_from_rows(rows: Vec<Vec<f64>>) -> Result<Self, WeightSourceError> {
        let Some(first) = rows.first() else {
            return Err(WeightSourceError::EmptyWeights);
        };
        let lineages = first.len();
        if lineages == 0 {
            return Err(WeightSourceError::NoLineages);
        }
        let mut values = Vec::with_capacity(rows.len().saturating_mul(lineages));
        for (row, weights) in rows.into_iter().enumerate() {
            if weights.len() != lineages {
                return Err(WeightSourceError::RaggedRow {
                    row,
                    expected: lineages,
                    actual: weights.len(),
                });
            }
            values.extend(weights);
        }
        Self::try_new(lineages, values)
    }

    /// Replaces the default `Lineage1..LineageL` column names.
    ///
    /// # Errors
    /// Returns [`WeightSourceError::LineageNameMismatch`] when the number of
    /// names differs from the number of lineage columns.
    pub fn with_lineage_names<I, S>(mut self, names: I) -> Result<Self, WeightSourceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.lineages {
            return Err(WeightSourceError::LineageNameMismatch {
                names: names.len(),
                lineages: self.lineages,
            });
        }
        self.lineage_names = names;
        Ok(self)
    }

    /// Number of cells (rows).
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.cells
    }

    /// Number of lineages (columns).
    #[must_use]
    pub const fn lineage_count(&self) -> usize {
        self.lineages
    }

    /// Lineage column names in column order.
    #[must_use]
    pub fn lineage_names(&self) -> &[String] {
        &self.lineage_names
    }

    /// Underlying row-major buffer.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the weights of one cell.
    ///
    /// # Errors
    /// Returns [`WeightSourceError::OutOfBounds`] when `index >= cells()`.
    pub fn row(&self, index: usize) -> Result<&[f64], WeightSourceError> {
        let start = index
            .checked_mul(self.lineages)
            .ok_or(WeightSourceError::OutOfBounds { index })?;
        let end = start
            .checked_add(self.lineages)
            .ok_or(WeightSourceError::OutOfBounds { index })?;
        self.values
            .get(start..end)
            .ok_or(WeightSourceError::OutOfBounds { index })
    }

    /// Iterates the rows in cell order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.lineages)
    }
}

fn validate_finite(values: &[f64], lineages: usize) -> Result<(), WeightSourceError> {
    match values.iter().position(|weight| !weight.is_finite()) {
        Some(position) => Err(WeightSourceError::NonFiniteWeight {
            row: position / lineages,
            lineage: position % lineages,
        }),
        None => Ok(()),
    }
}

fn default_lineage_names(lineages: usize) -> Vec<String> {
    (1..=lineages).map(|lineage| format!("Lineage{lineage}")).collect()
}
