//! Threshold-based lineage label assignment.
//!
//! Each cell is labelled with the set of lineages whose weight strictly
//! exceeds the threshold. The comparison is `>`: a weight equal to the
//! threshold never assigns its lineage.

use std::{collections::BTreeMap, num::NonZeroUsize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    Result,
    error::{RamifyError, WeightSourceError},
    lineage_set::LineageSet,
    matrix::WeightMatrix,
    threshold::Threshold,
};

/// How raw weights are read before thresholding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WeightScale {
    /// Compare the weights exactly as supplied.
    #[default]
    Raw,
    /// Rescale every row to sum to one first. Rows summing to zero stay zero.
    Probabilities,
}

/// Per-cell lineage labels together with the label universe.
///
/// # Examples
/// ```
/// use ramify_core::{WeightMatrix, assign_labels};
///
/// let weights = WeightMatrix::try_from_rows(vec![
///     vec![0.9, 0.1, 0.0],
///     vec![0.6, 0.7, 0.1],
///     vec![0.2, 0.2, 0.2],
/// ])?;
/// let labels = assign_labels(&weights, None)?;
/// assert_eq!(labels.label_strings(), ["1", "1,2", ""]);
/// assert_eq!(labels.universe().len(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BranchLabels {
    labels: Vec<LineageSet>,
    universe: BTreeMap<LineageSet, usize>,
    lineages: usize,
}

impl BranchLabels {
    /// Builds labels from precomputed label-sets, for example ones parsed
    /// from their canonical strings.
    ///
    /// `lineages` is the size of the lineage ground set; it is widened to
    /// cover the largest index present in `labels`.
    #[must_use]
    pub fn from_labels(labels: Vec<LineageSet>, lineages: usize) -> Self {
        let mut universe = BTreeMap::new();
        let mut widest = lineages;
        for label in &labels {
            if let Some(last) = label.iter().last() {
                widest = widest.max(last.saturating_add(1));
            }
            *universe.entry(label.clone()).or_insert(0_usize) += 1;
        }
        Self {
            labels,
            universe,
            lineages: widest,
        }
    }

    /// Labels in cell order.
    #[must_use]
    pub fn labels(&self) -> &[LineageSet] {
        &self.labels
    }

    /// Canonical label strings in cell order.
    #[must_use]
    pub fn label_strings(&self) -> Vec<String> {
        self.labels.iter().map(ToString::to_string).collect()
    }

    /// Distinct labels with the number of cells holding each, ordered by
    /// cardinality and then by lineage index.
    #[must_use]
    pub const fn universe(&self) -> &BTreeMap<LineageSet, usize> {
        &self.universe
    }

    /// Number of cells holding exactly `label`.
    #[must_use]
    pub fn count(&self, label: &LineageSet) -> usize {
        self.universe.get(label).copied().unwrap_or(0)
    }

    /// Total number of labelled cells.
    #[must_use]
    pub fn cells(&self) -> usize {
        self.labels.len()
    }

    /// Size of the lineage ground set.
    #[must_use]
    pub const fn lineage_count(&self) -> usize {
        self.lineages
    }

    /// Largest label cardinality in the universe, `0` when no cell is
    /// labelled.
    #[must_use]
    pub fn max_cardinality(&self) -> usize {
        self.universe.keys().next_back().map_or(0, LineageSet::len)
    }
}

/// Labels every row of `weights` using `thresh`, or `1 / L` when omitted.
///
/// This is the stand-alone entry point; [`crate::Ramify`] additionally
/// supports row rescaling and backend selection.
///
/// # Errors
/// Returns [`RamifyError::InvalidParameter`] when `thresh` lies outside
/// `[0, 1]`.
pub fn assign_labels(weights: &WeightMatrix, thresh: Option<f64>) -> Result<BranchLabels> {
    let lineages = NonZeroUsize::new(weights.lineage_count()).ok_or_else(|| {
        RamifyError::weight_source("weights", WeightSourceError::NoLineages)
    })?;
    let threshold = Threshold::resolve(thresh, lineages)?;
    Ok(assign_labels_with(weights, threshold, WeightScale::Raw, false))
}

#[instrument(
    name = "core.assign_labels",
    skip_all,
    fields(
        cells = weights.cells(),
        lineages = weights.lineage_count(),
        thresh = threshold.get(),
        scale = ?scale,
        parallel = parallel,
    ),
)]
pub(crate) fn assign_labels_with(
    weights: &WeightMatrix,
    threshold: Threshold,
    scale: WeightScale,
    parallel: bool,
) -> BranchLabels {
    let thresh = threshold.get();
    let labels = if parallel {
        label_rows_parallel(weights, thresh, scale)
    } else {
        weights
            .rows()
            .map(|row| label_row(row, thresh, scale))
            .collect()
    };
    let labels = BranchLabels::from_labels(labels, weights.lineage_count());
    debug!(
        distinct = labels.universe().len(),
        max_cardinality = labels.max_cardinality(),
        "labels assigned"
    );
    #[cfg(feature = "metrics")]
    metrics::counter!("ramify_cells_labelled_total").increment(labels.cells() as u64);
    labels
}

#[cfg(feature = "parallel")]
fn label_rows_parallel(weights: &WeightMatrix, thresh: f64, scale: WeightScale) -> Vec<LineageSet> {
    weights
        .values()
        .par_chunks_exact(weights.lineage_count())
        .map(|row| label_row(row, thresh, scale))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn label_rows_parallel(weights: &WeightMatrix, thresh: f64, scale: WeightScale) -> Vec<LineageSet> {
    weights
        .rows()
        .map(|row| label_row(row, thresh, scale))
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    reason = "probability rescaling divides each weight by its row sum"
)]
fn label_row(row: &[f64], thresh: f64, scale: WeightScale) -> LineageSet {
    let divisor = match scale {
        WeightScale::Raw => 1.0,
        WeightScale::Probabilities => {
            let total: f64 = row.iter().sum();
            if total > 0.0 { total } else { 1.0 }
        }
    };
    row.iter()
        .enumerate()
        .filter(|&(_, &weight)| weight / divisor > thresh)
        .map(|(lineage, _)| lineage)
        .collect()
}
