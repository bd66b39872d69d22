//! Shared test utilities for `ramify-core`.

use crate::{labels::BranchLabels, lineage_set::LineageSet, matrix::WeightMatrix};

/// Builds a weight matrix from row literals.
#[must_use]
pub(crate) fn matrix(rows: &[&[f64]]) -> WeightMatrix {
    WeightMatrix::try_from_rows(rows.iter().map(|row| row.to_vec()).collect())
        .expect("test weights must be valid")
}

/// Builds labels from canonical label strings, one per cell.
#[must_use]
pub(crate) fn labels(raw: &[&str]) -> BranchLabels {
    let parsed: Vec<LineageSet> = raw
        .iter()
        .map(|label| label.parse().expect("test label must parse"))
        .collect();
    BranchLabels::from_labels(parsed, 0)
}
