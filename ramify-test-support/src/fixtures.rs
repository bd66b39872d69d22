//! Deterministic weight matrices shared by unit, integration and CLI tests.
//!
//! Each fixture returns plain rows so callers can wrap them in whichever
//! matrix or file format they exercise.

/// Two lineages splitting from a shared trunk.
///
/// With the default threshold of `0.5` the rows label as
/// `["1,2", "1,2", "1", "1", "2", ""]`.
#[must_use]
pub fn bifurcation() -> Vec<Vec<f64>> {
    vec![
        vec![0.9, 0.8],
        vec![0.7, 0.6],
        vec![0.95, 0.1],
        vec![0.6, 0.5],
        vec![0.2, 0.9],
        vec![0.5, 0.5],
    ]
}

/// Three lineages where lineages one and two share a trunk that later joins
/// lineage three.
///
/// With a threshold of `0.5` the rows label as
/// `["1", "1", "2", "1,2", "1,2", "1,2,3", "3"]`.
#[must_use]
pub fn nested_branches() -> Vec<Vec<f64>> {
    vec![
        vec![0.9, 0.1, 0.0],
        vec![0.8, 0.4, 0.2],
        vec![0.3, 0.7, 0.1],
        vec![0.8, 0.9, 0.0],
        vec![0.6, 0.55, 0.4],
        vec![0.7, 0.8, 0.9],
        vec![0.0, 0.2, 0.99],
    ]
}

/// Cell count-by-lineage matrix with a repeating band pattern, large enough
/// to exercise parallel labelling.
///
/// Row `i` gives lineage `i % lineages` weight `0.9`, its right neighbour
/// `0.6` when `i` is even, and every other lineage `0.1`.
#[must_use]
pub fn banded(cells: usize, lineages: usize) -> Vec<Vec<f64>> {
    (0..cells)
        .map(|cell| {
            let primary = cell % lineages.max(1);
            let secondary = (primary + 1) % lineages.max(1);
            (0..lineages)
                .map(|lineage| {
                    if lineage == primary {
                        0.9
                    } else if lineage == secondary && cell % 2 == 0 {
                        0.6
                    } else {
                        0.1
                    }
                })
                .collect()
        })
        .collect()
}
