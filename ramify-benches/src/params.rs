//! Benchmark parameter types.

use std::fmt;

/// Shape of a synthetic weight matrix.
#[derive(Clone, Copy, Debug)]
pub struct MatrixBenchParams {
    /// Number of cells (rows).
    pub cells: usize,
    /// Number of lineages (columns).
    pub lineages: usize,
}

impl fmt::Display for MatrixBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},L={}", self.cells, self.lineages)
    }
}
