use ramify_core::{CurveFit, WeightMatrix, WeightSource, WeightSourceError};

#[must_use]
pub fn fit(name: &str, rows: Vec<Vec<f64>>) -> CurveFit {
    CurveFit::new(
        name,
        WeightMatrix::try_from_rows(rows).expect("fixture weights must be valid"),
    )
}

/// Source whose declared lineage count can disagree with its matrix.
pub struct Misdeclared {
    declared: usize,
    weights: WeightMatrix,
}

impl Misdeclared {
    #[must_use]
    pub fn new(declared: usize, rows: Vec<Vec<f64>>) -> Self {
        Self {
            declared,
            weights: WeightMatrix::try_from_rows(rows).expect("fixture weights must be valid"),
        }
    }
}

impl WeightSource for Misdeclared {
    fn name(&self) -> &str {
        "misdeclared"
    }

    fn lineage_count(&self) -> usize {
        self.declared
    }

    fn weights(&self) -> Result<&WeightMatrix, WeightSourceError> {
        Ok(&self.weights)
    }
}
