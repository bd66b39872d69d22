//! Branch analysis orchestration.
//!
//! Provides the [`Ramify`] runtime entry point, which resolves the threshold
//! for a [`WeightSource`], selects a labelling backend and wraps weight
//! source failures.

use std::num::NonZeroUsize;

use tracing::{instrument, warn};

use crate::{
    Result,
    branch::{BranchGraph, build_branch_graph},
    builder::ExecutionStrategy,
    error::{RamifyError, WeightSourceError},
    labels::{BranchLabels, WeightScale, assign_labels_with},
    source::WeightSource,
    threshold::Threshold,
};

/// Entry point for labelling cells and building branch graphs.
///
/// # Examples
/// ```
/// use ramify_core::{CurveFit, RamifyBuilder, WeightMatrix};
///
/// let weights = WeightMatrix::try_from_rows(vec![
///     vec![0.9, 0.1],
///     vec![0.1, 0.9],
///     vec![0.8, 0.7],
/// ])?;
/// let fit = CurveFit::new("fit", weights);
/// let ramify = RamifyBuilder::new().build()?;
///
/// let labels = ramify.branch_labels(&fit)?;
/// assert_eq!(labels.label_strings(), ["1", "2", "1,2"]);
///
/// let graph = ramify.branch_graph(&fit)?;
/// assert_eq!(graph.edge_count(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Ramify {
    thresh: Option<Threshold>,
    max_node_size: f64,
    weight_scale: WeightScale,
    execution_strategy: ExecutionStrategy,
}

impl Ramify {
    pub(crate) const fn new(
        thresh: Option<Threshold>,
        max_node_size: f64,
        weight_scale: WeightScale,
        execution_strategy: ExecutionStrategy,
    ) -> Self {
        Self {
            thresh,
            max_node_size,
            weight_scale,
            execution_strategy,
        }
    }

    /// Returns the explicit threshold, or `None` when `1 / L` is used.
    #[must_use]
    pub const fn thresh(&self) -> Option<Threshold> {
        self.thresh
    }

    /// Returns the display size given to the most populated vertex.
    #[must_use]
    pub const fn max_node_size(&self) -> f64 {
        self.max_node_size
    }

    /// Returns how rows are scaled before thresholding.
    #[must_use]
    pub const fn weight_scale(&self) -> WeightScale {
        self.weight_scale
    }

    /// Returns the execution strategy used when labelling.
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Labels every cell of `source`.
    ///
    /// The threshold is resolved from [`WeightSource::lineage_count`] before
    /// the matrix is read.
    ///
    /// # Errors
    /// Returns [`RamifyError::WeightSource`] when the source cannot provide
    /// its matrix or declares a lineage count that differs from it (a source
    /// declaring no lineages reports why its matrix is unavailable), and
    /// [`RamifyError::BackendUnavailable`] when parallel labelling was
    /// requested in a build without the `parallel` feature.
    #[instrument(
        name = "core.branch_labels",
        err,
        skip(self, source),
        fields(
            data_source = %source.name(),
            lineages = source.lineage_count(),
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn branch_labels<S>(&self, source: &S) -> Result<BranchLabels>
    where
        S: WeightSource + ?Sized,
    {
        let Some(lineages) = NonZeroUsize::new(source.lineage_count()) else {
            warn!(data_source = source.name(), "weight source declares no lineages");
            let error = match source.weights() {
                Err(error) => error,
                Ok(weights) => WeightSourceError::LineageCountMismatch {
                    declared: 0,
                    actual: weights.lineage_count(),
                },
            };
            return Err(RamifyError::weight_source(source.name(), error));
        };
        let threshold = self
            .thresh
            .unwrap_or_else(|| Threshold::default_for(lineages));
        let parallel = self.use_parallel()?;
        let weights = source
            .weights()
            .map_err(|error| RamifyError::weight_source(source.name(), error))?;
        if weights.lineage_count() != lineages.get() {
            return Err(RamifyError::weight_source(
                source.name(),
                WeightSourceError::LineageCountMismatch {
                    declared: lineages.get(),
                    actual: weights.lineage_count(),
                },
            ));
        }
        Ok(assign_labels_with(
            weights,
            threshold,
            self.weight_scale,
            parallel,
        ))
    }

    /// Labels every cell of `source` and builds the branch graph over the
    /// resulting label universe.
    ///
    /// # Errors
    /// Propagates the failures of [`Self::branch_labels`] and of
    /// [`build_branch_graph`].
    #[instrument(
        name = "core.branch_graph",
        err,
        skip(self, source),
        fields(data_source = %source.name(), max_node_size = self.max_node_size),
    )]
    pub fn branch_graph<S>(&self, source: &S) -> Result<BranchGraph>
    where
        S: WeightSource + ?Sized,
    {
        let labels = self.branch_labels(source)?;
        build_branch_graph(&labels, self.max_node_size)
    }

    fn use_parallel(&self) -> Result<bool> {
        match self.execution_strategy {
            ExecutionStrategy::Auto => Ok(cfg!(feature = "parallel")),
            ExecutionStrategy::Sequential => Ok(false),
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => Ok(true),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(RamifyError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
        }
    }
}
