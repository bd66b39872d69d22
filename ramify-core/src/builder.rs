//! Builder utilities for configuring branch analysis.
//!
//! Exposes the execution strategy selection surface and the validation
//! performed before a [`Ramify`] instance is constructed.

use crate::{
    Result,
    branch::{DEFAULT_MAX_NODE_SIZE, validate_max_node_size},
    labels::WeightScale,
    ramify::Ramify,
    threshold::Threshold,
};

/// Indicates how [`Ramify`] labels the rows of a weight matrix.
///
/// `Auto` picks the parallel backend when the `parallel` feature is compiled
/// in and falls back to sequential labelling otherwise, so results are
/// identical across builds.
///
/// # Examples
/// ```
/// use ramify_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::default();
/// assert_eq!(strategy, ExecutionStrategy::Auto);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select the backend automatically.
    #[default]
    Auto,
    /// Label rows on the calling thread.
    Sequential,
    /// Label rows on the rayon thread pool.
    Parallel,
}

/// Configures and constructs [`Ramify`] instances.
///
/// # Examples
/// ```
/// use ramify_core::{ExecutionStrategy, RamifyBuilder};
///
/// let ramify = RamifyBuilder::new()
///     .with_thresh(0.3)
///     .with_max_node_size(50.0)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(ramify.thresh().map(|t| t.get()), Some(0.3));
/// assert_eq!(ramify.max_node_size(), 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct RamifyBuilder {
    thresh: Option<f64>,
    max_node_size: f64,
    weight_scale: WeightScale,
    execution_strategy: ExecutionStrategy,
}

impl Default for RamifyBuilder {
    fn default() -> Self {
        Self {
            thresh: None,
            max_node_size: DEFAULT_MAX_NODE_SIZE,
            weight_scale: WeightScale::Raw,
            execution_strategy: ExecutionStrategy::Auto,
        }
    }
}

impl RamifyBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use ramify_core::{ExecutionStrategy, RamifyBuilder, WeightScale};
    ///
    /// let builder = RamifyBuilder::new();
    /// assert_eq!(builder.thresh(), None);
    /// assert_eq!(builder.max_node_size(), 100.0);
    /// assert_eq!(builder.weight_scale(), WeightScale::Raw);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit membership threshold. Without one, `1 / L` is used.
    #[must_use]
    pub const fn with_thresh(mut self, thresh: f64) -> Self {
        self.thresh = Some(thresh);
        self
    }

    /// Returns the configured threshold, if any.
    #[must_use]
    pub const fn thresh(&self) -> Option<f64> {
        self.thresh
    }

    /// Overrides the display size of the most populated vertex.
    #[must_use]
    pub const fn with_max_node_size(mut self, max_node_size: f64) -> Self {
        self.max_node_size = max_node_size;
        self
    }

    /// Returns the configured maximum vertex size.
    #[must_use]
    pub const fn max_node_size(&self) -> f64 {
        self.max_node_size
    }

    /// Chooses whether rows are rescaled to probabilities before thresholding.
    ///
    /// # Examples
    /// ```
    /// use ramify_core::{RamifyBuilder, WeightScale};
    ///
    /// let builder = RamifyBuilder::new().with_weight_scale(WeightScale::Probabilities);
    /// assert_eq!(builder.weight_scale(), WeightScale::Probabilities);
    /// ```
    #[must_use]
    pub const fn with_weight_scale(mut self, scale: WeightScale) -> Self {
        self.weight_scale = scale;
        self
    }

    /// Returns the configured weight scale.
    #[must_use]
    pub const fn weight_scale(&self) -> WeightScale {
        self.weight_scale
    }

    /// Sets the execution strategy used when labelling.
    #[must_use]
    pub const fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs a [`Ramify`] instance.
    ///
    /// # Errors
    /// Returns [`crate::RamifyError::InvalidParameter`] when the threshold is
    /// outside `[0, 1]` or `max_node_size` is not a positive finite number.
    ///
    /// # Examples
    /// ```
    /// use ramify_core::{RamifyBuilder, RamifyErrorCode};
    ///
    /// let err = RamifyBuilder::new()
    ///     .with_max_node_size(0.0)
    ///     .build()
    ///     .expect_err("zero-sized vertices are rejected");
    /// assert_eq!(err.code(), RamifyErrorCode::InvalidParameter);
    /// ```
    pub fn build(self) -> Result<Ramify> {
        let thresh = self.thresh.map(Threshold::new).transpose()?;
        validate_max_node_size(self.max_node_size)?;
        Ok(Ramify::new(
            thresh,
            self.max_node_size,
            self.weight_scale,
            self.execution_strategy,
        ))
    }
}
