//! Validated lineage-membership threshold.

use std::num::NonZeroUsize;

use crate::{Result, error::RamifyError};

/// Weight a cell must strictly exceed to be assigned a lineage.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use ramify_core::Threshold;
///
/// let explicit = Threshold::new(0.25)?;
/// assert_eq!(explicit.get(), 0.25);
///
/// let lineages = NonZeroUsize::new(4).expect("non-zero");
/// assert_eq!(Threshold::default_for(lineages).get(), 0.25);
/// assert!(Threshold::new(1.5).is_err());
/// # Ok::<(), ramify_core::RamifyError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Validates an explicit threshold.
    ///
    /// # Errors
    /// Returns [`RamifyError::InvalidParameter`] when `value` is NaN or
    /// outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RamifyError::InvalidParameter {
                parameter: "thresh",
                requirement: "between 0 and 1",
                got: value,
            })
        }
    }

    /// The default threshold for `lineages` lineages: `1 / L`.
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "the default threshold is the reciprocal of the lineage count"
    )]
    #[must_use]
    pub fn default_for(lineages: NonZeroUsize) -> Self {
        Self(1.0 / lineages.get() as f64)
    }

    /// Returns the explicit threshold when given, otherwise the default for
    /// `lineages`.
    ///
    /// # Errors
    /// Returns [`RamifyError::InvalidParameter`] when `requested` is invalid.
    pub fn resolve(requested: Option<f64>, lineages: NonZeroUsize) -> Result<Self> {
        requested.map_or_else(|| Ok(Self::default_for(lineages)), Self::new)
    }

    /// Returns the raw threshold value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}
