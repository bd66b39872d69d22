//! Error types for the ramify core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while reading a weight matrix from a
/// [`crate::WeightSource`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum WeightSourceError {
    /// The matrix has no lineage columns.
    #[error("weight matrix has no lineage columns")]
    NoLineages,
    /// The matrix has no cell rows.
    #[error("weight matrix contains no cells")]
    EmptyWeights,
    /// A row did not have one weight per lineage.
    #[error("row {row} has {actual} weights but {expected} lineages were declared")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of lineages declared by the matrix.
        expected: usize,
        /// Number of weights found in the row.
        actual: usize,
    },
    /// A weight was NaN or infinite.
    #[error("weight for cell {row}, lineage {lineage} is not finite")]
    NonFiniteWeight {
        /// Zero-based row index.
        row: usize,
        /// Zero-based lineage index.
        lineage: usize,
    },
    /// The number of lineage names did not match the number of columns.
    #[error("{names} lineage names were supplied for {lineages} lineage columns")]
    LineageNameMismatch {
        /// Number of names supplied.
        names: usize,
        /// Number of lineage columns in the matrix.
        lineages: usize,
    },
    /// The source declared a different lineage count from its matrix.
    #[error("source declares {declared} lineages but its matrix has {actual} columns")]
    LineageCountMismatch {
        /// Lineage count reported before the matrix was read.
        declared: usize,
        /// Columns in the matrix.
        actual: usize,
    },
    /// Requested row was outside the matrix bounds.
    #[error("row {index} is out of bounds")]
    OutOfBounds {
        /// The requested row.
        index: usize,
    },
    /// An experiment container held no trajectory fit.
    #[error("experiment holds no trajectory fit")]
    MissingFit,
    /// The fit attached to an experiment describes a different number of cells.
    #[error("experiment has {cells} cells but the attached fit has {rows} rows")]
    CellCountMismatch {
        /// Cells registered on the experiment.
        cells: usize,
        /// Rows in the fit's weight matrix.
        rows: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`WeightSourceError`] variants.
    enum WeightSourceErrorCode for WeightSourceError {
        /// The matrix has no lineage columns.
        NoLineages => NoLineages => "WEIGHT_SOURCE_NO_LINEAGES",
        /// The matrix has no cell rows.
        EmptyWeights => EmptyWeights => "WEIGHT_SOURCE_EMPTY",
        /// A row did not have one weight per lineage.
        RaggedRow => RaggedRow { .. } => "WEIGHT_SOURCE_RAGGED_ROW",
        /// A weight was NaN or infinite.
        NonFiniteWeight => NonFiniteWeight { .. } => "WEIGHT_SOURCE_NON_FINITE_WEIGHT",
        /// The number of lineage names did not match the number of columns.
        LineageNameMismatch => LineageNameMismatch { .. } => "WEIGHT_SOURCE_LINEAGE_NAME_MISMATCH",
        /// The source declared a different lineage count from its matrix.
        LineageCountMismatch => LineageCountMismatch { .. } => "WEIGHT_SOURCE_LINEAGE_COUNT_MISMATCH",
        /// Requested row was outside the matrix bounds.
        OutOfBounds => OutOfBounds { .. } => "WEIGHT_SOURCE_OUT_OF_BOUNDS",
        /// An experiment container held no trajectory fit.
        MissingFit => MissingFit => "WEIGHT_SOURCE_MISSING_FIT",
        /// The fit attached to an experiment describes a different number of cells.
        CellCountMismatch => CellCountMismatch { .. } => "WEIGHT_SOURCE_CELL_COUNT_MISMATCH",
    }
}

/// Error type produced when configuring or running [`crate::Ramify`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RamifyError {
    /// A caller-supplied parameter was outside its accepted range.
    #[error("{parameter} must be {requirement} (got {got})")]
    InvalidParameter {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// Human-readable statement of the accepted range.
        requirement: &'static str,
        /// The rejected value.
        got: f64,
    },
    /// Branch graph construction received no labels.
    #[error("cannot build a branch graph from zero labelled cells")]
    EmptyLabels,
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// A [`crate::WeightSource`] could not provide a usable matrix.
    #[error("weight source `{data_source}` failed: {error}")]
    WeightSource {
        /// Identifier for the weight source that produced the error.
        data_source: Arc<str>,
        #[source]
        /// Underlying weight source error.
        error: WeightSourceError,
    },
}

define_error_codes! {
    /// Stable codes describing [`RamifyError`] variants.
    enum RamifyErrorCode for RamifyError {
        /// A caller-supplied parameter was outside its accepted range.
        InvalidParameter => InvalidParameter { .. } => "RAMIFY_INVALID_PARAMETER",
        /// Branch graph construction received no labels.
        EmptyLabels => EmptyLabels => "RAMIFY_EMPTY_LABELS",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "RAMIFY_BACKEND_UNAVAILABLE",
        /// A [`crate::WeightSource`] could not provide a usable matrix.
        WeightSourceFailure => WeightSource { .. } => "RAMIFY_WEIGHT_SOURCE_FAILURE",
    }
}

impl RamifyError {
    /// Retrieve the inner [`WeightSourceErrorCode`] when the error originated
    /// in a [`crate::WeightSource`].
    pub const fn weight_source_code(&self) -> Option<WeightSourceErrorCode> {
        match self {
            Self::WeightSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    pub(crate) fn weight_source(data_source: &str, error: WeightSourceError) -> Self {
        Self::WeightSource {
            data_source: Arc::from(data_source),
            error,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, RamifyError>;
