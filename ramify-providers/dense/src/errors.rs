use arrow_schema::{ArrowError, DataType};
use ramify_core::WeightSourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DenseWeightsProviderError {
    #[error("column `{column}` not found in Parquet schema")]
    ColumnNotFound { column: String },
    #[error("column `{column}` must be a FixedSizeList<Float64, _> but found {actual:?}")]
    InvalidColumnType { column: String, actual: DataType },
    #[error("FixedSizeList child type must be Float64 but found {actual:?}")]
    InvalidListValueType { actual: DataType },
    #[error("invalid lineage count {actual}")]
    InvalidLineageCount { actual: i32 },
    #[error("row {row} is null")]
    NullRow { row: usize },
    #[error("row {row} has a null weight for lineage {lineage}")]
    NullWeight { row: usize, lineage: usize },
    #[error("row {row} has {actual} weights but expected {expected}")]
    InvalidRowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("matrix with {rows} rows and {lineages} lineages exceeds capacity limits")]
    CapacityOverflow { rows: usize, lineages: usize },
    #[error("inconsistent lineage counts across batches: expected {expected}, got {actual}")]
    InconsistentBatchLineages { expected: usize, actual: usize },
    #[error("invalid weights: {0}")]
    Weights(#[from] WeightSourceError),
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
