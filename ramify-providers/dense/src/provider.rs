//! Parquet-backed weight provider.
use std::{fs::File, path::Path};

use arrow_array::{Array, FixedSizeListArray, RecordBatchReader};
use parquet::{
    arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder},
    file::reader::ChunkReader,
};
use ramify_core::{WeightMatrix, WeightSource, WeightSourceError};

use crate::{
    errors::DenseWeightsProviderError,
    ingest::{append_weight_rows, validate_weights_field},
};

/// Weight matrix loaded from an Arrow or Parquet `FixedSizeList<Float64, L>`
/// column, one list per cell.
#[derive(Debug)]
pub struct DenseWeightsProvider {
    name: String,
    weights: WeightMatrix,
}

impl DenseWeightsProvider {
    fn from_values(
        name: impl Into<String>,
        lineages: usize,
        values: Vec<f64>,
    ) -> Result<Self, DenseWeightsProviderError> {
        Ok(Self {
            name: name.into(),
            weights: WeightMatrix::try_new(lineages, values)?,
        })
    }

    /// Loads weights from an Arrow [`FixedSizeListArray`].
    ///
    /// # Errors
    /// Fails when the child type is not `Float64`, a row or weight is null,
    /// or the weights are empty or non-finite.
    pub fn try_from_fixed_size_list(
        name: impl Into<String>,
        array: &FixedSizeListArray,
    ) -> Result<Self, DenseWeightsProviderError> {
        let mut values = Vec::new();
        let lineages = append_weight_rows(array, None, 0, &mut values)?;
        Self::from_values(name, lineages, values)
    }

    /// Loads weights from a Parquet file column.
    ///
    /// # Errors
    /// Fails when the file cannot be opened or its column cannot be read as
    /// weights.
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, DenseWeightsProviderError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, column)
    }

    /// Loads weights from a Parquet reader, streaming record batches.
    ///
    /// # Errors
    /// Fails when `column` is missing, has the wrong type, or batches
    /// disagree on the lineage count.
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
        column: &str,
    ) -> Result<Self, DenseWeightsProviderError>
    where
        R: ChunkReader + Send + 'static,
    {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mask = ProjectionMask::columns(builder.parquet_schema(), [column]);
        let batches = builder.with_projection(mask).build()?;
        let schema = batches.schema();
        let column_index =
            schema
                .index_of(column)
                .map_err(|_| DenseWeightsProviderError::ColumnNotFound {
                    column: column.to_owned(),
                })?;
        let lineages = validate_weights_field(schema.field(column_index), column)?;
        let mut values = Vec::new();
        let mut rows = 0_usize;
        for batch in batches {
            let batch = batch?;
            let column_array = batch.column(column_index);
            let list = column_array
                .as_any()
                .downcast_ref::<FixedSizeListArray>()
                .ok_or_else(|| DenseWeightsProviderError::InvalidColumnType {
                    column: column.to_owned(),
                    actual: column_array.data_type().clone(),
                })?;
            append_weight_rows(list, Some(lineages), rows, &mut values)?;
            rows += list.len();
        }
        Self::from_values(name, lineages, values)
    }

    /// Replaces the default `Lineage1..L` names.
    ///
    /// # Errors
    /// Returns [`WeightSourceError::LineageNameMismatch`] when the number of
    /// names differs from the lineage count.
    pub fn with_lineage_names<I, S>(mut self, names: I) -> Result<Self, DenseWeightsProviderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weights = self.weights.with_lineage_names(names)?;
        Ok(self)
    }
}

impl WeightSource for DenseWeightsProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn lineage_count(&self) -> usize {
        self.weights.lineage_count()
    }

    fn weights(&self) -> Result<&WeightMatrix, WeightSourceError> {
        Ok(&self.weights)
    }
}
