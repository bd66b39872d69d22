//! Helpers for copying fixed-size list weight columns into row-major buffers.
use arrow_array::{Array, FixedSizeListArray, Float64Array};
use arrow_schema::{DataType, Field};

use crate::errors::DenseWeightsProviderError;

pub(crate) fn validate_weights_field(
    field: &Field,
    column: &str,
) -> Result<usize, DenseWeightsProviderError> {
    match field.data_type() {
        DataType::FixedSizeList(child, width) => {
            if child.data_type() != &DataType::Float64 {
                return Err(DenseWeightsProviderError::InvalidListValueType {
                    actual: child.data_type().clone(),
                });
            }
            lineage_count(*width)
        }
        other => Err(DenseWeightsProviderError::InvalidColumnType {
            column: column.to_owned(),
            actual: other.clone(),
        }),
    }
}

pub(crate) fn append_weight_rows(
    array: &FixedSizeListArray,
    expected_lineages: Option<usize>,
    start_row: usize,
    out: &mut Vec<f64>,
) -> Result<usize, DenseWeightsProviderError> {
    let value_type = array.value_type();
    if value_type != DataType::Float64 {
        return Err(DenseWeightsProviderError::InvalidListValueType { actual: value_type });
    }
    let lineages = lineage_count(array.value_length())?;
    if let Some(expected) = expected_lineages.filter(|&expected| expected != lineages) {
        return Err(DenseWeightsProviderError::InconsistentBatchLineages {
            expected,
            actual: lineages,
        });
    }
    copy_rows(array, lineages, start_row, out)?;
    Ok(lineages)
}

fn lineage_count(width: i32) -> Result<usize, DenseWeightsProviderError> {
    usize::try_from(width)
        .ok()
        .filter(|&lineages| lineages > 0)
        .ok_or(DenseWeightsProviderError::InvalidLineageCount { actual: width })
}

pub(crate) fn copy_rows(
    array: &FixedSizeListArray,
    lineages: usize,
    start_row: usize,
    out: &mut Vec<f64>,
) -> Result<(), DenseWeightsProviderError> {
    let rows = array.len();
    let additional = rows
        .checked_mul(lineages)
        .ok_or(DenseWeightsProviderError::CapacityOverflow { rows, lineages })?;
    out.reserve(additional);
    for row_index in 0..rows {
        let row = start_row + row_index;
        if array.is_null(row_index) {
            return Err(DenseWeightsProviderError::NullRow { row });
        }
        let values = array.value(row_index);
        let weights = values
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| DenseWeightsProviderError::InvalidListValueType {
                actual: values.data_type().clone(),
            })?;
        if weights.len() != lineages {
            return Err(DenseWeightsProviderError::InvalidRowLength {
                row,
                expected: lineages,
                actual: weights.len(),
            });
        }
        if let Some(lineage) = (0..lineages).find(|&lineage| weights.is_null(lineage)) {
            return Err(DenseWeightsProviderError::NullWeight { row, lineage });
        }
        out.extend(weights.values().iter().copied());
    }
    Ok(())
}
