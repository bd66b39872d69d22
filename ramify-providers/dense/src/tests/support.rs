use std::sync::Arc;

use arrow_array::{ArrayRef, FixedSizeListArray, Float64Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_writer::ArrowWriter;

pub(crate) const COLUMN: &str = "weights";

pub(crate) fn weights_array(rows: &[Vec<f64>], lineages: usize) -> FixedSizeListArray {
    assert!(rows.iter().all(|row| row.len() == lineages));
    let values = Float64Array::from_iter_values(rows.iter().flatten().copied());
    FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::Float64, true)),
        i32::try_from(lineages).expect("lineage count fits in i32"),
        Arc::new(values) as ArrayRef,
        None,
    )
}

pub(crate) fn weights_field(lineages: usize) -> Field {
    Field::new(
        COLUMN,
        DataType::FixedSizeList(
            Arc::new(Field::new("item", DataType::Float64, true)),
            i32::try_from(lineages).expect("lineage count fits in i32"),
        ),
        false,
    )
}

pub(crate) fn write_batches(field: Field, columns: Vec<ArrayRef>) -> Bytes {
    let schema = Arc::new(Schema::new(vec![field]));
    let mut buffer = Vec::new();
    {
        let mut writer =
            ArrowWriter::try_new(&mut buffer, Arc::clone(&schema), None).expect("writer");
        for column in columns {
            let batch =
                RecordBatch::try_new(Arc::clone(&schema), vec![column]).expect("batch");
            writer.write(&batch).expect("write");
        }
        writer.close().expect("close");
    }
    Bytes::from(buffer)
}

pub(crate) fn write_weights(rows: &[Vec<f64>], lineages: usize) -> Bytes {
    write_batches(
        weights_field(lineages),
        vec![Arc::new(weights_array(rows, lineages)) as ArrayRef],
    )
}
