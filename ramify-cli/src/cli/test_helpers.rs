//! Helpers shared across CLI tests: temporary Parquet inputs and command
//! builders.

use std::{fs::File, path::PathBuf, sync::Arc};

use arrow_array::{ArrayRef, FixedSizeListArray, Float64Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::arrow_writer::ArrowWriter;
use tempfile::TempDir;

use super::{AnalysisArgs, ParquetArgs, WeightsSource};

pub(super) const COLUMN: &str = "weights";

pub(super) type TestResult = Result<(), Box<dyn std::error::Error>>;

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// Writes `rows` to `name` inside `dir` as a single `FixedSizeList<Float64, L>`
/// column called [`COLUMN`].
pub(super) fn create_weights_file(
    dir: &TempDir,
    name: &str,
    rows: &[Vec<f64>],
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let lineages = rows.first().map_or(0, Vec::len);
    let width = i32::try_from(lineages)?;
    let item = Arc::new(Field::new("item", DataType::Float64, true));
    let values = Float64Array::from_iter_values(rows.iter().flatten().copied());
    let list = FixedSizeListArray::try_new(
        Arc::clone(&item),
        width,
        Arc::new(values) as ArrayRef,
        None,
    )?;
    let schema = Arc::new(Schema::new(vec![Field::new(
        COLUMN,
        DataType::FixedSizeList(item, width),
        false,
    )]));
    let batch = RecordBatch::try_new(Arc::clone(&schema), vec![Arc::new(list) as ArrayRef])?;

    let path = dir.path().join(name);
    let mut writer = ArrowWriter::try_new(File::create(&path)?, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(path)
}

pub(super) fn parquet_source(path: PathBuf) -> WeightsSource {
    WeightsSource::Parquet(ParquetArgs {
        path,
        column: COLUMN.to_owned(),
        name: None,
        lineage_names: None,
    })
}

pub(super) fn with_thresh(thresh: f64) -> AnalysisArgs {
    AnalysisArgs {
        thresh: Some(thresh),
        ..AnalysisArgs::default()
    }
}
