//! Command-line interface for lineage labelling and branch graphs.
//!
//! `labels` prints one lineage label per cell and the label universe;
//! `graph` prints the branch graph's vertices and edges. Both read weights
//! from a Parquet `FixedSizeList<Float64, L>` column.

mod commands;

pub use commands::{
    AnalysisArgs, Cli, CliError, Command, CommandSummary, GraphCommand, LabelsCommand,
    ParquetArgs, StrategyArg, WeightsSource, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
