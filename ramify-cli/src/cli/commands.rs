//! Command implementations and argument parsing for the ramify CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use ramify_core::{
    BranchGraph, BranchLabels, DEFAULT_MAX_NODE_SIZE, ExecutionStrategy, Ramify, RamifyBuilder,
    RamifyError, WeightScale, WeightSource,
};
use ramify_providers_dense::{DenseWeightsProvider, DenseWeightsProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Marker printed in place of the empty label.
const UNASSIGNED: &str = "-";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ramify",
    about = "Label cells by lineage and build branch graphs from curve weights."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the lineage label of every cell and the label universe.
    Labels(LabelsCommand),
    /// Print the branch graph built from the cell labels.
    Graph(GraphCommand),
}

/// Options shared by every command.
#[derive(Debug, Args, Clone, Default)]
pub struct AnalysisArgs {
    /// Weight a cell must strictly exceed to join a lineage (defaults to 1/L).
    #[arg(long)]
    pub thresh: Option<f64>,

    /// Rescale every row to sum to one before thresholding.
    #[arg(long)]
    pub probabilities: bool,

    /// How rows are labelled.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,
}

/// Options accepted by the `labels` command.
#[derive(Debug, Args, Clone)]
pub struct LabelsCommand {
    /// Labelling options.
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Weight source configuration.
    #[command(subcommand)]
    pub source: WeightsSource,
}

/// Options accepted by the `graph` command.
#[derive(Debug, Args, Clone)]
pub struct GraphCommand {
    /// Labelling options.
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Display size of the most populated vertex.
    #[arg(long = "max-node-size", default_value_t = DEFAULT_MAX_NODE_SIZE)]
    pub max_node_size: f64,

    /// Weight source configuration.
    #[command(subcommand)]
    pub source: WeightsSource,
}

/// Execution strategies selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel when compiled in, sequential otherwise.
    #[default]
    Auto,
    /// Label rows on the calling thread.
    Sequential,
    /// Label rows on the rayon thread pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Weight sources supported by the CLI.
#[derive(Debug, Subcommand, Clone)]
pub enum WeightsSource {
    /// Read a Parquet file with a `FixedSizeList<Float64, L>` column.
    Parquet(ParquetArgs),
}

/// Parquet ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Path to the Parquet file holding curve weights.
    pub path: PathBuf,

    /// Column containing one `FixedSizeList<Float64, L>` row per cell.
    #[arg(long)]
    pub column: String,

    /// Override name for the weight source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,

    /// Comma-separated lineage names, one per weight column.
    #[arg(long = "lineage-names", value_delimiter = ',')]
    pub lineage_names: Option<Vec<String>>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Dense weight ingestion failed.
    #[error(transparent)]
    Dense(#[from] DenseWeightsProviderError),
    /// Labelling or graph construction failed.
    #[error(transparent)]
    Core(#[from] RamifyError),
}

/// Outcome of a CLI command, ready for rendering.
#[derive(Debug, Clone)]
pub enum CommandSummary {
    /// Labels produced by the `labels` command.
    Labels {
        /// Name reported by the weight source.
        data_source: String,
        /// Lineage names in column order.
        lineage_names: Vec<String>,
        /// Per-cell labels and the label universe.
        labels: BranchLabels,
    },
    /// Graph produced by the `graph` command.
    Graph {
        /// Name reported by the weight source.
        data_source: String,
        /// Lineage names in column order.
        lineage_names: Vec<String>,
        /// Branch graph over the label universe.
        graph: BranchGraph,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the weights cannot be loaded or the analysis
/// rejects its parameters.
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<CommandSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Labels(command) => {
            span.record("command", field::display("labels"));
            run_labels(command)
        }
        Command::Graph(command) => {
            span.record("command", field::display("graph"));
            run_graph(command)
        }
    }
}

pub(super) fn run_labels(command: LabelsCommand) -> Result<CommandSummary, CliError> {
    let ramify = configure(&command.analysis, DEFAULT_MAX_NODE_SIZE)?;
    let provider = load_weights(command.source)?;
    let labels = ramify.branch_labels(&provider)?;
    info!(
        data_source = provider.name(),
        cells = labels.cells(),
        distinct = labels.universe().len(),
        "labels command completed"
    );
    Ok(CommandSummary::Labels {
        data_source: provider.name().to_owned(),
        lineage_names: lineage_names(&provider),
        labels,
    })
}

pub(super) fn run_graph(command: GraphCommand) -> Result<CommandSummary, CliError> {
    let ramify = configure(&command.analysis, command.max_node_size)?;
    let provider = load_weights(command.source)?;
    let graph = ramify.branch_graph(&provider)?;
    info!(
        data_source = provider.name(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph command completed"
    );
    Ok(CommandSummary::Graph {
        data_source: provider.name().to_owned(),
        lineage_names: lineage_names(&provider),
        graph,
    })
}

#[instrument(
    name = "cli.configure",
    err,
    skip(analysis),
    fields(thresh = field::Empty, probabilities = analysis.probabilities, strategy = ?analysis.strategy),
)]
pub(super) fn configure(analysis: &AnalysisArgs, max_node_size: f64) -> Result<Ramify, CliError> {
    let mut builder = RamifyBuilder::new()
        .with_max_node_size(max_node_size)
        .with_execution_strategy(analysis.strategy.into());
    if let Some(thresh) = analysis.thresh {
        Span::current().record("thresh", thresh);
        builder = builder.with_thresh(thresh);
    }
    if analysis.probabilities {
        builder = builder.with_weight_scale(WeightScale::Probabilities);
    }
    Ok(builder.build()?)
}

#[instrument(
    name = "cli.load_parquet",
    err,
    skip(source),
    fields(path = field::Empty, column = field::Empty, override_name = field::Empty),
)]
pub(super) fn load_weights(source: WeightsSource) -> Result<DenseWeightsProvider, CliError> {
    let WeightsSource::Parquet(ParquetArgs {
        path,
        column,
        name,
        lineage_names,
    }) = source;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record("column", field::display(&column));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_data_source_name(&path, name.as_deref());
    let provider = DenseWeightsProvider::try_from_parquet_path(chosen_name, &path, &column)?;
    match lineage_names {
        Some(names) => Ok(provider.with_lineage_names(names)?),
        None => Ok(provider),
    }
}

fn lineage_names(provider: &DenseWeightsProvider) -> Vec<String> {
    provider
        .lineage_names()
        .map(<[String]>::to_vec)
        .unwrap_or_default()
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "weights".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` as tab-separated text. The empty label is
/// printed as `-`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use ramify_cli::cli::{CommandSummary, render_summary};
/// # use ramify_core::{BranchLabels, LineageSet};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let labels = BranchLabels::from_labels(
///     vec!["1".parse::<LineageSet>()?, "1,2".parse()?, "".parse()?],
///     2,
/// );
/// let summary = CommandSummary::Labels {
///     data_source: "demo".into(),
///     lineage_names: vec!["Lineage1".into(), "Lineage2".into()],
///     labels,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("2\t-\n"));
/// assert!(text.contains("1,2\t1\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &CommandSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        CommandSummary::Labels {
            data_source,
            lineage_names,
            labels,
        } => {
            writeln!(writer, "data source: {data_source}")?;
            writeln!(writer, "lineages: {}", lineage_names.join(", "))?;
            writeln!(writer, "cells: {}", labels.cells())?;
            for (index, label) in labels.labels().iter().enumerate() {
                writeln!(writer, "{index}\t{}", or_unassigned(&label.to_string()))?;
            }
            writeln!(writer, "universe: {}", labels.universe().len())?;
            for (label, cells) in labels.universe() {
                writeln!(writer, "{}\t{cells}", or_unassigned(&label.to_string()))?;
            }
        }
        CommandSummary::Graph {
            data_source,
            lineage_names,
            graph,
        } => {
            writeln!(writer, "data source: {data_source}")?;
            writeln!(writer, "lineages: {}", lineage_names.join(", "))?;
            writeln!(writer, "vertices: {}", graph.node_count())?;
            for node in graph.nodes() {
                writeln!(
                    writer,
                    "{}\tcells={}\tsize={}",
                    or_unassigned(node.name()),
                    node.cells(),
                    node.size()
                )?;
            }
            writeln!(writer, "edges: {}", graph.edge_count())?;
            for (from, to) in graph.edges() {
                writeln!(writer, "{} -> {}", or_unassigned(from), or_unassigned(to))?;
            }
        }
    }
    Ok(())
}

fn or_unassigned(name: &str) -> &str {
    if name.is_empty() { UNASSIGNED } else { name }
}
