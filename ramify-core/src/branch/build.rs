//! Branch graph construction.
//!
//! Vertices are the distinct labels. Working level by level from cardinality
//! two upwards, each label-set `n` is linked from every label-set returned by
//! [`under`] unless that label-set sits two or more levels below `n` and is
//! already under another member of `under(n)`. The surviving edges form the
//! covering relation of set containment restricted to the universe.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, instrument};

use super::graph::{BranchGraph, BranchNode};
use crate::{Result, error::RamifyError, labels::BranchLabels, lineage_set::LineageSet};

/// Display size given to the most populated vertex when none is configured.
pub const DEFAULT_MAX_NODE_SIZE: f64 = 100.0;

/// Returns the members of `universe` that sit under `label`: every other
/// label-set whose lineages are all contained in `label`.
///
/// # Examples
/// ```
/// use ramify_core::{LineageSet, under};
///
/// let universe: Vec<LineageSet> = ["", "1", "3", "1,2", "1,2,3"]
///     .iter()
///     .map(|raw| raw.parse())
///     .collect::<Result<_, _>>()?;
/// let shared: LineageSet = "1,2".parse()?;
/// let found: Vec<String> = under(&shared, &universe)
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(found, ["", "1"]);
/// # Ok::<(), ramify_core::LineageSetParseError>(())
/// ```
pub fn under<'a, I>(label: &LineageSet, universe: I) -> Vec<&'a LineageSet>
where
    I: IntoIterator<Item = &'a LineageSet>,
{
    universe
        .into_iter()
        .filter(|candidate| candidate.is_strict_subset(label))
        .collect()
}

/// Builds the branch graph for `labels`, scaling vertex sizes so the most
/// populated vertex has size `max_node_size`.
///
/// # Errors
/// Returns [`RamifyError::InvalidParameter`] when `max_node_size` is not a
/// positive finite number and [`RamifyError::EmptyLabels`] when no cell is
/// labelled.
#[instrument(
    name = "core.build_branch_graph",
    err,
    skip(labels),
    fields(cells = labels.cells(), distinct = labels.universe().len()),
)]
pub fn build_branch_graph(labels: &BranchLabels, max_node_size: f64) -> Result<BranchGraph> {
    validate_max_node_size(max_node_size)?;
    let universe = labels.universe();
    if labels.cells() == 0 || universe.is_empty() {
        return Err(RamifyError::EmptyLabels);
    }

    let max_cardinality = labels.max_cardinality();
    let graph = if max_cardinality <= 1 {
        debug!(max_cardinality, "no multi-lineage labels, collapsing to one vertex");
        let merged = universe
            .keys()
            .fold(LineageSet::new(), |acc, label| acc.union(label));
        single_vertex(merged, labels.cells(), max_node_size)
    } else if universe.len() == 1 {
        debug!("single distinct label, collapsing to one vertex");
        let only = universe.keys().next().cloned().unwrap_or_default();
        single_vertex(only, labels.cells(), max_node_size)
    } else {
        let mut graph = link_levels(universe, max_cardinality);
        scale_sizes(&mut graph, max_node_size);
        graph
    };

    #[cfg(feature = "metrics")]
    record_metrics(&graph);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "branch graph built"
    );
    Ok(graph)
}

#[cfg(feature = "metrics")]
#[expect(clippy::cast_precision_loss, reason = "edge counts are small")]
fn record_metrics(graph: &BranchGraph) {
    metrics::counter!("ramify_branch_graphs_built_total").increment(1);
    metrics::histogram!("ramify_branch_graph_edges").record(graph.edge_count() as f64);
}

pub(crate) fn validate_max_node_size(max_node_size: f64) -> Result<()> {
    if max_node_size.is_finite() && max_node_size > 0.0 {
        Ok(())
    } else {
        Err(RamifyError::InvalidParameter {
            parameter: "max_node_size",
            requirement: "a positive finite number",
            got: max_node_size,
        })
    }
}

fn single_vertex(lineages: LineageSet, cells: usize, max_node_size: f64) -> BranchGraph {
    let mut graph = BranchGraph::with_capacity(1);
    let mut node = BranchNode::new(lineages, cells);
    node.set_size(max_node_size);
    graph.add_node(node);
    graph
}

fn link_levels(universe: &BTreeMap<LineageSet, usize>, max_cardinality: usize) -> BranchGraph {
    let mut graph = BranchGraph::with_capacity(universe.len());
    for (label, &cells) in universe {
        graph.add_node(BranchNode::new(label.clone(), cells));
    }

    let members: Vec<&LineageSet> = universe.keys().collect();
    for level in 2..=max_cardinality {
        for &label in members.iter().filter(|member| member.len() == level) {
            let below = under(label, members.iter().copied());
            for &lower in &below {
                if level - lower.len() >= 2 {
                    let implied: HashSet<&LineageSet> = below
                        .iter()
                        .filter(|&&other| other != lower)
                        .flat_map(|&other| under(other, members.iter().copied()))
                        .collect();
                    if implied.contains(lower) {
                        debug!(
                            from = %lower,
                            to = %label,
                            "edge implied by an intermediate label, skipping"
                        );
                        continue;
                    }
                }
                link(&mut graph, lower, label);
            }
        }
    }
    graph
}

fn link(graph: &mut BranchGraph, from: &LineageSet, to: &LineageSet) {
    if let (Some(from), Some(to)) = (graph.index_of(from), graph.index_of(to)) {
        graph.add_edge(from, to);
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "display sizes are proportional to cell counts"
)]
fn scale_sizes(graph: &mut BranchGraph, max_node_size: f64) {
    let largest = graph.nodes().map(BranchNode::cells).max().unwrap_or(0);
    if largest == 0 {
        return;
    }
    let largest = largest as f64;
    for node in graph.nodes_mut() {
        let share = node.cells() as f64 / largest;
        node.set_size(max_node_size * share);
    }
}
