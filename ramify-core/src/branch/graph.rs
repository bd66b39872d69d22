//! Branch graph storage and queries.

use std::collections::HashMap;

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};

use crate::lineage_set::LineageSet;

/// A vertex of the branch graph: one distinct label with its cell count and
/// display size.
#[derive(Clone, Debug, PartialEq)]
pub struct BranchNode {
    lineages: LineageSet,
    name: String,
    cells: usize,
    size: f64,
}

impl BranchNode {
    pub(crate) fn new(lineages: LineageSet, cells: usize) -> Self {
        let name = lineages.to_string();
        Self {
            lineages,
            name,
            cells,
            size: 0.0,
        }
    }

    /// Label-set represented by this vertex.
    #[must_use]
    pub const fn lineages(&self) -> &LineageSet {
        &self.lineages
    }

    /// Canonical label string, e.g. `"1,2"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cells carrying exactly this label.
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.cells
    }

    /// Display size, proportional to [`Self::cells`].
    #[must_use]
    pub const fn size(&self) -> f64 {
        self.size
    }

    pub(crate) const fn set_size(&mut self, size: f64) {
        self.size = size;
    }
}

/// Directed graph over the label universe. Edges point from a label-set to
/// the smallest label-sets in the universe that strictly contain it.
///
/// # Examples
/// ```
/// use ramify_core::{BranchLabels, LineageSet, build_branch_graph};
///
/// let labels: Vec<LineageSet> = ["1", "2", "1,2", "1,2"]
///     .iter()
///     .map(|raw| raw.parse())
///     .collect::<Result<_, _>>()?;
/// let graph = build_branch_graph(&BranchLabels::from_labels(labels, 2), 100.0)?;
/// assert_eq!(graph.node_count(), 3);
/// assert!(graph.has_edge("1", "1,2"));
/// assert!(graph.has_edge("2", "1,2"));
/// assert_eq!(graph.node("1,2").map(|node| node.size()), Some(100.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct BranchGraph {
    graph: DiGraph<BranchNode, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl BranchGraph {
    pub(crate) fn with_capacity(nodes: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, nodes),
            node_map: HashMap::with_capacity(nodes),
        }
    }

    pub(crate) fn add_node(&mut self, node: BranchNode) -> NodeIndex {
        let name = node.name().to_owned();
        let index = self.graph.add_node(node);
        self.node_map.insert(name, index);
        index
    }

    pub(crate) fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.graph.update_edge(from, to, ());
    }

    pub(crate) fn index_of(&self, lineages: &LineageSet) -> Option<NodeIndex> {
        self.node_map.get(&lineages.to_string()).copied()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut BranchNode> {
        self.graph.node_weights_mut()
    }

    /// Number of vertices.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Vertices ordered by cardinality and then lineage index.
    pub fn nodes(&self) -> impl Iterator<Item = &BranchNode> {
        self.graph.node_weights()
    }

    /// Looks up a vertex by its canonical name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&BranchNode> {
        self.node_map
            .get(name)
            .and_then(|&index| self.graph.node_weight(index))
    }

    /// Edge list as `(from, to)` canonical name pairs.
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .raw_edges()
            .iter()
            .filter_map(|edge| {
                let from = self.graph.node_weight(edge.source())?;
                let to = self.graph.node_weight(edge.target())?;
                Some((from.name(), to.name()))
            })
            .collect()
    }

    /// Returns `true` when an edge `from → to` exists.
    #[must_use]
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&from), Some(&to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Vertices reached directly from `name`.
    #[must_use]
    pub fn successors(&self, name: &str) -> Vec<&BranchNode> {
        self.neighbours(name, Direction::Outgoing)
    }

    /// Vertices with a direct edge into `name`.
    #[must_use]
    pub fn predecessors(&self, name: &str) -> Vec<&BranchNode> {
        self.neighbours(name, Direction::Incoming)
    }

    /// Vertices with no incoming edge.
    #[must_use]
    pub fn roots(&self) -> Vec<&BranchNode> {
        self.boundary(Direction::Incoming)
    }

    /// Vertices with no outgoing edge.
    #[must_use]
    pub fn leaves(&self) -> Vec<&BranchNode> {
        self.boundary(Direction::Outgoing)
    }

    /// The underlying `petgraph` graph, for external renderers.
    #[must_use]
    pub const fn inner(&self) -> &DiGraph<BranchNode, ()> {
        &self.graph
    }

    fn neighbours(&self, name: &str, direction: Direction) -> Vec<&BranchNode> {
        let Some(&index) = self.node_map.get(name) else {
            return Vec::new();
        };
        let mut found: Vec<&BranchNode> = self
            .graph
            .neighbors_directed(index, direction)
            .filter_map(|neighbour| self.graph.node_weight(neighbour))
            .collect();
        found.sort_by(|left, right| left.lineages().cmp(right.lineages()));
        found
    }

    fn boundary(&self, direction: Direction) -> Vec<&BranchNode> {
        self.graph
            .node_indices()
            .filter(|&index| {
                self.graph
                    .neighbors_directed(index, direction)
                    .next()
                    .is_none()
            })
            .filter_map(|index| self.graph.node_weight(index))
            .collect()
    }
}
