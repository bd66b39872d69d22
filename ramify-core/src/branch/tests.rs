//! Unit tests for branch graph construction.

use super::*;

use petgraph::algo::is_cyclic_directed;
use proptest::prelude::*;
use rstest::rstest;

use crate::{
    error::RamifyError, labels::BranchLabels, lineage_set::LineageSet, test_utils::labels,
};

fn edge_set(graph: &BranchGraph) -> Vec<(String, String)> {
    let mut edges: Vec<(String, String)> = graph
        .edges()
        .into_iter()
        .map(|(from, to)| (from.to_owned(), to.to_owned()))
        .collect();
    edges.sort();
    edges
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = expected
        .iter()
        .map(|&(from, to)| (from.to_owned(), to.to_owned()))
        .collect();
    pairs.sort();
    pairs
}

#[rstest]
#[case::singletons(&["1", "2", "2", "3"], "1,2,3")]
#[case::with_unassigned(&["", "2", "", "2"], "2")]
#[case::only_unassigned(&["", "", ""], "")]
fn low_cardinality_universe_collapses_to_one_vertex(
    #[case] raw: &[&str],
    #[case] expected_name: &str,
) {
    let graph = build_branch_graph(&labels(raw), 40.0).expect("graph must build");
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    let node = graph.nodes().next().expect("one vertex must exist");
    assert_eq!(node.name(), expected_name);
    assert_eq!(node.cells(), raw.len());
    assert_eq!(node.size(), 40.0);
}

#[test]
fn single_shared_label_collapses_to_one_vertex() {
    let graph = build_branch_graph(&labels(&["1,2"; 7]), DEFAULT_MAX_NODE_SIZE)
        .expect("graph must build");
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    let node = graph.node("1,2").expect("vertex must be named by its label");
    assert_eq!(node.cells(), 7);
    assert_eq!(node.size(), DEFAULT_MAX_NODE_SIZE);
}

#[test]
fn intermediate_label_suppresses_skip_level_edge() {
    let raw = ["1", "2", "1,2", "1,2,3", "1,2", "1"];
    let graph = build_branch_graph(&labels(&raw), DEFAULT_MAX_NODE_SIZE).expect("graph must build");
    assert!(graph.has_edge("1", "1,2"));
    assert!(graph.has_edge("2", "1,2"));
    assert!(graph.has_edge("1,2", "1,2,3"));
    assert!(!graph.has_edge("1", "1,2,3"));
    assert!(!graph.has_edge("2", "1,2,3"));
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn skip_level_edge_kept_without_intermediate() {
    let graph = build_branch_graph(&labels(&["1", "2", "1,2,3"]), DEFAULT_MAX_NODE_SIZE)
        .expect("graph must build");
    assert_eq!(
        edge_set(&graph),
        pairs(&[("1", "1,2,3"), ("2", "1,2,3")])
    );
}

#[test]
fn multi_way_branches_link_each_covering_pair() {
    let raw = ["1", "2", "3", "1,2", "2,3", "1,2,3"];
    let graph = build_branch_graph(&labels(&raw), DEFAULT_MAX_NODE_SIZE).expect("graph must build");
    assert_eq!(
        edge_set(&graph),
        pairs(&[
            ("1", "1,2"),
            ("2", "1,2"),
            ("2", "2,3"),
            ("3", "2,3"),
            ("1,2", "1,2,3"),
            ("2,3", "1,2,3"),
        ])
    );
    let roots: Vec<&str> = graph.roots().iter().map(|node| node.name()).collect();
    assert_eq!(roots, ["1", "2", "3"]);
    let leaves: Vec<&str> = graph.leaves().iter().map(|node| node.name()).collect();
    assert_eq!(leaves, ["1,2,3"]);
    let feeding: Vec<&str> = graph
        .predecessors("1,2,3")
        .iter()
        .map(|node| node.name())
        .collect();
    assert_eq!(feeding, ["1,2", "2,3"]);
    let fed: Vec<&str> = graph.successors("2").iter().map(|node| node.name()).collect();
    assert_eq!(fed, ["1,2", "2,3"]);
}

#[test]
fn unassigned_cells_stay_as_isolated_vertex() {
    let graph = build_branch_graph(&labels(&["", "1", "2", "1,2"]), DEFAULT_MAX_NODE_SIZE)
        .expect("graph must build");
    assert_eq!(graph.node_count(), 4);
    assert_eq!(
        edge_set(&graph),
        pairs(&[("1", "1,2"), ("2", "1,2")])
    );
    assert!(graph.node("").is_some());
}

#[test]
fn sizes_scale_with_cell_counts() {
    let raw = ["1", "1", "1", "1", "2", "2", "1,2", "1,2", "1,2", "1,2", "1,2", "1,2", "1,2", "1,2"];
    let graph = build_branch_graph(&labels(&raw), 10.0).expect("graph must build");
    let sizes: Vec<(&str, usize, f64)> = graph
        .nodes()
        .map(|node| (node.name(), node.cells(), node.size()))
        .collect();
    assert_eq!(
        sizes,
        [("1", 4, 5.0), ("2", 2, 2.5), ("1,2", 8, 10.0)]
    );
}

#[rstest]
#[case::zero(0.0)]
#[case::negative(-5.0)]
#[case::nan(f64::NAN)]
#[case::infinite(f64::INFINITY)]
fn invalid_max_node_size_is_rejected(#[case] max_node_size: f64) {
    let err = build_branch_graph(&labels(&["1", "1,2"]), max_node_size)
        .expect_err("max_node_size must be rejected");
    assert!(matches!(
        err,
        RamifyError::InvalidParameter {
            parameter: "max_node_size",
            ..
        }
    ));
}

#[test]
fn empty_labels_are_rejected() {
    let err = build_branch_graph(&BranchLabels::from_labels(Vec::new(), 3), 1.0)
        .expect_err("no labels must be rejected");
    assert_eq!(err, RamifyError::EmptyLabels);
}

#[test]
fn under_returns_strict_subsets_only() {
    let universe: Vec<LineageSet> = ["", "1", "2", "1,2", "1,3", "1,2,3"]
        .iter()
        .map(|raw| raw.parse().expect("label must parse"))
        .collect();
    let target: LineageSet = "1,2,3".parse().expect("label must parse");
    let found: Vec<String> = under(&target, &universe)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(found, ["", "1", "2", "1,2", "1,3"]);
    let leaf: LineageSet = "2".parse().expect("label must parse");
    let found: Vec<String> = under(&leaf, &universe)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(found, [""]);
}

fn label_universe() -> impl Strategy<Value = Vec<LineageSet>> {
    prop::collection::vec(0_u8..16, 2..64).prop_map(|masks| {
        masks
            .into_iter()
            .map(|mask| (0..4).filter(|bit| mask & (1 << bit) != 0).collect())
            .collect()
    })
}

proptest! {
    #[test]
    fn general_graph_is_the_covering_relation(raw in label_universe()) {
        let labels = BranchLabels::from_labels(raw, 4);
        prop_assume!(labels.max_cardinality() >= 2 && labels.universe().len() >= 2);
        let graph = build_branch_graph(&labels, DEFAULT_MAX_NODE_SIZE).expect("graph must build");

        prop_assert!(!is_cyclic_directed(graph.inner()));
        prop_assert_eq!(graph.node_count(), labels.universe().len());

        let members: Vec<&LineageSet> = labels.universe().keys().collect();
        for &lower in &members {
            for &upper in &members {
                let covered = lower.is_strict_subset(upper)
                    && !members
                        .iter()
                        .any(|&mid| lower.is_strict_subset(mid) && mid.is_strict_subset(upper));
                let expected = covered && upper.len() >= 2;
                prop_assert_eq!(
                    graph.has_edge(&lower.to_string(), &upper.to_string()),
                    expected,
                    "edge {} -> {}", lower, upper
                );
            }
        }

        let largest = graph.nodes().map(BranchNode::cells).max().unwrap_or(0);
        for node in graph.nodes() {
            prop_assert_eq!(node.cells(), labels.count(node.lineages()));
            if node.cells() == largest {
                prop_assert_eq!(node.size(), DEFAULT_MAX_NODE_SIZE);
            }
        }
    }
}
