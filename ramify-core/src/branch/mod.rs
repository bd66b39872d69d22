//! Branch graph over the label universe.

mod build;
mod graph;

pub use build::{DEFAULT_MAX_NODE_SIZE, build_branch_graph, under};
pub(crate) use build::validate_max_node_size;
pub use graph::{BranchGraph, BranchNode};

#[cfg(test)]
mod tests;
