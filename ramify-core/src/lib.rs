//! Ramify core library.
//!
//! Turns a cell-by-lineage weight matrix into per-cell lineage labels and a
//! branch graph relating the distinct labels by set containment.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod adapters;
mod branch;
mod builder;
mod error;
mod labels;
mod lineage_set;
mod matrix;
mod ramify;
mod source;
mod threshold;

#[cfg(test)]
mod test_utils;

pub use crate::{
    adapters::{CellExperiment, CurveFit},
    branch::{BranchGraph, BranchNode, DEFAULT_MAX_NODE_SIZE, build_branch_graph, under},
    builder::{ExecutionStrategy, RamifyBuilder},
    error::{RamifyError, RamifyErrorCode, Result, WeightSourceError, WeightSourceErrorCode},
    labels::{BranchLabels, WeightScale, assign_labels},
    lineage_set::{LineageSet, LineageSetParseError},
    matrix::WeightMatrix,
    ramify::Ramify,
    source::WeightSource,
    threshold::Threshold,
};
