//! Shared test utilities used across ramify crates.

pub mod fixtures;
pub mod tracing;
