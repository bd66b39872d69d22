//! Benchmark support crate for ramify.
//!
//! Provides seeded synthetic weight matrices and parameter types used by the
//! Criterion benchmarks for label assignment and branch graph construction.

pub mod error;
pub mod params;
pub mod source;
