//! Dense weight providers backed by Arrow `FixedSizeList<Float64, L>` columns.

mod errors;
mod ingest;
mod provider;

pub use errors::DenseWeightsProviderError;
pub use provider::DenseWeightsProvider;

#[cfg(test)]
mod tests;
