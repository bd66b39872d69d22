pub(crate) use super::{DenseWeightsProvider, DenseWeightsProviderError};

mod support;
