use std::sync::Arc;

use ramify_core::{
    ExecutionStrategy, LineageSetParseError, RamifyError, RamifyErrorCode, WeightSourceError,
    WeightSourceErrorCode,
};
use rstest::rstest;

#[rstest]
#[case(WeightSourceError::NoLineages, WeightSourceErrorCode::NoLineages)]
#[case(WeightSourceError::EmptyWeights, WeightSourceErrorCode::EmptyWeights)]
#[case(
    WeightSourceError::RaggedRow { row: 1, expected: 3, actual: 2 },
    WeightSourceErrorCode::RaggedRow,
)]
#[case(
    WeightSourceError::NonFiniteWeight { row: 0, lineage: 1 },
    WeightSourceErrorCode::NonFiniteWeight,
)]
#[case(
    WeightSourceError::LineageNameMismatch { names: 1, lineages: 2 },
    WeightSourceErrorCode::LineageNameMismatch,
)]
#[case(
    WeightSourceError::LineageCountMismatch { declared: 3, actual: 2 },
    WeightSourceErrorCode::LineageCountMismatch,
)]
#[case(WeightSourceError::OutOfBounds { index: 4 }, WeightSourceErrorCode::OutOfBounds)]
#[case(WeightSourceError::MissingFit, WeightSourceErrorCode::MissingFit)]
#[case(
    WeightSourceError::CellCountMismatch { cells: 2, rows: 3 },
    WeightSourceErrorCode::CellCountMismatch,
)]
fn returns_expected_weight_source_code(
    #[case] error: WeightSourceError,
    #[case] expected: WeightSourceErrorCode,
) {
    assert_eq!(error.code(), expected);
    assert!(error.code().as_str().starts_with("WEIGHT_SOURCE_"));
}

#[rstest]
#[case(
    RamifyError::InvalidParameter { parameter: "thresh", requirement: "between 0 and 1", got: 1.5 },
    RamifyErrorCode::InvalidParameter,
    None,
)]
#[case(RamifyError::EmptyLabels, RamifyErrorCode::EmptyLabels, None)]
#[case(
    RamifyError::BackendUnavailable { requested: ExecutionStrategy::Parallel },
    RamifyErrorCode::BackendUnavailable,
    None,
)]
#[case(
    RamifyError::WeightSource {
        data_source: Arc::from("fit"),
        error: WeightSourceError::MissingFit,
    },
    RamifyErrorCode::WeightSourceFailure,
    Some(WeightSourceErrorCode::MissingFit),
)]
fn returns_expected_ramify_code(
    #[case] error: RamifyError,
    #[case] expected: RamifyErrorCode,
    #[case] weight_source_code: Option<WeightSourceErrorCode>,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().to_string(), expected.as_str());
    assert_eq!(error.weight_source_code(), weight_source_code);
}

#[rstest]
fn invalid_threshold_message_names_the_range() {
    let error = RamifyError::InvalidParameter {
        parameter: "thresh",
        requirement: "between 0 and 1",
        got: -0.1,
    };
    assert_eq!(error.to_string(), "thresh must be between 0 and 1 (got -0.1)");
    assert_eq!(error.code().as_str(), "RAMIFY_INVALID_PARAMETER");
}

#[rstest]
#[case::letters("1,a", LineageSetParseError::InvalidToken { token: "a".to_owned() })]
#[case::zero("0,2", LineageSetParseError::ZeroLineage)]
#[case::duplicate("2,2", LineageSetParseError::DuplicateLineage { lineage: 2 })]
fn malformed_labels_fail_to_parse(#[case] raw: &str, #[case] expected: LineageSetParseError) {
    let err = raw
        .parse::<ramify_core::LineageSet>()
        .expect_err("label must be rejected");
    assert_eq!(err, expected);
}
