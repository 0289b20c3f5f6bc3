//! Tests for error classification and option defaults.

use dmat_model::{DataError, ErrorKind, NormalizeOptions};

#[test]
fn unrecognized_input_is_a_type_error() {
    let err = DataError::UnsupportedInput("alloc::string::String");
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn shape_and_content_errors_are_value_errors() {
    let errors = [
        DataError::MissingInput,
        DataError::UnsupportedDimensions(3),
        DataError::ObservationCount {
            expected: 100,
            actual: 10,
        },
        DataError::DuplicateColumn("x".to_string()),
        DataError::MixedColumn {
            column: "x".to_string(),
        },
        DataError::AxisOutOfRange { axis: 2, dims: 1 },
        DataError::UnsupportedColumnType {
            column: "when".to_string(),
            dtype: "date".to_string(),
        },
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::Value, "{err}");
    }
}

#[test]
fn default_options_match_reference_behavior() {
    let options = NormalizeOptions::default();
    assert_eq!(options.var_name, "x");
    assert_eq!(options.nobs, None);
    assert!(options.convert_dummies);
    assert!(options.drop_first);
}

#[test]
fn builder_overrides_defaults() {
    let options = NormalizeOptions::new()
        .with_var_name("instrument")
        .with_nobs(50)
        .with_convert_dummies(false)
        .with_drop_first(false);
    assert_eq!(options.var_name, "instrument");
    assert_eq!(options.nobs, Some(50));
    assert!(!options.convert_dummies);
    assert!(!options.drop_first);
}
