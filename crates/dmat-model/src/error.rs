use thiserror::Error;

/// The two failure families callers branch on: bad values or shapes in an
/// otherwise recognized input, versus an input whose type is not recognized
/// at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Value,
    Type,
}

/// Errors produced while normalizing input into a canonical frame.
///
/// Normalization is atomic: every variant means no frame was produced.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("an input value is required")]
    MissingInput,
    #[error("arrays must have 1 or 2 dimensions, not {0}")]
    UnsupportedDimensions(usize),
    #[error("expected {expected} observations, data has {actual}")]
    ObservationCount { expected: usize, actual: usize },
    #[error("duplicate column label {0:?}")]
    DuplicateColumn(String),
    #[error("column {column:?} mixes numeric and non-numeric values")]
    MixedColumn { column: String },
    #[error("column {column:?} has {actual} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("axis {axis} has {actual} coordinate labels for {expected} entries")]
    CoordinateMismatch {
        axis: usize,
        expected: usize,
        actual: usize,
    },
    #[error("axis {axis} is out of range for a {dims}-dimensional array")]
    AxisOutOfRange { axis: usize, dims: usize },
    #[error("{axis} axis has {labels} labels for a {rows}x{cols} matrix")]
    LabelLength {
        axis: &'static str,
        labels: usize,
        rows: usize,
        cols: usize,
    },
    #[error("row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error(
        "column {column:?} has unsupported type {dtype}; only numeric, string or categorical data permitted"
    )]
    UnsupportedColumnType { column: String, dtype: String },
    #[error("unsupported input type {0}")]
    UnsupportedInput(&'static str),
    #[error("column store error: {0}")]
    Backend(String),
}

impl DataError {
    /// Classifies the error. Only a value that satisfies no recognized data
    /// protocol is a type error; everything else is a value error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::UnsupportedInput(_) => ErrorKind::Type,
            _ => ErrorKind::Value,
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
