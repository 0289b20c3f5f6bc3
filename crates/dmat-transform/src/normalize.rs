//! Conversion of each input variant into a canonical frame.

use std::any::Any;
use std::collections::BTreeSet;

use ndarray::{Array1, Array2, Axis, Ix1, Ix2};
use polars::series::Series;

use dmat_model::{DataError, NormalizeOptions, Result, RowLabel, integer_range};

use crate::columns::{ColumnValues, category_codes, classify_column, expand_dummies};
use crate::frame::CanonicalFrame;
use crate::source::{DataSource, LabeledArray, LabeledColumn, LabeledTable};

/// Normalizes one input into a [`CanonicalFrame`].
///
/// `None` is rejected: an explicit input is mandatory. When `options.nobs`
/// is set, the resulting row count must match it. Normalization is atomic
/// and side-effect free; on error no frame exists.
pub fn normalize(source: Option<DataSource>, options: &NormalizeOptions) -> Result<CanonicalFrame> {
    let source = source.ok_or(DataError::MissingInput)?;
    tracing::debug!(variant = source.variant(), "normalizing input");
    let frame = match source {
        DataSource::Canonical(frame) => frame,
        DataSource::Matrix(matrix) => from_matrix(matrix, &options.var_name)?,
        DataSource::Vector(vector) => from_vector(vector, &options.var_name)?,
        DataSource::Table(table) => from_table(&table, options)?,
        DataSource::Column(column) => from_column(&column, options)?,
        DataSource::Array(array) => from_labeled_array(array, &options.var_name)?,
    };
    if let Some(expected) = options.nobs {
        let actual = frame.nobs();
        if actual != expected {
            return Err(DataError::ObservationCount { expected, actual });
        }
    }
    Ok(frame)
}

/// Detects the input shape of a loosely typed value and normalizes it.
pub fn normalize_any<T: Any + Clone>(
    value: Option<&T>,
    options: &NormalizeOptions,
) -> Result<CanonicalFrame> {
    match value {
        None => Err(DataError::MissingInput),
        Some(value) => normalize(Some(DataSource::detect(value)?), options),
    }
}

/// Synthesized labels `"{var_name}.0".."{var_name}.(count-1)"`.
fn default_columns(var_name: &str, count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("{var_name}.{idx}")).collect()
}

fn from_matrix(matrix: Array2<f64>, var_name: &str) -> Result<CanonicalFrame> {
    let (rows, cols) = matrix.dim();
    CanonicalFrame::new(matrix, integer_range(rows), default_columns(var_name, cols))
}

fn from_vector(vector: Array1<f64>, var_name: &str) -> Result<CanonicalFrame> {
    let rows = vector.len();
    let matrix = vector.insert_axis(Axis(1));
    CanonicalFrame::new(matrix, integer_range(rows), vec![var_name.to_string()])
}

fn from_table(table: &LabeledTable, options: &NormalizeOptions) -> Result<CanonicalFrame> {
    let height = table.columns.first().map_or(0, |series| series.len());
    for series in &table.columns {
        if series.len() != height {
            return Err(DataError::ColumnLength {
                column: series.name().to_string(),
                expected: height,
                actual: series.len(),
            });
        }
    }
    // Duplicates are rejected on the input names so the error points at the
    // source column rather than a synthesized dummy label.
    let mut seen = BTreeSet::new();
    for series in &table.columns {
        if !seen.insert(series.name().as_str().to_string()) {
            return Err(DataError::DuplicateColumn(series.name().to_string()));
        }
    }
    let row_labels = index_labels(table.index.as_ref(), height)?;
    let mut names = Vec::new();
    let mut data: Vec<Vec<f64>> = Vec::new();
    for series in &table.columns {
        append_column(series, options, &mut names, &mut data)?;
    }
    tracing::debug!(
        input_columns = table.columns.len(),
        output_columns = names.len(),
        "converted labeled table"
    );
    CanonicalFrame::new(assemble(height, &data)?, row_labels, names)
}

fn from_column(column: &LabeledColumn, options: &NormalizeOptions) -> Result<CanonicalFrame> {
    let height = column.values.len();
    let row_labels = index_labels(column.index.as_ref(), height)?;
    let series = if column.values.name().is_empty() {
        column
            .values
            .clone()
            .with_name(options.var_name.as_str().into())
    } else {
        column.values.clone()
    };
    let mut names = Vec::new();
    let mut data: Vec<Vec<f64>> = Vec::new();
    append_column(&series, options, &mut names, &mut data)?;
    CanonicalFrame::new(assemble(height, &data)?, row_labels, names)
}

fn from_labeled_array(array: LabeledArray, var_name: &str) -> Result<CanonicalFrame> {
    let ndim = array.values.ndim();
    if ndim == 0 || ndim > 2 {
        return Err(DataError::UnsupportedDimensions(ndim));
    }
    if ndim == 1 {
        let vector = array
            .values
            .into_dimensionality::<Ix1>()
            .map_err(|err| DataError::Backend(err.to_string()))?;
        let rows = vector.len();
        let row_labels = coord_labels(array.coords.first(), 0, rows)?;
        let matrix = vector.insert_axis(Axis(1));
        return CanonicalFrame::new(matrix, row_labels, vec![format!("{var_name}.0")]);
    }
    let matrix = array
        .values
        .into_dimensionality::<Ix2>()
        .map_err(|err| DataError::Backend(err.to_string()))?;
    let (rows, cols) = matrix.dim();
    let row_labels = coord_labels(array.coords.first(), 0, rows)?;
    let col_labels = match array.coords.get(1).and_then(Option::as_ref) {
        Some(labels) => {
            if labels.len() != cols {
                return Err(DataError::CoordinateMismatch {
                    axis: 1,
                    expected: cols,
                    actual: labels.len(),
                });
            }
            labels.iter().map(ToString::to_string).collect()
        }
        None => default_columns(var_name, cols),
    };
    CanonicalFrame::new(matrix, row_labels, col_labels)
}

/// A supplied index must cover every row; absent one, rows get positional
/// labels.
fn index_labels(index: Option<&Vec<RowLabel>>, height: usize) -> Result<Vec<RowLabel>> {
    match index {
        Some(labels) if labels.len() != height => Err(DataError::CoordinateMismatch {
            axis: 0,
            expected: height,
            actual: labels.len(),
        }),
        Some(labels) => Ok(labels.clone()),
        None => Ok(integer_range(height)),
    }
}

fn coord_labels(
    coords: Option<&Option<Vec<RowLabel>>>,
    axis: usize,
    expected: usize,
) -> Result<Vec<RowLabel>> {
    match coords.and_then(Option::as_ref) {
        Some(labels) if labels.len() != expected => Err(DataError::CoordinateMismatch {
            axis,
            expected,
            actual: labels.len(),
        }),
        Some(labels) => Ok(labels.clone()),
        None => Ok(integer_range(expected)),
    }
}

/// Classifies one column and pushes its output columns.
fn append_column(
    series: &Series,
    options: &NormalizeOptions,
    names: &mut Vec<String>,
    data: &mut Vec<Vec<f64>>,
) -> Result<()> {
    let name = series.name().to_string();
    match classify_column(series)? {
        ColumnValues::Numeric(values) => {
            names.push(name);
            data.push(values);
        }
        ColumnValues::Categorical(values) => {
            if options.convert_dummies {
                for (label, indicators) in expand_dummies(&name, &values, options.drop_first) {
                    names.push(label);
                    data.push(indicators);
                }
            } else {
                names.push(name);
                data.push(category_codes(&values));
            }
        }
    }
    Ok(())
}

/// Stacks per-column value vectors into a row-major matrix.
fn assemble(height: usize, columns: &[Vec<f64>]) -> Result<Array2<f64>> {
    let width = columns.len();
    let mut flat = Vec::with_capacity(height * width);
    for row in 0..height {
        for column in columns {
            flat.push(column[row]);
        }
    }
    Array2::from_shape_vec((height, width), flat).map_err(|err| DataError::Backend(err.to_string()))
}
