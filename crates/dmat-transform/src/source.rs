//! The closed set of input shapes accepted by normalization.
//!
//! Each supported shape is a tagged [`DataSource`] variant with its own
//! conversion path. Callers holding a concretely typed value use the `From`
//! conversions; callers holding a loosely typed value go through
//! [`DataSource::detect`], which probes the capability set and fails with a
//! type error when nothing matches.

use std::any::Any;

use ndarray::{Array1, Array2, ArrayD};
use polars::frame::DataFrame;
use polars::series::Series;

use dmat_model::{DataError, Result, RowLabel};

use crate::frame::CanonicalFrame;

/// A table whose rows and columns both carry labels.
///
/// Columns are kept as an ordered list rather than a `DataFrame` so that
/// duplicate input column names survive long enough to be rejected with an
/// error naming the offending column.
#[derive(Debug, Clone)]
pub struct LabeledTable {
    pub columns: Vec<Series>,
    pub index: Option<Vec<RowLabel>>,
}

impl LabeledTable {
    pub fn new(columns: Vec<Series>) -> Self {
        Self {
            columns,
            index: None,
        }
    }

    /// Attach row labels; without them rows are labeled positionally.
    pub fn with_index(mut self, index: Vec<RowLabel>) -> Self {
        self.index = Some(index);
        self
    }
}

/// A single labeled column. An empty series name means the column is
/// unnamed and the `var_name` option supplies its label.
#[derive(Debug, Clone)]
pub struct LabeledColumn {
    pub values: Series,
    pub index: Option<Vec<RowLabel>>,
}

impl LabeledColumn {
    pub fn new(values: Series) -> Self {
        Self {
            values,
            index: None,
        }
    }

    /// Attach row labels; without them rows are labeled positionally.
    pub fn with_index(mut self, index: Vec<RowLabel>) -> Self {
        self.index = Some(index);
        self
    }
}

/// An n-dimensional numeric array with optional coordinate labels per
/// dimension. The first dimension's coordinates supply row labels; for 2D
/// data the second dimension's coordinates supply column labels.
#[derive(Debug, Clone)]
pub struct LabeledArray {
    pub values: ArrayD<f64>,
    pub coords: Vec<Option<Vec<RowLabel>>>,
}

impl LabeledArray {
    pub fn new(values: ArrayD<f64>) -> Self {
        let dims = values.ndim();
        Self {
            values,
            coords: vec![None; dims],
        }
    }

    /// Attaches coordinate labels to one dimension.
    pub fn with_coords(mut self, axis: usize, coords: Vec<RowLabel>) -> Result<Self> {
        if axis >= self.coords.len() {
            return Err(DataError::AxisOutOfRange {
                axis,
                dims: self.coords.len(),
            });
        }
        self.coords[axis] = Some(coords);
        Ok(self)
    }
}

/// Tagged input variants accepted by [`normalize`](crate::normalize::normalize).
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Bare 2D numeric matrix; labels are synthesized.
    Matrix(Array2<f64>),
    /// Bare 1D numeric array, promoted to a single column.
    Vector(Array1<f64>),
    /// Labeled table with per-column classification and dummy expansion.
    Table(LabeledTable),
    /// Single labeled column.
    Column(LabeledColumn),
    /// Multi-dimensional array with optional per-dimension coordinates.
    Array(LabeledArray),
    /// A previously normalized frame, copied by value.
    Canonical(CanonicalFrame),
}

impl DataSource {
    /// Name of the matched variant, for logging.
    pub fn variant(&self) -> &'static str {
        match self {
            DataSource::Matrix(_) => "matrix",
            DataSource::Vector(_) => "vector",
            DataSource::Table(_) => "table",
            DataSource::Column(_) => "column",
            DataSource::Array(_) => "array",
            DataSource::Canonical(_) => "canonical",
        }
    }

    /// Probes a loosely typed value against every supported input shape.
    ///
    /// Already-normalized frames and wrapper types are checked before the
    /// bare array and table types they contain. Values satisfying no data
    /// protocol fail with [`DataError::UnsupportedInput`].
    pub fn detect<T: Any + Clone>(value: &T) -> Result<Self> {
        let any = value as &dyn Any;
        if let Some(source) = any.downcast_ref::<DataSource>() {
            return Ok(source.clone());
        }
        if let Some(frame) = any.downcast_ref::<CanonicalFrame>() {
            return Ok(frame.into());
        }
        if let Some(table) = any.downcast_ref::<LabeledTable>() {
            return Ok(table.clone().into());
        }
        if let Some(column) = any.downcast_ref::<LabeledColumn>() {
            return Ok(column.clone().into());
        }
        if let Some(array) = any.downcast_ref::<LabeledArray>() {
            return Ok(array.clone().into());
        }
        if let Some(frame) = any.downcast_ref::<DataFrame>() {
            return Ok(frame.clone().into());
        }
        if let Some(series) = any.downcast_ref::<Series>() {
            return Ok(series.clone().into());
        }
        if let Some(matrix) = any.downcast_ref::<Array2<f64>>() {
            return Ok(matrix.clone().into());
        }
        if let Some(vector) = any.downcast_ref::<Array1<f64>>() {
            return Ok(vector.clone().into());
        }
        if let Some(array) = any.downcast_ref::<ArrayD<f64>>() {
            return Ok(array.clone().into());
        }
        if let Some(vector) = any.downcast_ref::<Vec<f64>>() {
            return Ok(vector.clone().into());
        }
        if let Some(rows) = any.downcast_ref::<Vec<Vec<f64>>>() {
            return DataSource::try_from(rows.clone());
        }
        Err(DataError::UnsupportedInput(std::any::type_name::<T>()))
    }
}

impl From<Array2<f64>> for DataSource {
    fn from(matrix: Array2<f64>) -> Self {
        DataSource::Matrix(matrix)
    }
}

impl From<Array1<f64>> for DataSource {
    fn from(vector: Array1<f64>) -> Self {
        DataSource::Vector(vector)
    }
}

impl From<Vec<f64>> for DataSource {
    fn from(vector: Vec<f64>) -> Self {
        DataSource::Vector(Array1::from(vector))
    }
}

impl From<ArrayD<f64>> for DataSource {
    fn from(values: ArrayD<f64>) -> Self {
        DataSource::Array(LabeledArray::new(values))
    }
}

impl From<DataFrame> for DataSource {
    fn from(frame: DataFrame) -> Self {
        let columns = frame
            .get_columns()
            .iter()
            .map(|column| column.as_materialized_series().clone())
            .collect();
        DataSource::Table(LabeledTable::new(columns))
    }
}

impl From<Series> for DataSource {
    fn from(series: Series) -> Self {
        DataSource::Column(LabeledColumn::new(series))
    }
}

impl From<LabeledTable> for DataSource {
    fn from(table: LabeledTable) -> Self {
        DataSource::Table(table)
    }
}

impl From<LabeledColumn> for DataSource {
    fn from(column: LabeledColumn) -> Self {
        DataSource::Column(column)
    }
}

impl From<LabeledArray> for DataSource {
    fn from(array: LabeledArray) -> Self {
        DataSource::Array(array)
    }
}

impl From<CanonicalFrame> for DataSource {
    fn from(frame: CanonicalFrame) -> Self {
        DataSource::Canonical(frame)
    }
}

impl From<&CanonicalFrame> for DataSource {
    fn from(frame: &CanonicalFrame) -> Self {
        DataSource::Canonical(frame.clone())
    }
}

impl TryFrom<Vec<Vec<f64>>> for DataSource {
    type Error = DataError;

    /// Builds a matrix source from row vectors, rejecting ragged input.
    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(nrows * ncols);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(DataError::RaggedRow {
                    row: idx,
                    expected: ncols,
                    actual: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        let matrix = Array2::from_shape_vec((nrows, ncols), flat)
            .map_err(|err| DataError::Backend(err.to_string()))?;
        Ok(DataSource::Matrix(matrix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_matches_plain_vectors() {
        let source = DataSource::detect(&vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(source.variant(), "vector");
    }

    #[test]
    fn detect_rejects_unknown_types() {
        let err = DataSource::detect(&"not data".to_string()).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedInput(_)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        let err = DataSource::try_from(rows).unwrap_err();
        assert!(matches!(err, DataError::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn coords_for_missing_axis_are_rejected() {
        let array = LabeledArray::new(ArrayD::zeros(ndarray::IxDyn(&[4])));
        let err = array
            .with_coords(1, vec![RowLabel::Index(0)])
            .err()
            .unwrap();
        assert!(matches!(err, DataError::AxisOutOfRange { axis: 1, dims: 1 }));
    }
}
