//! The canonical output frame and its labeled-table view.

use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use dmat_model::{DataError, Result, RowLabel, infer_frequency};

/// Labels for one axis of a [`CanonicalFrame`].
#[derive(Debug, Clone, PartialEq)]
pub enum AxisLabels<'a> {
    Rows(&'a [RowLabel]),
    Columns(&'a [String]),
}

/// The normalized output: a 2D `f64` matrix with ordered row and column
/// labels. Immutable after construction; downstream model-fitting code
/// consumes the matrix and labels directly.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalFrame {
    matrix: Array2<f64>,
    row_labels: Vec<RowLabel>,
    col_labels: Vec<String>,
}

impl CanonicalFrame {
    /// Builds a frame, validating label lengths and column uniqueness.
    pub fn new(
        matrix: Array2<f64>,
        row_labels: Vec<RowLabel>,
        col_labels: Vec<String>,
    ) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if row_labels.len() != rows {
            return Err(DataError::LabelLength {
                axis: "row",
                labels: row_labels.len(),
                rows,
                cols,
            });
        }
        if col_labels.len() != cols {
            return Err(DataError::LabelLength {
                axis: "column",
                labels: col_labels.len(),
                rows,
                cols,
            });
        }
        let mut seen = BTreeSet::new();
        for label in &col_labels {
            if !seen.insert(label.as_str()) {
                return Err(DataError::DuplicateColumn(label.clone()));
            }
        }
        Ok(Self {
            matrix,
            row_labels,
            col_labels,
        })
    }

    /// Dimensionality of the normalized data. Always 2: single-column input
    /// is promoted to a one-column matrix.
    pub fn ndim(&self) -> usize {
        2
    }

    /// `(n_obs, n_vars)`.
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.dim()
    }

    /// Number of observations (rows).
    pub fn nobs(&self) -> usize {
        self.matrix.nrows()
    }

    /// Row labels, in matrix row order.
    pub fn rows(&self) -> &[RowLabel] {
        &self.row_labels
    }

    /// Column labels, in matrix column order.
    pub fn cols(&self) -> &[String] {
        &self.col_labels
    }

    /// The raw numeric matrix.
    pub fn ndarray(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Maps axis index to that axis's labels: 0 → rows, 1 → columns.
    pub fn labels(&self) -> BTreeMap<usize, AxisLabels<'_>> {
        BTreeMap::from([
            (0, AxisLabels::Rows(&self.row_labels)),
            (1, AxisLabels::Columns(&self.col_labels)),
        ])
    }

    /// Assembles a labeled-table view, inferring the index frequency when
    /// the row labels form an evenly spaced timestamp sequence.
    pub fn table(&self) -> Result<TableView> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.col_labels.len());
        for (idx, name) in self.col_labels.iter().enumerate() {
            let values: Vec<f64> = self.matrix.column(idx).iter().copied().collect();
            columns.push(Series::new(name.as_str().into(), values).into());
        }
        let data = DataFrame::new(columns).map_err(|err| DataError::Backend(err.to_string()))?;
        Ok(TableView {
            data,
            index: self.row_labels.clone(),
            freq: infer_frequency(&self.row_labels),
        })
    }
}

/// A labeled-table rendering of a [`CanonicalFrame`].
#[derive(Debug, Clone)]
pub struct TableView {
    /// One `Float64` column per column label, in label order.
    pub data: DataFrame,
    /// Row labels, in matrix row order.
    pub index: Vec<RowLabel>,
    /// Regular spacing of a timestamp index, when one is detectable.
    pub freq: Option<chrono::Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmat_model::integer_range;
    use ndarray::array;

    #[test]
    fn new_rejects_duplicate_columns() {
        let matrix = array![[1.0, 2.0], [3.0, 4.0]];
        let err = CanonicalFrame::new(
            matrix,
            integer_range(2),
            vec!["x".to_string(), "x".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::DuplicateColumn(name) if name == "x"));
    }

    #[test]
    fn new_rejects_label_length_mismatch() {
        let matrix = array![[1.0], [2.0]];
        let err =
            CanonicalFrame::new(matrix, integer_range(3), vec!["x".to_string()]).unwrap_err();
        assert!(matches!(err, DataError::LabelLength { axis: "row", .. }));
    }

    #[test]
    fn table_view_preserves_column_order() {
        let matrix = array![[1.0, 10.0], [2.0, 20.0]];
        let frame = CanonicalFrame::new(
            matrix,
            integer_range(2),
            vec!["a".to_string(), "b".to_string()],
        )
        .unwrap();
        let view = frame.table().unwrap();
        let names: Vec<&str> = view
            .data
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(view.data.height(), 2);
        assert_eq!(view.freq, None);
    }
}
