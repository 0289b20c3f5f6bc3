//! Input normalization for design matrices.
//!
//! Heterogeneous tabular and array input is converted into a
//! [`CanonicalFrame`]: a 2D `f64` matrix plus ordered row and column labels,
//! with categorical columns expanded into 0/1 indicators.
//!
//! - **source**: the closed set of accepted input shapes
//! - **columns**: per-column numeric coercion and dummy expansion
//! - **normalize**: the conversion entry points
//! - **frame**: the canonical output type and its labeled-table view

pub mod columns;
pub mod frame;
pub mod normalize;
pub mod source;

pub use columns::{ColumnValues, categories, category_codes, classify_column, expand_dummies};
pub use frame::{AxisLabels, CanonicalFrame, TableView};
pub use normalize::{normalize, normalize_any};
pub use source::{DataSource, LabeledArray, LabeledColumn, LabeledTable};
