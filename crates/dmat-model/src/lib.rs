//! Data-model definitions for design-matrix normalization.
//!
//! This crate holds the pure types shared across the workspace:
//!
//! - **error**: the normalization error and its value/type classification
//! - **label**: row and coordinate labels, frequency inference
//! - **options**: parameters accepted by a normalization call

pub mod error;
pub mod label;
pub mod options;

pub use error::{DataError, ErrorKind, Result};
pub use label::{RowLabel, infer_frequency, integer_range};
pub use options::NormalizeOptions;
