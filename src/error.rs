//! Error types for the cut-list optimizer.
//!
//! A part that does not fit on the sheet is not an error; it is reported in
//! [`CutLayout::unplaced_parts`](crate::types::CutLayout). These errors cover
//! malformed input rejected before packing starts.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimizeError {
    #[error("Invalid stock dimensions {width} x {height}: both sides must be positive")]
    InvalidStock { width: f64, height: f64 },

    #[error("Invalid kerf {kerf}: must be a non-negative number")]
    InvalidKerf { kerf: f64 },

    #[error("Invalid minimum offcut size {min_offcut_size}: must be a non-negative number")]
    InvalidMinOffcutSize { min_offcut_size: f64 },

    #[error("Invalid value for '{field}' on part '{id}': {value} - {reason}")]
    InvalidPart {
        id: String,
        field: String,
        value: String,
        reason: String,
    },

    #[error("Too many part instances: {count} requested, limit is {limit}")]
    TooManyInstances { count: u64, limit: usize },
}

impl OptimizeError {
    pub fn invalid_part(
        id: impl Into<String>,
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        OptimizeError::InvalidPart {
            id: id.into(),
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizeError>;
