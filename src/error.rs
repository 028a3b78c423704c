//! Error types for the survival aggregator.
//!
//! Every aggregation either succeeds on complete, valid input or fails with one
//! of two kinds: the table does not satisfy the expected schema/domain
//! ([`AnalysisError::Validation`]), or the table has no rows
//! ([`AnalysisError::EmptyInput`]). Partial results are never produced.

use thiserror::Error;

/// Ways in which a manifest table or configuration can be invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A column required by the operation is not present in the table.
    #[error("Required column '{column}' not found. Available columns: {available:?}")]
    MissingColumn {
        /// Name of the column that was requested
        column: String,
        /// Columns that the table does have
        available: Vec<String>,
    },

    /// A value lies outside the declared domain of its column.
    #[error("Column '{column}' row {row}: value '{value}' is outside its domain (expected {expected})")]
    OutOfDomain {
        column: String,
        /// Zero-based row index
        row: usize,
        value: String,
        expected: &'static str,
    },

    /// The column exists but its data type cannot hold the expected values.
    #[error("Column '{column}' has type {dtype}, expected {expected}")]
    WrongType {
        column: String,
        dtype: String,
        expected: &'static str,
    },

    /// A configuration value is unusable (e.g. a negative fence multiplier).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors surfaced by every aggregation operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Rates and medians are undefined over zero rows.
    #[error("Input table has no rows")]
    EmptyInput,
}

impl AnalysisError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AnalysisError::Validation(_))
    }

    pub fn is_empty_input(&self) -> bool {
        matches!(self, AnalysisError::EmptyInput)
    }
}
