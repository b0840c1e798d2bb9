//! Error types for dense matrix operations.
//!
//! Shape and index violations are programmer errors and are reported
//! immediately. A singular matrix is an expected outcome of inversion and is
//! only surfaced as an error by APIs that must return a value.

use thiserror::Error;

/// Errors that can occur while building, slicing or factorizing a dense matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Row or column count is zero.
    #[error("invalid dimensions: {rows}x{cols} (rows and columns must be >= 1)")]
    InvalidDimensions {
        /// Requested number of rows
        rows: usize,
        /// Requested number of columns
        cols: usize,
    },

    /// A flat buffer does not hold exactly `rows * cols` elements.
    #[error("buffer length mismatch: expected {expected} elements, got {got}")]
    BufferLength {
        /// `rows * cols`
        expected: usize,
        /// Length of the buffer provided
        got: usize,
    },

    /// Two matrices have incompatible shapes for the requested operation.
    #[error(
        "dimension mismatch in {operation}: expected {expected_rows}x{expected_cols}, got {got_rows}x{got_cols}"
    )]
    DimensionMismatch {
        /// Name of the operation that rejected the operands
        operation: &'static str,
        /// Expected number of rows
        expected_rows: usize,
        /// Expected number of columns
        expected_cols: usize,
        /// Actual number of rows
        got_rows: usize,
        /// Actual number of columns
        got_cols: usize,
    },

    /// An inclusive sub-matrix range is empty, reversed or out of the matrix.
    #[error(
        "invalid sub-matrix range rows {row_start}..={row_end}, cols {col_start}..={col_end} for a {rows}x{cols} matrix"
    )]
    InvalidRange {
        /// First row (inclusive)
        row_start: usize,
        /// Last row (inclusive)
        row_end: usize,
        /// First column (inclusive)
        col_start: usize,
        /// Last column (inclusive)
        col_end: usize,
        /// Rows of the matrix being sliced
        rows: usize,
        /// Columns of the matrix being sliced
        cols: usize,
    },

    /// The operation needs a square matrix.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// A row or column of a permutation matrix has no entry equal to one.
    #[error("not a permutation matrix: line {line} has no unit entry")]
    NotPermutation {
        /// Row (or column) index that failed the scan
        line: usize,
    },

    /// Element access outside the matrix.
    #[error("index ({row}, {col}) out of bounds for a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Rows of the matrix
        rows: usize,
        /// Columns of the matrix
        cols: usize,
    },

    /// Row access outside the matrix.
    #[error("row {index} out of bounds for a matrix with {rows} rows")]
    RowOutOfBounds {
        /// Requested row
        index: usize,
        /// Rows of the matrix
        rows: usize,
    },

    /// Column access outside the matrix.
    #[error("column {index} out of bounds for a matrix with {cols} columns")]
    ColumnOutOfBounds {
        /// Requested column
        index: usize,
        /// Columns of the matrix
        cols: usize,
    },

    /// A zero pivot reached backward substitution.
    #[error("matrix is singular")]
    Singular,
}

/// A specialized `Result` type for dense matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

impl MatrixError {
    /// Returns `true` for shape errors (construction, copy, placement, squareness).
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            MatrixError::InvalidDimensions { .. }
                | MatrixError::BufferLength { .. }
                | MatrixError::DimensionMismatch { .. }
                | MatrixError::InvalidRange { .. }
                | MatrixError::NotSquare { .. }
                | MatrixError::NotPermutation { .. }
        )
    }

    /// Returns `true` for element, row or column access outside the matrix.
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            MatrixError::IndexOutOfBounds { .. }
                | MatrixError::RowOutOfBounds { .. }
                | MatrixError::ColumnOutOfBounds { .. }
        )
    }

    /// Returns `true` if the matrix was found to be singular.
    pub fn is_singular(&self) -> bool {
        matches!(self, MatrixError::Singular)
    }
}
