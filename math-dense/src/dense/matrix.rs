//! Dense column-major matrix
//!
//! Elements live in a single owned `ndarray::Array2` allocated in Fortran
//! order, so the flat view satisfies `flat[row + col * rows] == (row, col)`.

use crate::error::{MatrixError, Result};
use crate::traits::RealField;
use ndarray::{Array2, ShapeBuilder, s};
use std::fmt;

/// Dense matrix with at least one row and one column.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T: RealField> {
    data: Array2<T>,
}

impl<T: RealField> DenseMatrix<T> {
    /// Create a zero-filled `rows x cols` matrix
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        check_dimensions(rows, cols)?;
        Ok(Self {
            data: Array2::zeros((rows, cols).f()),
        })
    }

    /// Create a matrix by copying a column-major flat buffer
    pub fn from_col_major(rows: usize, cols: usize, elements: &[T]) -> Result<Self> {
        check_dimensions(rows, cols)?;
        check_buffer(rows, cols, elements.len())?;
        let data = Array2::from_shape_vec((rows, cols).f(), elements.to_vec()).map_err(|_| {
            MatrixError::BufferLength {
                expected: rows * cols,
                got: elements.len(),
            }
        })?;
        Ok(Self { data })
    }

    /// Create a matrix by copying a row-major flat buffer
    pub fn from_row_major(rows: usize, cols: usize, elements: &[T]) -> Result<Self> {
        check_dimensions(rows, cols)?;
        check_buffer(rows, cols, elements.len())?;
        Ok(Self {
            data: Array2::from_shape_fn((rows, cols).f(), |(r, c)| elements[r * cols + c]),
        })
    }

    /// Wrap an existing array. Any memory layout is accepted.
    pub fn from_array(data: Array2<T>) -> Result<Self> {
        check_dimensions(data.nrows(), data.ncols())?;
        Ok(Self { data })
    }

    /// Create the `n x n` identity matrix
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::new(n, n)?;
        m.data.diag_mut().fill(T::one());
        Ok(m)
    }

    /// Number of rows
    #[inline]
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    #[inline]
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Check if the matrix is square
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Borrow the underlying array
    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    pub(crate) fn as_array_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Consume the matrix and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Read element `(row, col)`
    pub fn get_element(&self, row: usize, col: usize) -> Result<T> {
        self.check_index(row, col)?;
        Ok(self.data[[row, col]])
    }

    /// Write element `(row, col)`
    pub fn set_element(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_index(row, col)?;
        self.data[[row, col]] = value;
        Ok(())
    }

    /// Copy row `row` into a new `1 x cols` matrix
    pub fn get_row(&self, row: usize) -> Result<Self> {
        self.check_row(row)?;
        let cols = self.ncols();
        Ok(Self {
            data: Array2::from_shape_fn((1, cols).f(), |(_, c)| self.data[[row, c]]),
        })
    }

    /// Overwrite row `row` with a `1 x cols` matrix
    pub fn set_row(&mut self, row: usize, src: &Self) -> Result<()> {
        self.check_row(row)?;
        check_shape("set_row", (1, self.ncols()), src.shape())?;
        self.data.row_mut(row).assign(&src.data.row(0));
        Ok(())
    }

    /// Copy column `col` into a new `rows x 1` matrix
    pub fn get_col(&self, col: usize) -> Result<Self> {
        self.check_col(col)?;
        let rows = self.nrows();
        Ok(Self {
            data: Array2::from_shape_fn((rows, 1).f(), |(r, _)| self.data[[r, col]]),
        })
    }

    /// Overwrite column `col` with a `rows x 1` matrix
    pub fn set_col(&mut self, col: usize, src: &Self) -> Result<()> {
        self.check_col(col)?;
        check_shape("set_col", (self.nrows(), 1), src.shape())?;
        self.data.column_mut(col).assign(&src.data.column(0));
        Ok(())
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Exchange rows `i` and `k`
    pub fn swap_row(&mut self, i: usize, k: usize) -> Result<()> {
        self.check_row(i)?;
        self.check_row(k)?;
        if i == k {
            return Ok(());
        }
        let tmp = self.get_row(i)?;
        let other = self.get_row(k)?;
        self.set_row(i, &other)?;
        self.set_row(k, &tmp)
    }

    /// Exchange columns `j` and `k`
    pub fn swap_column(&mut self, j: usize, k: usize) -> Result<()> {
        self.check_col(j)?;
        self.check_col(k)?;
        if j == k {
            return Ok(());
        }
        let tmp = self.get_col(j)?;
        let other = self.get_col(k)?;
        self.set_col(j, &other)?;
        self.set_col(k, &tmp)
    }

    /// Copy the block `[row_start..=row_end] x [col_start..=col_end]`
    pub fn get_sub_matrix(
        &self,
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    ) -> Result<Self> {
        let (rows, cols) = self.shape();
        if row_end < row_start || col_end < col_start || row_end >= rows || col_end >= cols {
            return Err(MatrixError::InvalidRange {
                row_start,
                row_end,
                col_start,
                col_end,
                rows,
                cols,
            });
        }
        let block = self.data.slice(s![row_start..=row_end, col_start..=col_end]);
        let mut data = Array2::zeros((block.nrows(), block.ncols()).f());
        data.assign(&block);
        Ok(Self { data })
    }

    /// Write `block` into this matrix with its top-left corner at `(row, col)`
    pub fn put_sub_matrix(&mut self, block: &Self, row: usize, col: usize) -> Result<()> {
        let (rows, cols) = self.shape();
        let (block_rows, block_cols) = block.shape();
        let fits = |origin: usize, len: usize, limit: usize| {
            origin.checked_add(len).is_some_and(|end| end <= limit)
        };
        if !fits(row, block_rows, rows) || !fits(col, block_cols, cols) {
            return Err(MatrixError::DimensionMismatch {
                operation: "put_sub_matrix",
                expected_rows: rows.saturating_sub(row),
                expected_cols: cols.saturating_sub(col),
                got_rows: block_rows,
                got_cols: block_cols,
            });
        }
        self.data
            .slice_mut(s![row..row + block_rows, col..col + block_cols])
            .assign(&block.data);
        Ok(())
    }

    /// Largest element as `(value, row, col)`.
    ///
    /// Scans in storage order (column 0 top to bottom, then column 1, ...)
    /// and only replaces the current maximum on a strictly greater value, so
    /// ties resolve to the lowest column, then the lowest row.
    pub fn get_max(&self) -> (T, usize, usize) {
        self.scan_max(|v| v)
    }

    /// Element of largest magnitude as `(value, row, col)`, with the same
    /// scan order and tie-break as [`get_max`](Self::get_max). The returned
    /// value keeps its sign.
    pub fn max_magnitude(&self) -> (T, usize, usize) {
        let (_, row, col) = self.scan_max(|v| v.norm());
        (self.data[[row, col]], row, col)
    }

    fn scan_max(&self, key: impl Fn(T) -> T) -> (T, usize, usize) {
        let mut best = key(self.data[[0, 0]]);
        let mut pos = (0, 0);
        for c in 0..self.ncols() {
            for r in 0..self.nrows() {
                let v = key(self.data[[r, c]]);
                if v > best {
                    best = v;
                    pos = (r, c);
                }
            }
        }
        (best, pos.0, pos.1)
    }

    /// Flat copy of all elements in column-major order
    pub fn to_col_major_vec(&self) -> Vec<T> {
        self.data.t().iter().copied().collect()
    }

    /// Flat copy of one row
    pub fn row_to_vec(&self, row: usize) -> Result<Vec<T>> {
        self.check_row(row)?;
        Ok(self.data.row(row).to_vec())
    }

    /// Flat copy of one column
    pub fn col_to_vec(&self, col: usize) -> Result<Vec<T>> {
        self.check_col(col)?;
        Ok(self.data.column(col).to_vec())
    }

    /// Transposed copy
    pub fn transpose(&self) -> Self {
        let mut data = Array2::zeros((self.ncols(), self.nrows()).f());
        data.assign(&self.data.t());
        Self { data }
    }

    /// Matrix product `self * rhs`
    pub fn matmul(&self, rhs: &Self) -> Result<Self> {
        if self.ncols() != rhs.nrows() {
            return Err(MatrixError::DimensionMismatch {
                operation: "matmul",
                expected_rows: self.ncols(),
                expected_cols: rhs.ncols(),
                got_rows: rhs.nrows(),
                got_cols: rhs.ncols(),
            });
        }
        Ok(Self {
            data: self.data.dot(&rhs.data),
        })
    }

    /// Check that both matrices have the same shape and every pair of
    /// elements differs by at most `tol`
    pub fn approx_eq(&self, other: &Self, tol: T) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (*a - *b).norm() <= tol)
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        let (rows, cols) = self.shape();
        if row >= rows || col >= cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        Ok(())
    }

    fn check_row(&self, index: usize) -> Result<()> {
        if index >= self.nrows() {
            return Err(MatrixError::RowOutOfBounds {
                index,
                rows: self.nrows(),
            });
        }
        Ok(())
    }

    fn check_col(&self, index: usize) -> Result<()> {
        if index >= self.ncols() {
            return Err(MatrixError::ColumnOutOfBounds {
                index,
                cols: self.ncols(),
            });
        }
        Ok(())
    }
}

impl<T: RealField> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DenseMatrix {}x{}", self.nrows(), self.ncols())?;
        for row in self.data.rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{:>12.6}", v)).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::InvalidDimensions { rows, cols });
    }
    Ok(())
}

fn check_buffer(rows: usize, cols: usize, len: usize) -> Result<()> {
    if len != rows * cols {
        return Err(MatrixError::BufferLength {
            expected: rows * cols,
            got: len,
        });
    }
    Ok(())
}

pub(crate) fn check_shape(
    operation: &'static str,
    expected: (usize, usize),
    got: (usize, usize),
) -> Result<()> {
    if expected != got {
        return Err(MatrixError::DimensionMismatch {
            operation,
            expected_rows: expected.0,
            expected_cols: expected.1,
            got_rows: got.0,
            got_cols: got.1,
        });
    }
    Ok(())
}
