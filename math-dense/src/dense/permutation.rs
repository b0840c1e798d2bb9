//! Permutation matrices and permutation vectors
//!
//! A permutation vector `p` lists, for each position `k`, the source index
//! that ends up at `k`. For a row permutation matrix `P` this means
//! `P[k, p[k]] == 1`; for a column permutation matrix `Q`, `Q[q[k], k] == 1`.

use super::matrix::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::traits::RealField;
use std::ops::Index;

/// Permutation in vector form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationVector(Vec<usize>);

impl PermutationVector {
    /// Identity permutation of length `n`
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the permutation has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Source index stored at position `k`
    pub fn get(&self, k: usize) -> Option<usize> {
        self.0.get(k).copied()
    }

    /// Borrow the indices
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Consume into the raw indices
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    /// Number of positions not mapped to themselves
    pub fn displaced(&self) -> usize {
        self.0.iter().enumerate().filter(|(k, p)| *k != **p).count()
    }

    /// The vector as an `n x 1` matrix of indices
    pub fn to_column_matrix<T: RealField>(&self) -> Result<DenseMatrix<T>> {
        let values: Vec<T> = self
            .0
            .iter()
            .map(|&p| T::from_usize(p).unwrap_or_else(T::nan))
            .collect();
        DenseMatrix::from_col_major(self.len(), 1, &values)
    }

    /// Row permutation matrix `P` with `P[k, p[k]] == 1`
    pub fn to_row_matrix<T: RealField>(&self) -> Result<DenseMatrix<T>> {
        let n = self.len();
        let mut p = DenseMatrix::new(n, n)?;
        for (k, &src) in self.0.iter().enumerate() {
            p.set_element(k, src, T::one())?;
        }
        Ok(p)
    }

    /// Column permutation matrix `Q` with `Q[q[k], k] == 1`
    pub fn to_col_matrix<T: RealField>(&self) -> Result<DenseMatrix<T>> {
        Ok(self.to_row_matrix::<T>()?.transpose())
    }
}

impl From<Vec<usize>> for PermutationVector {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl Index<usize> for PermutationVector {
    type Output = usize;

    fn index(&self, k: usize) -> &usize {
        &self.0[k]
    }
}

/// Row permutation matrix to vector: for each row, the column holding the 1.
pub fn matrix_row_perm_matrix_to_vector<T: RealField>(
    p: &DenseMatrix<T>,
) -> Result<PermutationVector> {
    check_square(p)?;
    let a = p.as_array();
    let mut indices = Vec::with_capacity(p.nrows());
    for (r, row) in a.rows().into_iter().enumerate() {
        let col = row
            .iter()
            .position(|&v| v == T::one())
            .ok_or(MatrixError::NotPermutation { line: r })?;
        indices.push(col);
    }
    Ok(PermutationVector(indices))
}

/// Column permutation matrix to vector: for each column, the row holding the 1.
pub fn matrix_col_perm_matrix_to_vector<T: RealField>(
    q: &DenseMatrix<T>,
) -> Result<PermutationVector> {
    check_square(q)?;
    let a = q.as_array();
    let mut indices = Vec::with_capacity(q.ncols());
    for (c, col) in a.columns().into_iter().enumerate() {
        let row = col
            .iter()
            .position(|&v| v == T::one())
            .ok_or(MatrixError::NotPermutation { line: c })?;
        indices.push(row);
    }
    Ok(PermutationVector(indices))
}

/// Replay `(a, b)` row swaps, in order, on the `n x n` identity.
pub(crate) fn replay_row_swaps<T: RealField>(
    n: usize,
    swaps: &[(usize, usize)],
) -> Result<DenseMatrix<T>> {
    let mut p = DenseMatrix::identity(n)?;
    for &(a, b) in swaps {
        p.swap_row(a, b)?;
    }
    Ok(p)
}

/// Replay `(a, b)` column swaps, in order, on the `n x n` identity.
pub(crate) fn replay_col_swaps<T: RealField>(
    n: usize,
    swaps: &[(usize, usize)],
) -> Result<DenseMatrix<T>> {
    let mut q = DenseMatrix::identity(n)?;
    for &(a, b) in swaps {
        q.swap_column(a, b)?;
    }
    Ok(q)
}

fn check_square<T: RealField>(m: &DenseMatrix<T>) -> Result<()> {
    if !m.is_square() {
        return Err(MatrixError::NotSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    Ok(())
}
