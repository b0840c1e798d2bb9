//! Adapters for fixed-size matrix types
//!
//! Small `N x N` matrices (2x2 transforms, 4x4 homogeneous matrices, ...)
//! are wrapped as a [`DenseMatrix`], inverted, and copied back out.

use crate::dense::DenseMatrix;
use crate::direct::invert;
use crate::error::Result;
use crate::traits::RealField;

/// Invert a row-major `N x N` array (`m[row][col]`).
///
/// Returns `None` when no inverse exists (or `N == 0`).
pub fn invert_fixed<T: RealField, const N: usize>(m: &[[T; N]; N]) -> Option<[[T; N]; N]> {
    if N == 0 {
        return None;
    }
    let flat: Vec<T> = m.iter().flat_map(|row| row.iter().copied()).collect();
    let a = DenseMatrix::from_row_major(N, N, &flat).ok()?;
    let inverse = invert(&a).ok()??;

    let src = inverse.as_array();
    let mut out = [[T::zero(); N]; N];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, v) in row.iter_mut().enumerate() {
            *v = src[[r, c]];
        }
    }
    Some(out)
}

/// Invert an `n x n` matrix given as a column-major flat buffer.
///
/// Returns `Ok(None)` for a singular matrix, and a dimension error if the
/// buffer does not hold `n * n` elements.
pub fn invert_flat<T: RealField>(n: usize, elements: &[T]) -> Result<Option<Vec<T>>> {
    let a = DenseMatrix::from_col_major(n, n, elements)?;
    Ok(invert(&a)?.map(|inverse| inverse.to_col_major_vec()))
}
