//! Diagonal-band extraction
//!
//! L and U are rebuilt from the eliminated matrix by copying whole diagonals
//! into a zero matrix of the same shape.

use super::matrix::{DenseMatrix, check_shape};
use crate::error::Result;
use crate::traits::RealField;

/// Copy the diagonal run starting at `(row, col)` from `src` into `dst`:
/// `(row, col), (row + 1, col + 1), ...` until either index leaves the matrix.
pub fn copy_diagonal<T: RealField>(
    src: &DenseMatrix<T>,
    dst: &mut DenseMatrix<T>,
    row: usize,
    col: usize,
) -> Result<()> {
    check_shape("copy_diagonal", src.shape(), dst.shape())?;
    let (rows, cols) = src.shape();
    let len = rows.saturating_sub(row).min(cols.saturating_sub(col));
    let from = src.as_array();
    let to = dst.as_array_mut();
    for d in 0..len {
        to[[row + d, col + d]] = from[[row + d, col + d]];
    }
    Ok(())
}

/// Same-shape copy of `a` keeping only `count` diagonals.
///
/// The main diagonal comes first, then the superdiagonals from `(0, 1)` to
/// `(0, cols - 1)`, then the subdiagonals from `(1, 0)` to `(rows - 1, 0)`.
/// `count == cols` gives the upper triangle; `count >= rows + cols - 1`
/// copies everything.
pub fn get_upper_triag<T: RealField>(a: &DenseMatrix<T>, count: usize) -> Result<DenseMatrix<T>> {
    let (rows, cols) = a.shape();
    let starts = (0..cols)
        .map(|c| (0, c))
        .chain((1..rows).map(|r| (r, 0)));
    copy_band(a, starts, count)
}

/// Same-shape copy of `a` keeping only `count` diagonals.
///
/// The main diagonal comes first, then the subdiagonals from `(1, 0)` to
/// `(rows - 1, 0)`, then the superdiagonals from `(0, 1)` to
/// `(0, cols - 1)`. `count == rows` gives the lower triangle.
pub fn get_lower_triag<T: RealField>(a: &DenseMatrix<T>, count: usize) -> Result<DenseMatrix<T>> {
    let (rows, cols) = a.shape();
    let starts = (0..rows)
        .map(|r| (r, 0))
        .chain((1..cols).map(|c| (0, c)));
    copy_band(a, starts, count)
}

fn copy_band<T: RealField>(
    a: &DenseMatrix<T>,
    starts: impl Iterator<Item = (usize, usize)>,
    count: usize,
) -> Result<DenseMatrix<T>> {
    let (rows, cols) = a.shape();
    let mut band = DenseMatrix::new(rows, cols)?;
    for (row, col) in starts.take(count) {
        copy_diagonal(a, &mut band, row, col)?;
    }
    Ok(band)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> DenseMatrix<f64> {
        DenseMatrix::from_row_major(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap()
    }

    #[test]
    fn test_copy_diagonal_stops_at_edge() {
        let a = DenseMatrix::from_row_major(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let mut dst = DenseMatrix::new(2, 3).unwrap();
        copy_diagonal(&a, &mut dst, 0, 1).unwrap();
        assert_eq!(dst.to_col_major_vec(), vec![0.0, 0.0, 2.0, 0.0, 0.0, 6.0]);

        let mut wrong = DenseMatrix::new(3, 2).unwrap();
        assert!(copy_diagonal(&a, &mut wrong, 0, 0).unwrap_err().is_dimension_error());
    }

    #[test]
    fn test_upper_triangle() {
        let u = get_upper_triag(&square(), 3).unwrap();
        let expected =
            DenseMatrix::from_row_major(3, 3, &[1.0, 2.0, 3.0, 0.0, 5.0, 6.0, 0.0, 0.0, 9.0])
                .unwrap();
        assert_eq!(u, expected);
    }

    #[test]
    fn test_lower_triangle() {
        let l = get_lower_triag(&square(), 3).unwrap();
        let expected =
            DenseMatrix::from_row_major(3, 3, &[1.0, 0.0, 0.0, 4.0, 5.0, 0.0, 7.0, 8.0, 9.0])
                .unwrap();
        assert_eq!(l, expected);
    }

    #[test]
    fn test_band_extremes() {
        let a = square();
        assert_eq!(get_upper_triag(&a, 0).unwrap(), DenseMatrix::new(3, 3).unwrap());
        assert_eq!(get_lower_triag(&a, 0).unwrap(), DenseMatrix::new(3, 3).unwrap());
        assert_eq!(get_upper_triag(&a, 5).unwrap(), a);
        assert_eq!(get_lower_triag(&a, 5).unwrap(), a);
        assert_eq!(get_lower_triag(&a, 50).unwrap(), a);
    }

    #[test]
    fn test_diagonal_only() {
        let d = get_upper_triag(&square(), 1).unwrap();
        assert_eq!(
            d.to_col_major_vec(),
            vec![1.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 9.0]
        );
    }

    #[test]
    fn test_rectangular_bands() {
        // [[1, 2, 3],
        //  [4, 5, 6]]
        let wide = DenseMatrix::from_row_major(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let u = get_upper_triag(&wide, 3).unwrap();
        assert_eq!(u.row_to_vec(1).unwrap(), vec![0.0, 5.0, 6.0]);
        let l = get_lower_triag(&wide, 2).unwrap();
        assert_eq!(l.row_to_vec(0).unwrap(), vec![1.0, 0.0, 0.0]);
        assert_eq!(l.row_to_vec(1).unwrap(), vec![4.0, 5.0, 0.0]);
    }
}
