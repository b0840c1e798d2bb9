//! LU decomposition
//!
//! Gaussian elimination with row pivoting and, on request, column pivoting.
//! A single elimination pass produces an [`LuFactorization`] (the eliminated
//! matrix plus the recorded swaps); [`LuFactorization::into_shape`] then
//! formats it into one of the six [`LuShape`] outputs.

use crate::dense::{
    DenseMatrix, PermutationVector, get_lower_triag, get_upper_triag,
    matrix_col_perm_matrix_to_vector, matrix_row_perm_matrix_to_vector, replay_col_swaps,
    replay_row_swaps,
};
use crate::error::{MatrixError, Result};
use crate::traits::RealField;
use num_traits::Zero;

/// Requested output of [`lu`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LuShape {
    /// One matrix: multipliers strictly below the diagonal, U on and above it
    Compact,
    /// Separate L and U of the row-pivoted matrix, without P
    Lu,
    /// L, U and the row permutation matrix P
    Lup,
    /// L, U and the row permutation vector p
    LupVector,
    /// L, U, row permutation matrix P and column permutation matrix Q
    Lupq,
    /// L, U, row permutation vector p and column permutation vector q
    LupqVector,
}

impl LuShape {
    /// Check if this shape pivots columns as well as rows
    pub fn pivots_columns(self) -> bool {
        matches!(self, LuShape::Lupq | LuShape::LupqVector)
    }
}

/// LU factorization configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LuConfig<R> {
    /// A pivot with magnitude `<=` this value is treated as zero.
    /// The default of zero only treats an exact `0.0` as zero.
    pub pivot_tolerance: R,
    /// Log progress every N elimination steps (0 = no output)
    pub print_interval: usize,
}

impl<R: Zero> Default for LuConfig<R> {
    fn default() -> Self {
        Self {
            pivot_tolerance: R::zero(),
            print_interval: 0,
        }
    }
}

/// Result of [`lu`], one variant per [`LuShape`]
#[derive(Debug, Clone, PartialEq)]
pub enum LuResult<T: RealField> {
    /// Multipliers and U packed in one matrix
    Compact(DenseMatrix<T>),
    /// `P A = L U`, with P recorded by the factorization but not returned
    Lu {
        l: DenseMatrix<T>,
        u: DenseMatrix<T>,
    },
    /// `P A = L U`
    Lup {
        l: DenseMatrix<T>,
        u: DenseMatrix<T>,
        p: DenseMatrix<T>,
    },
    /// `P A = L U` with P given as a vector
    LupVector {
        l: DenseMatrix<T>,
        u: DenseMatrix<T>,
        p: PermutationVector,
    },
    /// `P A Q = L U`
    Lupq {
        l: DenseMatrix<T>,
        u: DenseMatrix<T>,
        p: DenseMatrix<T>,
        q: DenseMatrix<T>,
    },
    /// `P A Q = L U` with P and Q given as vectors
    LupqVector {
        l: DenseMatrix<T>,
        u: DenseMatrix<T>,
        p: PermutationVector,
        q: PermutationVector,
    },
}

impl<T: RealField> LuResult<T> {
    /// Shape this result was formatted as
    pub fn shape(&self) -> LuShape {
        match self {
            LuResult::Compact(_) => LuShape::Compact,
            LuResult::Lu { .. } => LuShape::Lu,
            LuResult::Lup { .. } => LuShape::Lup,
            LuResult::LupVector { .. } => LuShape::LupVector,
            LuResult::Lupq { .. } => LuShape::Lupq,
            LuResult::LupqVector { .. } => LuShape::LupqVector,
        }
    }

    /// Packed matrix of a `Compact` result
    pub fn compact(&self) -> Option<&DenseMatrix<T>> {
        match self {
            LuResult::Compact(lu) => Some(lu),
            _ => None,
        }
    }

    /// Unit lower triangular factor
    pub fn l(&self) -> Option<&DenseMatrix<T>> {
        match self {
            LuResult::Compact(_) => None,
            LuResult::Lu { l, .. }
            | LuResult::Lup { l, .. }
            | LuResult::LupVector { l, .. }
            | LuResult::Lupq { l, .. }
            | LuResult::LupqVector { l, .. } => Some(l),
        }
    }

    /// Upper triangular factor
    pub fn u(&self) -> Option<&DenseMatrix<T>> {
        match self {
            LuResult::Compact(_) => None,
            LuResult::Lu { u, .. }
            | LuResult::Lup { u, .. }
            | LuResult::LupVector { u, .. }
            | LuResult::Lupq { u, .. }
            | LuResult::LupqVector { u, .. } => Some(u),
        }
    }

    /// Row permutation matrix, when returned in matrix form
    pub fn p(&self) -> Option<&DenseMatrix<T>> {
        match self {
            LuResult::Lup { p, .. } | LuResult::Lupq { p, .. } => Some(p),
            _ => None,
        }
    }

    /// Column permutation matrix, when returned in matrix form
    pub fn q(&self) -> Option<&DenseMatrix<T>> {
        match self {
            LuResult::Lupq { q, .. } => Some(q),
            _ => None,
        }
    }

    /// Row permutation vector, when returned in vector form
    pub fn p_vector(&self) -> Option<&PermutationVector> {
        match self {
            LuResult::LupVector { p, .. } | LuResult::LupqVector { p, .. } => Some(p),
            _ => None,
        }
    }

    /// Column permutation vector, when returned in vector form
    pub fn q_vector(&self) -> Option<&PermutationVector> {
        match self {
            LuResult::LupqVector { q, .. } => Some(q),
            _ => None,
        }
    }
}

/// Raw output of the elimination pass
///
/// Stores the eliminated matrix (multipliers below the diagonal, U on and
/// above it) along with every row and column swap in the order performed.
#[derive(Debug, Clone)]
pub struct LuFactorization<T: RealField> {
    /// Eliminated matrix, same shape as the input
    pub lu: DenseMatrix<T>,
    /// Row swaps `(k, k + i)`, one per elimination step
    pub row_swaps: Vec<(usize, usize)>,
    /// Column swaps `(k, k + j)`, empty unless columns were pivoted
    pub col_swaps: Vec<(usize, usize)>,
}

impl<T: RealField> LuFactorization<T> {
    /// Number of rows of the factorized matrix
    pub fn nrows(&self) -> usize {
        self.lu.nrows()
    }

    /// Number of columns of the factorized matrix
    pub fn ncols(&self) -> usize {
        self.lu.ncols()
    }

    /// Unit lower triangular factor, `rows x min(rows, cols)`
    pub fn lower(&self) -> Result<DenseMatrix<T>> {
        let (rows, cols) = self.lu.shape();
        let size = rows.min(cols);
        let mut l = get_lower_triag(&self.lu, rows)?;
        for d in 0..size {
            l.set_element(d, d, T::one())?;
        }
        l.get_sub_matrix(0, rows - 1, 0, size - 1)
    }

    /// Upper triangular factor, `min(rows, cols) x cols`
    pub fn upper(&self) -> Result<DenseMatrix<T>> {
        let (rows, cols) = self.lu.shape();
        let size = rows.min(cols);
        get_upper_triag(&self.lu, cols)?.get_sub_matrix(0, size - 1, 0, cols - 1)
    }

    /// Row permutation matrix P (`rows x rows`)
    pub fn row_permutation(&self) -> Result<DenseMatrix<T>> {
        replay_row_swaps(self.nrows(), &self.row_swaps)
    }

    /// Column permutation matrix Q (`cols x cols`)
    pub fn col_permutation(&self) -> Result<DenseMatrix<T>> {
        replay_col_swaps(self.ncols(), &self.col_swaps)
    }

    /// Row permutation in vector form
    pub fn row_permutation_vector(&self) -> Result<PermutationVector> {
        matrix_row_perm_matrix_to_vector(&self.row_permutation()?)
    }

    /// Column permutation in vector form
    pub fn col_permutation_vector(&self) -> Result<PermutationVector> {
        matrix_col_perm_matrix_to_vector(&self.col_permutation()?)
    }

    /// Determinant of the factorized (square) matrix
    pub fn determinant(&self) -> Result<T> {
        if !self.lu.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        let swaps = self
            .row_swaps
            .iter()
            .chain(self.col_swaps.iter())
            .filter(|(a, b)| a != b)
            .count();
        let mut det = self.lu.as_array().diag().iter().fold(T::one(), |acc, &d| acc * d);
        if swaps % 2 == 1 {
            det = -det;
        }
        Ok(det)
    }

    /// Format into the requested output shape
    pub fn into_shape(self, shape: LuShape) -> Result<LuResult<T>> {
        let result = match shape {
            LuShape::Compact => LuResult::Compact(self.lu),
            LuShape::Lu => LuResult::Lu {
                l: self.lower()?,
                u: self.upper()?,
            },
            LuShape::Lup => LuResult::Lup {
                l: self.lower()?,
                u: self.upper()?,
                p: self.row_permutation()?,
            },
            LuShape::LupVector => LuResult::LupVector {
                l: self.lower()?,
                u: self.upper()?,
                p: self.row_permutation_vector()?,
            },
            LuShape::Lupq => LuResult::Lupq {
                l: self.lower()?,
                u: self.upper()?,
                p: self.row_permutation()?,
                q: self.col_permutation()?,
            },
            LuShape::LupqVector => LuResult::LupqVector {
                l: self.lower()?,
                u: self.upper()?,
                p: self.row_permutation_vector()?,
                q: self.col_permutation_vector()?,
            },
        };
        Ok(result)
    }
}

/// Run the elimination pass on a copy of `a`
///
/// Each step searches the trailing column `A[k.., k]` (or, with
/// `pivot_columns`, the trailing block `A[k.., k..]`) for the entry of largest
/// magnitude, swaps it onto the diagonal and eliminates below it. Steps whose
/// pivot is zero under `config.pivot_tolerance` are skipped. Rectangular
/// matrices are accepted.
pub fn lu_factorize<T: RealField>(
    a: &DenseMatrix<T>,
    pivot_columns: bool,
    config: &LuConfig<T>,
) -> Result<LuFactorization<T>> {
    let (rows, cols) = a.shape();
    let steps = (rows - 1).min(cols);

    let mut work = a.clone();
    let mut row_swaps = Vec::with_capacity(steps);
    let mut col_swaps = Vec::new();

    for k in 0..steps {
        let search_end = if pivot_columns { cols - 1 } else { k };
        let (_, i, j) = work
            .get_sub_matrix(k, rows - 1, k, search_end)?
            .max_magnitude();

        work.swap_row(k, k + i)?;
        row_swaps.push((k, k + i));
        if pivot_columns {
            work.swap_column(k, k + j)?;
            col_swaps.push((k, k + j));
        }

        let m = work.as_array_mut();
        let pivot = m[[k, k]];
        if pivot.is_zero_within(config.pivot_tolerance) {
            log::debug!("LU step {}: zero pivot, column is rank-deficient", k);
            for i in (k + 1)..rows {
                m[[i, k]] = T::zero();
            }
            continue;
        }

        let pivot_inv = pivot.inv();
        for i in (k + 1)..rows {
            m[[i, k]] *= pivot_inv;
        }
        for j in (k + 1)..cols {
            let u_kj = m[[k, j]];
            for i in (k + 1)..rows {
                let l_ik = m[[i, k]];
                m[[i, j]] -= l_ik * u_kj;
            }
        }

        if config.print_interval > 0 && (k + 1) % config.print_interval == 0 {
            log::info!(
                "LU step {}/{}: pivot = {:.6e}",
                k + 1,
                steps,
                pivot.to_f64().unwrap_or(0.0)
            );
        }
    }

    Ok(LuFactorization {
        lu: work,
        row_swaps,
        col_swaps,
    })
}

/// Factorize `a` and format the result as `shape`
pub fn lu<T: RealField>(a: &DenseMatrix<T>, shape: LuShape) -> Result<LuResult<T>> {
    lu_with_config(a, shape, &LuConfig::default())
}

/// [`lu`] with an explicit configuration
pub fn lu_with_config<T: RealField>(
    a: &DenseMatrix<T>,
    shape: LuShape,
    config: &LuConfig<T>,
) -> Result<LuResult<T>> {
    lu_factorize(a, shape.pivots_columns(), config)?.into_shape(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-10;

    const ALL_SHAPES: [LuShape; 5] = [
        LuShape::Lu,
        LuShape::Lup,
        LuShape::LupVector,
        LuShape::Lupq,
        LuShape::LupqVector,
    ];

    fn m(rows: usize, cols: usize, row_major: &[f64]) -> DenseMatrix<f64> {
        DenseMatrix::from_row_major(rows, cols, row_major).unwrap()
    }

    /// `P A Q`. A shape without P still had its rows swapped, so the
    /// factorization's row permutation stands in; a missing Q is the identity.
    fn permuted(a: &DenseMatrix<f64>, result: &LuResult<f64>) -> DenseMatrix<f64> {
        let cols = a.ncols();
        let p = match (result.p(), result.p_vector()) {
            (Some(p), _) => p.clone(),
            (None, Some(p)) => p.to_row_matrix().unwrap(),
            (None, None) => lu_factorize(a, result.shape().pivots_columns(), &LuConfig::default())
                .unwrap()
                .row_permutation()
                .unwrap(),
        };
        let q = match (result.q(), result.q_vector()) {
            (Some(q), _) => q.clone(),
            (None, Some(q)) => q.to_col_matrix().unwrap(),
            (None, None) => DenseMatrix::identity(cols).unwrap(),
        };
        p.matmul(a).unwrap().matmul(&q).unwrap()
    }

    fn assert_triangular(l: &DenseMatrix<f64>, u: &DenseMatrix<f64>) {
        let la = l.as_array();
        for ((r, c), &v) in la.indexed_iter() {
            if r == c {
                assert_eq!(v, 1.0, "L diagonal at {}", r);
            } else if c > r {
                assert_eq!(v, 0.0, "L above diagonal at ({}, {})", r, c);
            }
        }
        for ((r, c), &v) in u.as_array().indexed_iter() {
            if r > c {
                assert_eq!(v, 0.0, "U below diagonal at ({}, {})", r, c);
            }
        }
    }

    fn check_all_shapes(a: &DenseMatrix<f64>) {
        let (rows, cols) = a.shape();
        let size = rows.min(cols);
        for shape in ALL_SHAPES {
            let result = lu(a, shape).unwrap();
            assert_eq!(result.shape(), shape);
            let l = result.l().unwrap();
            let u = result.u().unwrap();
            assert_eq!(l.shape(), (rows, size));
            assert_eq!(u.shape(), (size, cols));
            assert_triangular(l, u);

            let lu_product = l.matmul(u).unwrap();
            assert!(
                permuted(a, &result).approx_eq(&lu_product, TOL),
                "P A Q != L U for {:?}",
                shape
            );
        }
    }

    #[test]
    fn test_partial_pivoting_2x2() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let result = lu(&a, LuShape::LupVector).unwrap();

        assert_eq!(result.p_vector().unwrap().as_slice(), &[1, 0]);
        let l = result.l().unwrap();
        let u = result.u().unwrap();
        assert_relative_eq!(l.get_element(1, 0).unwrap(), 1.0 / 3.0, epsilon = TOL);
        assert_relative_eq!(u.get_element(0, 0).unwrap(), 3.0);
        assert_relative_eq!(u.get_element(0, 1).unwrap(), 4.0);
        assert_relative_eq!(u.get_element(1, 1).unwrap(), 2.0 / 3.0, epsilon = TOL);
    }

    #[test]
    fn test_compact_packs_multipliers() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let result = lu(&a, LuShape::Compact).unwrap();
        assert!(result.l().is_none());
        let packed = result.compact().unwrap();
        assert_relative_eq!(packed.get_element(0, 0).unwrap(), 3.0);
        assert_relative_eq!(packed.get_element(1, 0).unwrap(), 1.0 / 3.0, epsilon = TOL);
        assert_relative_eq!(packed.get_element(1, 1).unwrap(), 2.0 / 3.0, epsilon = TOL);
    }

    #[test]
    fn test_full_pivoting_moves_largest_to_front() {
        let a = m(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0]);
        let result = lu(&a, LuShape::LupqVector).unwrap();
        assert_eq!(result.p_vector().unwrap()[0], 2);
        assert_eq!(result.q_vector().unwrap()[0], 2);
        assert_relative_eq!(result.u().unwrap().get_element(0, 0).unwrap(), 10.0);
    }

    #[test]
    fn test_square_shapes_reconstruct() {
        check_all_shapes(&m(
            4,
            4,
            &[
                2.0, -1.0, 0.0, 3.0, 4.0, 1.0, -2.0, 0.5, -6.0, 2.0, 1.0, 1.0, 0.0, 3.0, -1.0, 2.0,
            ],
        ));
        check_all_shapes(&m(3, 3, &[1.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]));
    }

    #[test]
    fn test_rectangular_shapes_reconstruct() {
        // wide
        check_all_shapes(&m(2, 4, &[1.0, 3.0, -2.0, 0.5, 4.0, -1.0, 2.0, 7.0]));
        // tall
        check_all_shapes(&m(
            4,
            2,
            &[1.0, 2.0, -3.0, 0.5, 4.0, 4.0, 2.0, -7.0],
        ));
        // single row and single column
        check_all_shapes(&m(1, 3, &[2.0, -1.0, 5.0]));
        check_all_shapes(&m(3, 1, &[2.0, -8.0, 5.0]));
    }

    #[test]
    fn test_rank_deficient_reconstruct() {
        // Two identical rows and an all-zero column
        check_all_shapes(&m(3, 3, &[1.0, 0.0, 2.0, 1.0, 0.0, 2.0, 3.0, 0.0, 1.0]));
        check_all_shapes(&DenseMatrix::new(3, 3).unwrap());
    }

    #[test]
    fn test_lu_shape_matches_lup_factors() {
        // Column 0 pivots on row 1, so L U reproduces P A, not A.
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let plain = lu(&a, LuShape::Lu).unwrap();
        let pivoted = lu(&a, LuShape::Lup).unwrap();
        assert!(plain.p().is_none() && plain.p_vector().is_none());
        assert_eq!(plain.l(), pivoted.l());
        assert_eq!(plain.u(), pivoted.u());

        let lu_product = plain.l().unwrap().matmul(plain.u().unwrap()).unwrap();
        assert!(!lu_product.approx_eq(&a, TOL));
        assert!(lu_product.approx_eq(&m(2, 2, &[3.0, 4.0, 1.0, 2.0]), TOL));
    }

    #[test]
    fn test_equal_magnitude_pivot_keeps_first_row() {
        // |-3| == |3|: the strictly-greater scan keeps row 0.
        let a = m(2, 2, &[-3.0, 1.0, 3.0, 2.0]);
        let f = lu_factorize(&a, false, &LuConfig::default()).unwrap();
        assert_eq!(f.row_swaps, vec![(0, 0)]);
        assert_relative_eq!(f.lu.get_element(0, 0).unwrap(), -3.0);
        assert_relative_eq!(f.lu.get_element(1, 0).unwrap(), -1.0);
        assert_relative_eq!(f.lu.get_element(1, 1).unwrap(), 3.0);
    }

    #[test]
    fn test_equal_magnitude_full_pivot_takes_lowest_column() {
        // Magnitude 4 at (1, 1), (0, 2) and (1, 2); column 1 is scanned first.
        let a = m(2, 3, &[1.0, 2.0, -4.0, 0.5, 4.0, 4.0]);
        let f = lu_factorize(&a, true, &LuConfig::default()).unwrap();
        assert_eq!(f.row_swaps, vec![(0, 1)]);
        assert_eq!(f.col_swaps, vec![(0, 1)]);
        assert_relative_eq!(f.lu.get_element(0, 0).unwrap(), 4.0);

        let result = lu(&a, LuShape::LupqVector).unwrap();
        assert_eq!(result.p_vector().unwrap().as_slice(), &[1, 0]);
        assert_eq!(result.q_vector().unwrap().as_slice(), &[1, 0, 2]);
    }

    #[test]
    fn test_zero_pivot_is_skipped() {
        let a = m(2, 2, &[0.0, 1.0, 0.0, 1.0]);
        let f = lu_factorize(&a, false, &LuConfig::default()).unwrap();
        assert_eq!(f.row_swaps, vec![(0, 0)]);
        assert!(f.col_swaps.is_empty());
        assert_eq!(f.lu, a);
    }

    #[test]
    fn test_permutation_forms_agree() {
        let a = m(3, 3, &[0.0, 2.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0, 2.0]);
        let mats = lu(&a, LuShape::Lupq).unwrap();
        let vecs = lu(&a, LuShape::LupqVector).unwrap();
        assert_eq!(
            &vecs.p_vector().unwrap().to_row_matrix::<f64>().unwrap(),
            mats.p().unwrap()
        );
        assert_eq!(
            &vecs.q_vector().unwrap().to_col_matrix::<f64>().unwrap(),
            mats.q().unwrap()
        );
    }

    #[test]
    fn test_determinant() {
        let f = lu_factorize(&m(2, 2, &[1.0, 2.0, 3.0, 4.0]), false, &LuConfig::default()).unwrap();
        assert_relative_eq!(f.determinant().unwrap(), -2.0, epsilon = TOL);

        let a = m(3, 3, &[2.0, 0.0, 1.0, 1.0, 3.0, 2.0, 1.0, 1.0, 2.0]);
        let full = lu_factorize(&a, true, &LuConfig::default()).unwrap();
        assert_relative_eq!(full.determinant().unwrap(), 6.0, epsilon = TOL);

        let wide = lu_factorize(&m(1, 2, &[1.0, 2.0]), false, &LuConfig::default()).unwrap();
        assert!(wide.determinant().unwrap_err().is_dimension_error());
    }

    #[test]
    fn test_pivot_tolerance_treats_tiny_pivot_as_zero() {
        let a = m(2, 2, &[1e-14, 1.0, 1e-14, 1.0]);
        let config = LuConfig {
            pivot_tolerance: 1e-12,
            print_interval: 1,
        };
        let f = lu_factorize(&a, false, &config).unwrap();
        assert_eq!(f.lu.get_element(1, 0).unwrap(), 0.0);

        let exact = lu_factorize(&a, false, &LuConfig::default()).unwrap();
        assert_relative_eq!(exact.lu.get_element(1, 0).unwrap(), 1.0);
    }
}
