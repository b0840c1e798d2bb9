//! Triangular solves, inversion and linear systems on top of the LU factors

use super::lu::{LuConfig, lu_factorize};
use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::traits::RealField;

/// Result of [`backward_sub`]
#[derive(Debug, Clone)]
pub struct BackwardSubstitution<T: RealField> {
    /// Solution vector (`n x 1`); entries at zero diagonals are NaN
    pub x: DenseMatrix<T>,
    /// `false` if a zero diagonal entry of U was met
    pub ok: bool,
}

/// Solve `L y = b` for unit lower triangular `L` (the diagonal is not read)
pub fn forward_sub<T: RealField>(
    l: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
) -> Result<DenseMatrix<T>> {
    let n = check_system("forward_sub", l, b)?;
    let la = l.as_array();
    let ba = b.as_array();

    let mut y = DenseMatrix::new(n, 1)?;
    let ya = y.as_array_mut();
    for i in 0..n {
        let mut acc = ba[[i, 0]];
        for j in 0..i {
            acc -= ya[[j, 0]] * la[[i, j]];
        }
        ya[[i, 0]] = acc;
    }
    Ok(y)
}

/// Solve `U x = y` for upper triangular `U`.
///
/// A diagonal entry that is exactly zero makes the matching `x[i]` NaN and
/// clears `ok`; the remaining entries are still computed.
pub fn backward_sub<T: RealField>(
    u: &DenseMatrix<T>,
    y: &DenseMatrix<T>,
) -> Result<BackwardSubstitution<T>> {
    backward_sub_with_tolerance(u, y, T::zero())
}

/// [`backward_sub`] treating diagonals with magnitude `<= tol` as zero
pub fn backward_sub_with_tolerance<T: RealField>(
    u: &DenseMatrix<T>,
    y: &DenseMatrix<T>,
    tol: T,
) -> Result<BackwardSubstitution<T>> {
    let n = check_system("backward_sub", u, y)?;
    let ua = u.as_array();
    let ya = y.as_array();

    let mut x = DenseMatrix::new(n, 1)?;
    let mut ok = true;
    let xa = x.as_array_mut();
    for i in (0..n).rev() {
        let mut acc = ya[[i, 0]];
        for j in (i + 1)..n {
            acc -= xa[[j, 0]] * ua[[i, j]];
        }
        let u_ii = ua[[i, i]];
        if u_ii.is_zero_within(tol) {
            xa[[i, 0]] = T::nan();
            ok = false;
        } else {
            xa[[i, 0]] = acc * u_ii.inv();
        }
    }
    Ok(BackwardSubstitution { x, ok })
}

/// Invert a square matrix.
///
/// Returns `Ok(None)` when the matrix is singular and
/// [`MatrixError::NotSquare`] when it is not square.
pub fn invert<T: RealField>(a: &DenseMatrix<T>) -> Result<Option<DenseMatrix<T>>> {
    invert_with_config(a, &LuConfig::default())
}

/// [`invert`] with an explicit configuration; the pivot tolerance also
/// applies to the back substitution
pub fn invert_with_config<T: RealField>(
    a: &DenseMatrix<T>,
    config: &LuConfig<T>,
) -> Result<Option<DenseMatrix<T>>> {
    let n = check_square(a)?;
    let factors = lu_factorize(a, false, config)?;
    let l = factors.lower()?;
    let u = factors.upper()?;
    let p = factors.row_permutation_vector()?;

    let mut inverse = DenseMatrix::new(n, n)?;
    let mut e = DenseMatrix::new(n, 1)?;
    for k in 0..n {
        e.fill(T::zero());
        e.set_element(k, 0, T::one())?;

        let y = forward_sub(&l, &e)?;
        let solved = backward_sub_with_tolerance(&u, &y, config.pivot_tolerance)?;
        if !solved.ok {
            log::debug!(
                "invert: zero pivot in U while solving column {}, matrix is singular",
                k
            );
            return Ok(None);
        }
        // The solve against e_k yields column p[k] of the inverse.
        inverse.set_col(p[k], &solved.x)?;
    }
    Ok(Some(inverse))
}

/// [`invert`], reporting a singular matrix as [`MatrixError::Singular`]
pub fn try_invert<T: RealField>(a: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
    invert(a)?.ok_or(MatrixError::Singular)
}

/// Solve `A X = B` for one or more right-hand-side columns
pub fn lu_solve<T: RealField>(
    a: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
) -> Result<DenseMatrix<T>> {
    lu_solve_with_config(a, b, &LuConfig::default())
}

/// [`lu_solve`] with an explicit configuration
pub fn lu_solve_with_config<T: RealField>(
    a: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
    config: &LuConfig<T>,
) -> Result<DenseMatrix<T>> {
    let n = check_square(a)?;
    if b.nrows() != n {
        return Err(MatrixError::DimensionMismatch {
            operation: "lu_solve",
            expected_rows: n,
            expected_cols: b.ncols(),
            got_rows: b.nrows(),
            got_cols: b.ncols(),
        });
    }

    let factors = lu_factorize(a, false, config)?;
    let l = factors.lower()?;
    let u = factors.upper()?;
    let p = factors.row_permutation_vector()?;

    let mut x = DenseMatrix::new(n, b.ncols())?;
    let mut pb = DenseMatrix::new(n, 1)?;
    for c in 0..b.ncols() {
        // Apply row permutations: (P b)[k] = b[p[k]]
        for k in 0..n {
            pb.set_element(k, 0, b.get_element(p[k], c)?)?;
        }
        let y = forward_sub(&l, &pb)?;
        let solved = backward_sub_with_tolerance(&u, &y, config.pivot_tolerance)?;
        if !solved.ok {
            return Err(MatrixError::Singular);
        }
        x.set_col(c, &solved.x)?;
    }
    Ok(x)
}

/// Determinant of a square matrix
pub fn determinant<T: RealField>(a: &DenseMatrix<T>) -> Result<T> {
    check_square(a)?;
    lu_factorize(a, false, &LuConfig::default())?.determinant()
}

fn check_square<T: RealField>(a: &DenseMatrix<T>) -> Result<usize> {
    if !a.is_square() {
        return Err(MatrixError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    Ok(a.nrows())
}

/// Triangular system checks: `n x n` matrix and `n x 1` right-hand side
fn check_system<T: RealField>(
    operation: &'static str,
    m: &DenseMatrix<T>,
    rhs: &DenseMatrix<T>,
) -> Result<usize> {
    let n = check_square(m)?;
    if rhs.shape() != (n, 1) {
        return Err(MatrixError::DimensionMismatch {
            operation,
            expected_rows: n,
            expected_cols: 1,
            got_rows: rhs.nrows(),
            got_cols: rhs.ncols(),
        });
    }
    Ok(n)
}
