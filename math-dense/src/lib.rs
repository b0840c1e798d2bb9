//! Dense matrix LU factorization and inversion
//!
//! This crate provides a column-major dense matrix type together with a
//! pivoted LU factorization engine and the solvers built on top of it.
//!
//! # Features
//!
//! - **Dense storage**: [`DenseMatrix`] with checked element/row/column/sub-block access
//! - **LU factorization**: row (partial) or row and column (full) pivoting, six output shapes
//! - **Solvers**: forward/backward substitution, inversion, linear systems, determinant
//! - **Fixed-size adapters**: invert `[[T; N]; N]` arrays and flat buffers
//! - **Generic scalar types**: works with `f64` and `f32`
//!
//! # Example
//!
//! ```
//! use math_audio_dense::{DenseMatrix, LuShape, invert, lu};
//!
//! let a = DenseMatrix::from_row_major(2, 2, &[1.0_f64, 2.0, 3.0, 4.0])?;
//!
//! let factors = lu(&a, LuShape::LupVector)?;
//! assert_eq!(factors.p_vector().map(|p| p.as_slice()), Some(&[1, 0][..]));
//!
//! let inverse = invert(&a)?.expect("matrix is invertible");
//! assert!((inverse.get_element(1, 0)? - 1.5).abs() < 1e-12);
//! # Ok::<(), math_audio_dense::MatrixError>(())
//! ```

pub mod dense;
pub mod direct;
pub mod error;
pub mod fixed;
pub mod traits;

// Re-export main types
pub use dense::{DenseMatrix, PermutationVector};
pub use error::{MatrixError, Result};
pub use traits::RealField;

// Re-export band and permutation extraction
pub use dense::{
    copy_diagonal, get_lower_triag, get_upper_triag, matrix_col_perm_matrix_to_vector,
    matrix_row_perm_matrix_to_vector,
};

// Re-export direct solvers
pub use direct::{
    BackwardSubstitution, LuConfig, LuFactorization, LuResult, LuShape, backward_sub,
    backward_sub_with_tolerance, determinant, forward_sub, invert, invert_with_config, lu,
    lu_factorize, lu_solve, lu_solve_with_config, lu_with_config, try_invert,
};

// Re-export fixed-size adapters
pub use fixed::{invert_fixed, invert_flat};
