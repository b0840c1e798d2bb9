//! Dense matrix storage and band/permutation extraction
//!
//! - [`DenseMatrix`]: column-major owned matrix with checked access
//! - [`get_upper_triag`] / [`get_lower_triag`]: diagonal-band copies used to rebuild L and U
//! - [`PermutationVector`]: vector form of a permutation matrix

mod matrix;
mod permutation;
mod triangular;

pub use matrix::DenseMatrix;
pub use permutation::{
    PermutationVector, matrix_col_perm_matrix_to_vector, matrix_row_perm_matrix_to_vector,
};
pub use triangular::{copy_diagonal, get_lower_triag, get_upper_triag};

pub(crate) use permutation::{replay_col_swaps, replay_row_swaps};
