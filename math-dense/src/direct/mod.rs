//! Direct solvers for dense matrices
//!
//! This module provides:
//! - [`lu`]: LU decomposition with row and optional column pivoting, in six output shapes
//! - [`forward_sub`] / [`backward_sub`]: triangular solves against the factors
//! - [`invert`], [`lu_solve`], [`determinant`]: whole-matrix operations built on the factorization

mod lu;
mod solve;

pub use lu::{LuConfig, LuFactorization, LuResult, LuShape, lu, lu_factorize, lu_with_config};
pub use solve::{
    BackwardSubstitution, backward_sub, backward_sub_with_tolerance, determinant, forward_sub,
    invert, invert_with_config, lu_solve, lu_solve_with_config, try_invert,
};
