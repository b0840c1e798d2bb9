//! Scalar abstraction for the dense engine
//!
//! [`RealField`] is the element type of every [`DenseMatrix`](crate::DenseMatrix).
//! It is implemented for `f32` (the precision of the fixed-size wrappers) and
//! `f64`.

use num_traits::{Float, FromPrimitive, NumAssign, ToPrimitive};
use std::fmt::{Debug, Display};

/// Trait for real scalar types usable as matrix elements.
///
/// # Implementations
///
/// Provided for:
/// - `f32` (single precision, the usual graphics/transform case)
/// - `f64` (double precision)
pub trait RealField:
    Float + NumAssign + FromPrimitive + ToPrimitive + Debug + Display + Send + Sync + 'static
{
    /// Magnitude |x|
    fn norm(&self) -> Self;

    /// Check if |x| <= tol. With `tol == 0` this is an exact zero test.
    fn is_zero_within(&self, tol: Self) -> bool {
        self.norm() <= tol
    }

    /// Multiplicative inverse (1/x)
    fn inv(&self) -> Self;
}

impl RealField for f64 {
    #[inline]
    fn norm(&self) -> f64 {
        self.abs()
    }

    #[inline]
    fn inv(&self) -> Self {
        1.0 / *self
    }
}

impl RealField for f32 {
    #[inline]
    fn norm(&self) -> f32 {
        self.abs()
    }

    #[inline]
    fn inv(&self) -> Self {
        1.0 / *self
    }
}
