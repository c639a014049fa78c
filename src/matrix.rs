#![warn(missing_docs)]
//! Ray-transfer (ABCD) matrices for paraxial propagation
use crate::error::{GooseError, GooseResult};
use nalgebra::Matrix2;
use num::{complex::Complex64, Zero};
use serde::{Deserialize, Serialize};
use std::ops::Mul;
use uom::si::{f64::Length, length::millimeter};

/// A 2x2 ray-transfer matrix acting on the complex beam parameter.
///
/// All entries are stored dimensionless with lengths expressed in millimeters. A matrix
/// transforms a complex beam parameter `q` through the Möbius relation
/// `q' = (A * q + B) / (C * q + D)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayTransferMatrix(Matrix2<f64>);

impl RayTransferMatrix {
    /// Create a new [`RayTransferMatrix`] from the given entries in row-major order.
    #[must_use]
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self(Matrix2::new(a, b, c, d))
    }
    /// Create an identity matrix which leaves a beam parameter unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self(Matrix2::identity())
    }
    /// Create a matrix for propagation over a homogeneous gap of the given length.
    ///
    /// Negative lengths are allowed and correspond to back propagation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given length is not finite.
    pub fn free_space(length: Length) -> GooseResult<Self> {
        if !length.is_finite() {
            return Err(GooseError::Element(
                "propagation length must be finite".into(),
            ));
        }
        Ok(Self::new(1.0, length.get::<millimeter>(), 0.0, 1.0))
    }
    /// Create a matrix for a thin lens with the given focal length.
    ///
    /// # Errors
    ///
    /// This function will return an error if the focal length is zero or not finite.
    pub fn thin_lens(focal_length: Length) -> GooseResult<Self> {
        if focal_length.is_zero() || !focal_length.is_finite() {
            return Err(GooseError::Element(
                "focal length must be != 0.0 and finite".into(),
            ));
        }
        Ok(Self::new(
            1.0,
            0.0,
            -1.0 / focal_length.get::<millimeter>(),
            1.0,
        ))
    }
    /// Returns the `A` entry of this matrix.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.0.m11
    }
    /// Returns the `B` entry of this matrix.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.0.m12
    }
    /// Returns the `C` entry of this matrix.
    #[must_use]
    pub fn c(&self) -> f64 {
        self.0.m21
    }
    /// Returns the `D` entry of this matrix.
    #[must_use]
    pub fn d(&self) -> f64 {
        self.0.m22
    }
    /// Returns the determinant `A * D - B * C` of this matrix.
    ///
    /// For a sequence of elements embedded in a single medium the determinant is 1.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }
    /// Transform the given complex beam parameter by this matrix.
    ///
    /// This applies the Möbius relation `q' = (A * q + B) / (C * q + D)`. Since `B`, `C`
    /// and `D` carry millimeter-based scales, `q` must be given in millimeters as well.
    #[must_use]
    pub fn apply(&self, q: Complex64) -> Complex64 {
        let numerator = Complex64::new(self.a().mul_add(q.re, self.b()), self.a() * q.im);
        let denominator = Complex64::new(self.c().mul_add(q.re, self.d()), self.c() * q.im);
        numerator / denominator
    }
}

impl Mul for RayTransferMatrix {
    type Output = Self;
    /// Compose two matrices.
    ///
    /// Matrix composition follows the usual right-to-left convention: `lens * gap` is the
    /// matrix of a system traversed gap first, lens second.
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::millimeter;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    #[test]
    fn new() {
        let m = RayTransferMatrix::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.a(), 1.0);
        assert_eq!(m.b(), 2.0);
        assert_eq!(m.c(), 3.0);
        assert_eq!(m.d(), 4.0);
    }
    #[test]
    fn identity() {
        let m = RayTransferMatrix::identity();
        assert_eq!(m, RayTransferMatrix::new(1.0, 0.0, 0.0, 1.0));
        let q = Complex64::new(-20.0, 2952.0);
        assert_eq!(m.apply(q), q);
    }
    #[test]
    fn free_space() {
        assert!(RayTransferMatrix::free_space(millimeter!(f64::NAN)).is_err());
        assert!(RayTransferMatrix::free_space(millimeter!(f64::INFINITY)).is_err());
        let m = RayTransferMatrix::free_space(millimeter!(100.0)).unwrap();
        assert_eq!(m, RayTransferMatrix::new(1.0, 100.0, 0.0, 1.0));
        let m = RayTransferMatrix::free_space(millimeter!(-10.0)).unwrap();
        assert_eq!(m.b(), -10.0);
    }
    #[test]
    fn free_space_apply() {
        let m = RayTransferMatrix::free_space(millimeter!(250.0)).unwrap();
        let q = Complex64::new(-20.0, 2952.0);
        let q_prime = m.apply(q);
        assert_relative_eq!(q_prime.re, 230.0);
        assert_relative_eq!(q_prime.im, 2952.0);
    }
    #[test]
    fn thin_lens() {
        assert!(RayTransferMatrix::thin_lens(millimeter!(0.0)).is_err());
        assert!(RayTransferMatrix::thin_lens(millimeter!(f64::NAN)).is_err());
        assert!(RayTransferMatrix::thin_lens(millimeter!(f64::NEG_INFINITY)).is_err());
        let m = RayTransferMatrix::thin_lens(millimeter!(200.0)).unwrap();
        assert_eq!(m, RayTransferMatrix::new(1.0, 0.0, -0.005, 1.0));
        let m = RayTransferMatrix::thin_lens(millimeter!(-50.0)).unwrap();
        assert_eq!(m.c(), 0.02);
    }
    #[test]
    fn thin_lens_apply() {
        let f = 200.0;
        let m = RayTransferMatrix::thin_lens(millimeter!(f)).unwrap();
        let q = Complex64::new(100.0, 2952.0);
        let q_prime = m.apply(q);
        let inv_expected = 1.0 / q - Complex64::new(1.0 / f, 0.0);
        let expected = 1.0 / inv_expected;
        assert_relative_eq!(q_prime.re, expected.re, max_relative = 1e-12);
        assert_relative_eq!(q_prime.im, expected.im, max_relative = 1e-12);
    }
    #[test]
    fn compose() {
        let gap = RayTransferMatrix::free_space(millimeter!(100.0)).unwrap();
        let lens = RayTransferMatrix::thin_lens(millimeter!(200.0)).unwrap();
        let system = lens * gap;
        let q = Complex64::new(0.0, 2952.0);
        let sequential = lens.apply(gap.apply(q));
        let composed = system.apply(q);
        assert_relative_eq!(composed.re, sequential.re, max_relative = 1e-12);
        assert_relative_eq!(composed.im, sequential.im, max_relative = 1e-12);
    }
    #[test]
    fn determinant() {
        let gap = RayTransferMatrix::free_space(millimeter!(123.4)).unwrap();
        let lens = RayTransferMatrix::thin_lens(millimeter!(-77.0)).unwrap();
        assert_abs_diff_eq!(gap.determinant(), 1.0);
        assert_abs_diff_eq!(lens.determinant(), 1.0);
        assert_abs_diff_eq!((lens * gap).determinant(), 1.0, epsilon = 1e-12);
    }
}
