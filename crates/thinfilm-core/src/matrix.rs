//! 2x2 complex characteristic matrices and their wavelength derivatives.
//!
//! A manual 2x2 recursion over complex entries, each matrix paired with its
//! derivative so the engine can propagate `dM/dlambda` alongside `M`
//! without finite differences.

use crate::complex::Complex;

/// A 2x2 matrix of complex entries, stored row-major:
/// `[[m00, m01], [m10, m11]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2 {
    /// Entry (0, 0).
    pub m00: Complex,
    /// Entry (0, 1).
    pub m01: Complex,
    /// Entry (1, 0).
    pub m10: Complex,
    /// Entry (1, 1).
    pub m11: Complex,
}

impl Matrix2 {
    /// The 2x2 identity matrix.
    pub const IDENTITY: Matrix2 = Matrix2 {
        m00: Complex::ONE,
        m01: Complex::ZERO,
        m10: Complex::ZERO,
        m11: Complex::ONE,
    };

    /// Construct a matrix from its four entries.
    #[inline]
    pub const fn new(m00: Complex, m01: Complex, m10: Complex, m11: Complex) -> Self {
        Self { m00, m01, m10, m11 }
    }

    /// The zero matrix (used as the derivative of a constant matrix).
    #[inline]
    pub const fn zero() -> Self {
        Matrix2::new(Complex::ZERO, Complex::ZERO, Complex::ZERO, Complex::ZERO)
    }

    /// Matrix product `self * rhs`.
    #[inline]
    pub fn mul(&self, rhs: &Matrix2) -> Matrix2 {
        Matrix2::new(
            self.m00 * rhs.m00 + self.m01 * rhs.m10,
            self.m00 * rhs.m01 + self.m01 * rhs.m11,
            self.m10 * rhs.m00 + self.m11 * rhs.m10,
            self.m10 * rhs.m01 + self.m11 * rhs.m11,
        )
    }

    /// Elementwise addition, used when accumulating derivative terms.
    #[inline]
    pub fn add(&self, rhs: &Matrix2) -> Matrix2 {
        Matrix2::new(
            self.m00 + rhs.m00,
            self.m01 + rhs.m01,
            self.m10 + rhs.m10,
            self.m11 + rhs.m11,
        )
    }
}

/// A characteristic matrix paired with its wavelength derivative.
///
/// The engine maintains one of these per polarization as it accumulates
/// sublayers substrate-to-ambient. Multiplying two `(M, dM)` pairs uses the
/// product rule: if `M' = M_new . M_old` then
/// `dM'/dlambda = dM_new/dlambda . M_old + M_new . dM_old/dlambda`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DMatrix2 {
    /// The matrix value.
    pub value: Matrix2,
    /// Its derivative with respect to wavelength.
    pub deriv: Matrix2,
}

impl DMatrix2 {
    /// The identity matrix with zero derivative — the accumulator's
    /// starting point, and the result for a zero-thickness sublayer.
    pub const IDENTITY: DMatrix2 = DMatrix2 {
        value: Matrix2::IDENTITY,
        deriv: Matrix2::zero(),
    };

    /// Construct from a value with no derivative information (derivative
    /// zero) — used when the caller only wants the value propagation.
    #[inline]
    pub fn from_value(value: Matrix2) -> Self {
        Self { value, deriv: Matrix2::zero() }
    }

    /// Compose `self` (outer, multiplied on the left) with `inner`
    /// (previously accumulated): sublayer 0 (adjacent to the substrate) is
    /// innermost, and later sublayers are multiplied on the left as the
    /// engine walks toward the ambient medium.
    pub fn compose(&self, inner: &DMatrix2) -> DMatrix2 {
        let value = self.value.mul(&inner.value);
        let deriv = self.deriv.mul(&inner.value).add(&self.value.mul(&inner.deriv));
        DMatrix2 { value, deriv }
    }
}

impl Default for DMatrix2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_compose_is_identity() {
        let id = DMatrix2::IDENTITY;
        let composed = id.compose(&id);
        assert_eq!(composed.value, Matrix2::IDENTITY);
        assert_eq!(composed.deriv, Matrix2::zero());
    }

    #[test]
    fn product_rule_matches_manual_derivative() {
        // M(lambda) = [[lambda, 0], [0, lambda^2]], dM/dlambda analytically known.
        let lambda = 2.0;
        let h = 1e-6;
        let build = |l: f64| Matrix2::new(
            Complex::real(l),
            Complex::ZERO,
            Complex::ZERO,
            Complex::real(l * l),
        );
        let m_a = DMatrix2 {
            value: build(lambda),
            deriv: Matrix2::new(Complex::real(1.0), Complex::ZERO, Complex::ZERO, Complex::real(2.0 * lambda)),
        };
        let composed = m_a.compose(&m_a);
        let fd = (build(lambda + h).mul(&build(lambda + h)).m11.re
            - build(lambda - h).mul(&build(lambda - h)).m11.re)
            / (2.0 * h);
        assert!((composed.deriv.m11.re - fd).abs() < 1e-4);
    }
}
