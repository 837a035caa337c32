//! # Complex arithmetic for the Abelès formalism
//!
//! A minimal complex number type, hand-rolled rather than pulled from
//! `num-complex`, keeping this numerical core dependency-free.
//!
//! Passive media carry loss as a *negative* imaginary part throughout this
//! crate (`N = n - i*k`, `k >= 0`).

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A complex number `re + i*im`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// Additive and multiplicative identities.
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    /// The multiplicative identity.
    pub const ONE: Complex = Complex::new(1.0, 0.0);
    /// The imaginary unit.
    pub const I: Complex = Complex::new(0.0, 1.0);

    /// Construct a new complex number.
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Construct a purely real complex number.
    #[inline]
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// `|z|^2 = re^2 + im^2`.
    #[inline]
    pub fn norm_sqr(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// `|z|`.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// Complex conjugate.
    #[inline]
    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// `arg(z)`, in radians, via `atan2`.
    #[inline]
    pub fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Principal square root: the branch with non-negative real part.
    ///
    /// When the result would land exactly on the imaginary axis (`re == 0`)
    /// the sign of the imaginary part is flipped if negative, so that the
    /// branch always has `Im >= 0` there — the admittance branch convention
    /// used throughout this crate.
    pub fn sqrt(&self) -> Self {
        if self.re == 0.0 && self.im == 0.0 {
            return Self::ZERO;
        }
        let r = self.norm();
        let mut re = ((r + self.re) / 2.0).max(0.0).sqrt();
        let mut im = ((r - self.re) / 2.0).max(0.0).sqrt();
        if self.im < 0.0 {
            im = -im;
        }
        if re == 0.0 && im < 0.0 {
            im = -im;
        }
        if re < 0.0 {
            re = -re;
            im = -im;
        }
        Self::new(re, im)
    }

    /// `cos(z)` for complex `z`, needed for the characteristic-matrix phase
    /// factor `cos(beta)` when `beta` is complex (absorbing sublayers).
    pub fn cos(&self) -> Self {
        Self::new(
            self.re.cos() * self.im.cosh(),
            -self.re.sin() * self.im.sinh(),
        )
    }

    /// `sin(z)` for complex `z`.
    pub fn sin(&self) -> Self {
        Self::new(
            self.re.sin() * self.im.cosh(),
            self.re.cos() * self.im.sinh(),
        )
    }

    /// Multiplicative inverse.
    pub fn inv(&self) -> Self {
        let d = self.norm_sqr();
        Self::new(self.re / d, -self.im / d)
    }

    /// `exp(z)`.
    pub fn exp(&self) -> Self {
        let r = self.re.exp();
        Self::new(r * self.im.cos(), r * self.im.sin())
    }

    /// Is this value finite (no NaN/Inf in either component)?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl Default for Complex {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{}+{}i", self.re, self.im)
        } else {
            write!(f, "{}{}i", self.re, self.im)
        }
    }
}

impl Add for Complex {
    type Output = Complex;
    #[inline]
    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;
    #[inline]
    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Neg for Complex {
    type Output = Complex;
    #[inline]
    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl Mul for Complex {
    type Output = Complex;
    #[inline]
    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;
    #[inline]
    fn mul(self, rhs: f64) -> Complex {
        Complex::new(self.re * rhs, self.im * rhs)
    }
}

impl Mul<Complex> for f64 {
    type Output = Complex;
    #[inline]
    fn mul(self, rhs: Complex) -> Complex {
        rhs * self
    }
}

impl Div for Complex {
    type Output = Complex;
    #[inline]
    fn div(self, rhs: Complex) -> Complex {
        let d = rhs.norm_sqr();
        Complex::new(
            (self.re * rhs.re + self.im * rhs.im) / d,
            (self.im * rhs.re - self.re * rhs.im) / d,
        )
    }
}

impl Div<f64> for Complex {
    type Output = Complex;
    #[inline]
    fn div(self, rhs: f64) -> Complex {
        Complex::new(self.re / rhs, self.im / rhs)
    }
}

impl From<f64> for Complex {
    #[inline]
    fn from(re: f64) -> Self {
        Self::real(re)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_of_negative_real_is_positive_imaginary() {
        let z = Complex::new(-4.0, 0.0).sqrt();
        assert!(z.re.abs() < 1e-12);
        assert!(z.im > 0.0);
        assert!((z.im - 2.0).abs() < 1e-12);
    }

    #[test]
    fn sqrt_branch_has_nonnegative_real_part() {
        for (re, im) in [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0), (0.0, -1.0)] {
            let z = Complex::new(re, im).sqrt();
            assert!(z.re >= -1e-15, "re={} im={} -> sqrt.re={}", re, im, z.re);
        }
    }

    #[test]
    fn division_round_trips_multiplication() {
        let a = Complex::new(2.0, 3.0);
        let b = Complex::new(1.0, -1.0);
        let q = a / b;
        let back = q * b;
        assert!((back.re - a.re).abs() < 1e-12);
        assert!((back.im - a.im).abs() < 1e-12);
    }

    #[test]
    fn conj_and_norm() {
        let a = Complex::new(3.0, 4.0);
        assert!((a.norm() - 5.0).abs() < 1e-12);
        assert_eq!(a.conj(), Complex::new(3.0, -4.0));
    }
}
