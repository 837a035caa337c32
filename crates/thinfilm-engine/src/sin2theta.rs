//! Snell invariant propagator.
//!
//! `(N0*sin(theta0))^2` is conserved across every interface in the stack;
//! each sublayer recovers its own `cos(theta)`-equivalent quantity
//! (`N_i,z`) from this invariant without re-deriving angles.

use thinfilm_core::Complex;

/// The per-wavelength Snell invariant `(N0 * sin(theta0))^2`, and
/// optionally its wavelength derivative (needed by the characteristic
/// matrix's derivative recursion).
#[derive(Debug, Clone)]
pub struct Sin2Theta {
    /// One invariant value per wavelength in the filter's grid.
    pub invariant: Vec<Complex>,
    /// `d(invariant)/dlambda`, present iff requested at construction.
    dinvariant: Option<Vec<Complex>>,
}

impl Sin2Theta {
    /// Compute the invariant from the entry-medium index array `n0` and
    /// the (real) incidence angle `theta0_rad`.
    pub fn new(n0: &[Complex], theta0_rad: f64) -> Self {
        let s = theta0_rad.sin();
        let s2 = s * s;
        let invariant = n0.iter().map(|n| (*n * *n) * s2).collect();
        Self { invariant, dinvariant: None }
    }

    /// Like [`Sin2Theta::new`], also precomputing `d(invariant)/dlambda`
    /// from `dn0/dlambda` for callers that need the derivative recursion.
    pub fn with_derivative(n0: &[Complex], dn0: &[Complex], theta0_rad: f64) -> Self {
        let mut s = Self::new(n0, theta0_rad);
        let s2 = theta0_rad.sin().powi(2);
        let two = Complex::new(2.0, 0.0);
        s.dinvariant = Some(
            n0.iter()
                .zip(dn0.iter())
                .map(|(n, dn)| two * *n * *dn * s2)
                .collect(),
        );
        s
    }

    /// `N_i,z` at wavelength index `w` for a sublayer of index `n_i`:
    /// the principal-branch square root of `N_i^2 - invariant`, with the
    /// branch selected so `Re >= 0` (and `Im >= 0` when `Re == 0`).
    #[inline]
    pub fn n_z(&self, w: usize, n_i: Complex) -> Complex {
        (n_i * n_i - self.invariant[w]).sqrt()
    }

    /// `d(invariant)/dlambda` at wavelength index `w`. Zero if this
    /// instance was built without derivative support.
    #[inline]
    pub fn dinvariant(&self, w: usize) -> Complex {
        self.dinvariant.as_ref().map(|d| d[w]).unwrap_or(Complex::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_incidence_invariant_is_zero() {
        let n0 = vec![Complex::real(1.0); 3];
        let inv = Sin2Theta::new(&n0, 0.0);
        for v in &inv.invariant {
            assert!(v.norm() < 1e-15);
        }
    }

    #[test]
    fn n_z_at_normal_incidence_is_n_itself() {
        let n0 = vec![Complex::real(1.0)];
        let inv = Sin2Theta::new(&n0, 0.0);
        let nz = inv.n_z(0, Complex::real(2.35));
        assert!((nz.re - 2.35).abs() < 1e-12);
        assert!(nz.im.abs() < 1e-12);
    }
}
