//! # Mixtures
//!
//! A material parameterized by a scalar mixing coordinate `x`; dispersion
//! is interpolated across `x` via PCHIP.
//!
//! The cache keeps two explicit slots holding `(lambda, n-over-X PCHIP,
//! k-over-X PCHIP)`, giving an O(1) swap when the caller alternates
//! between two wavelengths. Each worker thread is meant to own its own
//! [`Mixture`] clone; the cache is plain owned state, not behind any
//! synchronization.

use thinfilm_core::{Complex, Error, Pchip, Result};

use crate::dispersion::{Dispersion, Index};

/// One cached `(n, k)`-over-`X` PCHIP pair, tagged by the wavelength it was
/// built at.
#[derive(Debug, Clone)]
struct CacheSlot {
    lambda_nm: f64,
    n_over_x: Pchip,
    k_over_x: Pchip,
}

/// A material whose dispersion is interpolated across a 1-D mixing
/// coordinate `X`.
#[derive(Debug, Clone)]
pub struct Mixture {
    /// Strictly increasing mixing-coordinate samples.
    x: Vec<f64>,
    /// Per-coordinate dispersion, parallel to `x`.
    dispersions: Vec<Dispersion>,
    slots: [Option<CacheSlot>; 2],
    /// Index into `slots` that was most recently written (for LRU-ish
    /// swap-out when a third wavelength appears).
    last_written: usize,
}

impl Mixture {
    /// Build a mixture from a strictly increasing `X` array and one
    /// dispersion model per `X` sample.
    ///
    /// # Panics
    ///
    /// Panics if `x` is not strictly increasing or its length does not
    /// match `dispersions`.
    pub fn new(x: Vec<f64>, dispersions: Vec<Dispersion>) -> Self {
        assert_eq!(x.len(), dispersions.len(), "X and dispersions must have equal length");
        assert!(x.len() >= 2, "mixture needs at least two X samples");
        for w in x.windows(2) {
            assert!(w[0] < w[1], "mixture X coordinate must be strictly increasing");
        }
        Self { x, dispersions, slots: [None, None], last_written: 1 }
    }

    /// The mixing-coordinate samples.
    pub fn x_values(&self) -> &[f64] {
        &self.x
    }

    fn build_slot(&self, lambda_nm: f64) -> CacheSlot {
        let n: Vec<f64> = self.dispersions.iter().map(|d| d.index_at(lambda_nm).re).collect();
        let k: Vec<f64> = self.dispersions.iter().map(|d| -d.index_at(lambda_nm).im).collect();
        CacheSlot {
            lambda_nm,
            n_over_x: Pchip::new(self.x.clone(), n),
            k_over_x: Pchip::new(self.x.clone(), k),
        }
    }

    /// Fetch (building and caching if necessary) the PCHIP pair for
    /// `lambda_nm`, reusing one of the two cache slots when the requested
    /// wavelength matches a remembered one, and otherwise evicting the
    /// least-recently-written slot.
    fn slot_for(&mut self, lambda_nm: f64) -> usize {
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(s) = slot {
                if s.lambda_nm == lambda_nm {
                    return i;
                }
            }
        }
        let victim = 1 - self.last_written;
        self.slots[victim] = Some(self.build_slot(lambda_nm));
        self.last_written = victim;
        victim
    }

    /// Evaluate `N(x, lambda)`.
    pub fn evaluate(&mut self, x: f64, lambda_nm: f64) -> Complex {
        let slot = self.slot_for(lambda_nm);
        let s = self.slots[slot].as_ref().unwrap();
        let n = s.n_over_x.evaluate(x, None);
        let k = s.k_over_x.evaluate(x, None);
        Complex::new(n, -k)
    }

    /// `dN/dx` at `(x, lambda)`, used by the characteristic-matrix
    /// derivative recursion and by outer optimization.
    pub fn dindex_dx(&mut self, x: f64, lambda_nm: f64) -> Complex {
        let slot = self.slot_for(lambda_nm);
        let s = self.slots[slot].as_ref().unwrap();
        let dn = s.n_over_x.evaluate_derivative(x, None);
        let dk = s.k_over_x.evaluate_derivative(x, None);
        Complex::new(dn, -dk)
    }

    /// `dN/dlambda` at `(x, lambda)`, via central finite difference of the
    /// per-X dispersion (the mixture's "per-X dispersion parameters" are
    /// evaluated analytically/PCHIP already; differencing across the two
    /// cached wavelength slots keeps this consistent with the rest of the
    /// engine's wavelength-derivative machinery).
    pub fn dindex_dlambda(&mut self, x: f64, lambda_nm: f64) -> Complex {
        let h = lambda_nm * 1e-6;
        let plus = self.evaluate(x, lambda_nm + h);
        let minus = self.evaluate(x, lambda_nm - h);
        (plus - minus) / (2.0 * h)
    }

    /// Is `n(X, lambda)` strictly increasing at this wavelength? A mixture
    /// is usable at the center wavelength only if this holds there.
    pub fn is_monotone_at(&mut self, lambda_nm: f64) -> bool {
        let slot = self.slot_for(lambda_nm);
        let s = self.slots[slot].as_ref().unwrap();
        let ys = s.n_over_x.knots_y();
        ys.windows(2).all(|w| w[0] < w[1])
    }

    /// Given a desired real index `n` at `lambda_c`, find the mixing
    /// coordinate `x` such that `Re(N(x, lambda_c)) == n`.
    pub fn inverse_at_center(&mut self, n_target: f64, lambda_c_nm: f64) -> Result<f64> {
        if !self.is_monotone_at(lambda_c_nm) {
            return Err(Error::NotMonotone { wavelength_nm: lambda_c_nm });
        }
        let slot = self.slot_for(lambda_c_nm);
        let s = self.slots[slot].as_ref().unwrap();
        let (lo, hi) = (s.n_over_x.knots_y()[0], *s.n_over_x.knots_y().last().unwrap());
        let (min, max) = (lo.min(hi), lo.max(hi));
        let tol = thinfilm_core::pchip::EPSILON_SQRT * max.abs().max(1.0);
        if n_target < min - tol || n_target > max + tol {
            return Err(Error::OutOfRange { requested: n_target, min, max });
        }
        s.n_over_x.evaluate_inverse(n_target, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_mixture() -> Mixture {
        // n(X, 550nm) linear from 1.38 to 2.35 over X in [0, 1].
        let x = vec![0.0, 1.0];
        let d0 = Dispersion::Constant(Complex::real(1.38));
        let d1 = Dispersion::Constant(Complex::real(2.35));
        Mixture::new(x, vec![d0, d1])
    }

    #[test]
    fn inverse_round_trips() {
        let mut m = linear_mixture();
        let x = m.inverse_at_center(1.87, 550.0).unwrap();
        assert!((x - 0.5051).abs() < 1e-3, "x={x}");
        let n_back = m.evaluate(x, 550.0).re;
        assert!((n_back - 1.87).abs() < 1e-9);
    }

    #[test]
    fn slot_cache_swaps_between_two_wavelengths() {
        let mut m = linear_mixture();
        let a = m.evaluate(0.5, 550.0);
        let b = m.evaluate(0.5, 600.0);
        let a2 = m.evaluate(0.5, 550.0);
        assert_eq!(a, a2);
        assert_eq!(b, m.evaluate(0.5, 600.0));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut m = linear_mixture();
        let err = m.inverse_at_center(10.0, 550.0);
        assert!(matches!(err, Err(Error::OutOfRange { .. })));
    }
}
