//! # Dispersion models
//!
//! Wavelength-dependent complex refractive index `N(lambda) = n - i*k`.
//!
//! Four tagged variants hold the dispersion forms behind a single sum
//! type rather than dynamic trait dispatch, while still exposing one
//! capability trait for the engine to call into.
//!
//! ## References
//!
//! - Cauchy (1836): "Memoire sur la dispersion de la lumiere".
//! - Born & Wolf (1999): "Principles of Optics", Chapter 2.

use thinfilm_core::{Complex, Pchip};

/// Capability set a dispersion (or, via [`crate::mixture::Mixture`], a
/// mixture evaluated at a fixed composition) exposes to the engine:
/// `index_at`, `dindex_dlambda_at`, `index_range`.
pub trait Index {
    /// Complex refractive index at `lambda_nm`.
    fn index_at(&self, lambda_nm: f64) -> Complex;

    /// `dN/dlambda` at `lambda_nm`, in 1/nm.
    fn dindex_dlambda_at(&self, lambda_nm: f64) -> Complex;

    /// The supported real-index range `(n_min, n_max)`, used by the
    /// discretizer's step ladder.
    fn index_range(&self) -> (f64, f64);
}

/// A material's dispersion model.
#[derive(Debug, Clone)]
pub enum Dispersion {
    /// One complex `N`, identical at every wavelength.
    Constant(Complex),
    /// Tabulated `(lambda_j, n_j, k_j)`, interpolated by monotone PCHIP in
    /// `n` and in `k` separately, extrapolation allowed past the table's
    /// endpoints.
    Table(TableDispersion),
    /// `n(lambda) = A + B/lambda^2 + C/lambda^4` (lambda in micrometers),
    /// with an exponential absorption edge for `k`.
    Cauchy(CauchyParams),
    /// `n(lambda)^2 - 1 = sum_i B_i*lambda^2/(lambda^2 - C_i)` (lambda in
    /// micrometers), with the same exponential absorption edge for `k`.
    Sellmeier(SellmeierParams),
}

/// Tabulated dispersion, PCHIP-interpolated in wavelength.
#[derive(Debug, Clone)]
pub struct TableDispersion {
    n: Pchip,
    k: Pchip,
}

impl TableDispersion {
    /// Build from paired `(lambda_nm, n, k)` samples. `k` is the
    /// conventional non-negative extinction coefficient; `Im(N) = -k`.
    pub fn new(lambda_nm: Vec<f64>, n: Vec<f64>, k: Vec<f64>) -> Self {
        Self {
            n: Pchip::new(lambda_nm.clone(), n),
            k: Pchip::new(lambda_nm, k),
        }
    }
}

/// Cauchy dispersion parameters.
#[derive(Debug, Clone, Copy)]
pub struct CauchyParams {
    /// `A` coefficient (dimensionless).
    pub a: f64,
    /// `B` coefficient, um^2.
    pub b: f64,
    /// `C` coefficient, um^4.
    pub c: f64,
    /// Absorption-edge amplitude.
    pub a_k: f64,
    /// Absorption-edge exponent.
    pub exponent: f64,
    /// Absorption-edge wavelength, um.
    pub edge: f64,
}

/// Sellmeier dispersion parameters.
#[derive(Debug, Clone, Copy)]
pub struct SellmeierParams {
    /// `(B1, C1, B2, C2, B3, C3)` Sellmeier coefficients; `C_i` in um^2.
    pub b: [f64; 3],
    /// `C_i`, um^2.
    pub c: [f64; 3],
    /// Absorption-edge amplitude.
    pub a_k: f64,
    /// Absorption-edge exponent.
    pub exponent: f64,
    /// Absorption-edge wavelength, um.
    pub edge: f64,
}

fn absorption_k(lambda_um: f64, a_k: f64, exponent: f64, edge: f64) -> f64 {
    // k(lambda) = -A_k * exp(12400*exponent*(1/(1e4*lambda) - 1/edge)).
    // Already negative (loss carried as negative Im throughout).
    -a_k * (12400.0 * exponent * (1.0 / (1e4 * lambda_um) - 1.0 / edge)).exp()
}

fn dabsorption_k_dlambda_um(lambda_um: f64, a_k: f64, exponent: f64, edge: f64) -> f64 {
    let k = absorption_k(lambda_um, a_k, exponent, edge);
    // d/dlambda of the exponent's argument: -12400*exponent/(1e4*lambda^2)
    let dexp = -12400.0 * exponent / (1e4 * lambda_um * lambda_um);
    k * dexp
}

impl Index for Dispersion {
    fn index_at(&self, lambda_nm: f64) -> Complex {
        match self {
            Dispersion::Constant(n) => *n,
            Dispersion::Table(t) => {
                let n = t.n.evaluate(lambda_nm, None);
                let k = t.k.evaluate(lambda_nm, None);
                Complex::new(n, -k)
            }
            Dispersion::Cauchy(p) => {
                let l = lambda_nm / 1000.0;
                let n = p.a + p.b / (l * l) + p.c / (l * l * l * l);
                let k = absorption_k(l, p.a_k, p.exponent, p.edge);
                Complex::new(n, k)
            }
            Dispersion::Sellmeier(p) => {
                let l = lambda_nm / 1000.0;
                let l2 = l * l;
                let mut n2m1 = 0.0;
                for i in 0..3 {
                    n2m1 += p.b[i] * l2 / (l2 - p.c[i]);
                }
                let n = (1.0 + n2m1).max(0.0).sqrt();
                let k = absorption_k(l, p.a_k, p.exponent, p.edge);
                Complex::new(n, k)
            }
        }
    }

    fn dindex_dlambda_at(&self, lambda_nm: f64) -> Complex {
        match self {
            Dispersion::Constant(_) => Complex::ZERO,
            Dispersion::Table(t) => {
                let dn = t.n.evaluate_derivative(lambda_nm, None);
                let dk = t.k.evaluate_derivative(lambda_nm, None);
                Complex::new(dn, -dk)
            }
            Dispersion::Cauchy(p) => {
                let l = lambda_nm / 1000.0;
                // dn/dl (per um), chain rule to per-nm: divide by 1000.
                let dn_dl = -2.0 * p.b / (l * l * l) - 4.0 * p.c / (l * l * l * l * l);
                let dn_dlambda_nm = dn_dl / 1000.0;
                let dk_dl = dabsorption_k_dlambda_um(l, p.a_k, p.exponent, p.edge);
                let dk_dlambda_nm = dk_dl / 1000.0;
                Complex::new(dn_dlambda_nm, dk_dlambda_nm)
            }
            Dispersion::Sellmeier(p) => {
                let l = lambda_nm / 1000.0;
                let l2 = l * l;
                let mut n2m1 = 0.0;
                let mut dn2_dl = 0.0;
                for i in 0..3 {
                    let denom = l2 - p.c[i];
                    n2m1 += p.b[i] * l2 / denom;
                    // d/dl [ l^2/(l^2-C) ] = -2*l*C / (l^2-C)^2
                    dn2_dl += p.b[i] * (-2.0 * l * p.c[i]) / (denom * denom);
                }
                let n = (1.0 + n2m1).max(1e-12).sqrt();
                let dn_dl = dn2_dl / (2.0 * n);
                let dn_dlambda_nm = dn_dl / 1000.0;
                let dk_dl = dabsorption_k_dlambda_um(l, p.a_k, p.exponent, p.edge);
                Complex::new(dn_dlambda_nm, dk_dl / 1000.0)
            }
        }
    }

    fn index_range(&self) -> (f64, f64) {
        match self {
            Dispersion::Constant(n) => (n.re, n.re),
            Dispersion::Table(t) => {
                let ys = t.n.knots_y();
                let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
                for &y in ys {
                    lo = lo.min(y);
                    hi = hi.max(y);
                }
                (lo, hi)
            }
            Dispersion::Cauchy(_) | Dispersion::Sellmeier(_) => {
                // Scan the conventional visible-to-near-IR domain; analytic
                // forms are monotone in this range for physically sensible
                // parameters, so sampling the endpoints plus midpoint is
                // sufficient to bound the range.
                let mut lo = f64::INFINITY;
                let mut hi = f64::NEG_INFINITY;
                for i in 0..=32 {
                    let lambda = 300.0 + (2000.0 - 300.0) * (i as f64 / 32.0);
                    let n = self.index_at(lambda).re;
                    lo = lo.min(n);
                    hi = hi.max(n);
                }
                (lo, hi)
            }
        }
    }
}
