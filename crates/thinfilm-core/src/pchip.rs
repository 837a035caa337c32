//! Monotone cubic Hermite interpolation (PCHIP).
//!
//! Used both across the mixing coordinate of material mixtures and for
//! table dispersions across wavelength. The colorimetry crate's spectrum
//! resampler is a separate, unrelated natural-cubic-spline implementation.

use crate::error::{Error, Result};

/// Square root of machine epsilon, the tolerance used by the out-of-range
/// clamp. Kept as a fixed constant rather than a runtime knob.
pub const EPSILON_SQRT: f64 = 1.4901161193847656e-8; // f64::EPSILON.sqrt()

/// A piecewise cubic Hermite interpolant over strictly increasing knots.
#[derive(Debug, Clone)]
pub struct Pchip {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Tangent (dy/dx) at each knot.
    m: Vec<f64>,
}

impl Pchip {
    /// Build a monotonicity-preserving PCHIP over `(x, y)`, requiring `x`
    /// strictly increasing. Degenerates to linear interpolation for
    /// two-knot input.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(x.len(), y.len(), "PCHIP knot arrays must have equal length");
        assert!(x.len() >= 2, "PCHIP needs at least two knots");
        for w in x.windows(2) {
            assert!(w[0] < w[1], "PCHIP knots must be strictly increasing");
        }
        let m = hyman_tangents(&x, &y);
        Self { x, y, m }
    }

    /// Knot x-values.
    pub fn knots_x(&self) -> &[f64] {
        &self.x
    }

    /// Knot y-values.
    pub fn knots_y(&self) -> &[f64] {
        &self.y
    }

    fn bracket(&self, x: f64, hint: Option<usize>) -> usize {
        let n = self.x.len();
        if let Some(h) = hint {
            if h + 1 < n && self.x[h] <= x && x <= self.x[h + 1] {
                return h;
            }
        }
        if x <= self.x[0] {
            return 0;
        }
        if x >= self.x[n - 1] {
            return n - 2;
        }
        match self
            .x
            .binary_search_by(|v| v.partial_cmp(&x).unwrap())
        {
            Ok(i) => i.min(n - 2),
            Err(i) => (i - 1).min(n - 2),
        }
    }

    /// Evaluate the interpolant at `x`, extrapolating linearly from the
    /// boundary cubic beyond the knot range. `hint` optionally skips the
    /// bracketing search when the caller knows the interval index already.
    pub fn evaluate(&self, x: f64, hint: Option<usize>) -> f64 {
        let i = self.bracket(x, hint);
        hermite_value(self.x[i], self.x[i + 1], self.y[i], self.y[i + 1], self.m[i], self.m[i + 1], x)
    }

    /// Evaluate the first derivative at `x`.
    pub fn evaluate_derivative(&self, x: f64, hint: Option<usize>) -> f64 {
        let i = self.bracket(x, hint);
        hermite_deriv(self.x[i], self.x[i + 1], self.y[i], self.y[i + 1], self.m[i], self.m[i + 1], x)
    }

    /// Invert the interpolant: find `x` such that `evaluate(x) == y`,
    /// assuming `y` is strictly monotone on the bracketing interval.
    /// Uses Newton's method with bisection fallback, converging when the
    /// bracket width is within `(lo+hi)*eps`.
    pub fn evaluate_inverse(&self, target_y: f64, hint: Option<usize>) -> Result<f64> {
        let n = self.x.len();
        // Locate the bracketing interval by y-value monotonic search.
        let interval = hint.unwrap_or_else(|| self.locate_y_interval(target_y));
        let (mut lo, mut hi) = (self.x[interval], self.x[interval.min(n - 2) + 1]);
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        let f = |x: f64| self.evaluate(x, Some(interval)) - target_y;
        let fp = |x: f64| self.evaluate_derivative(x, Some(interval));

        let (mut flo, mut fhi) = (f(lo), f(hi));
        if flo == 0.0 {
            return Ok(lo);
        }
        if fhi == 0.0 {
            return Ok(hi);
        }
        if flo.signum() == fhi.signum() {
            // Monotone assumption violated on this bracket; clamp within tolerance.
            if (target_y - self.y[0]).abs() <= EPSILON_SQRT * self.y[0].abs().max(1.0) {
                return Ok(self.x[0]);
            }
            if (target_y - self.y[n - 1]).abs() <= EPSILON_SQRT * self.y[n - 1].abs().max(1.0) {
                return Ok(self.x[n - 1]);
            }
            return Err(Error::NotMonotone { wavelength_nm: f64::NAN });
        }

        let mut guess = 0.5 * (lo + hi);
        for _ in 0..64 {
            if (hi - lo).abs() <= (lo.abs() + hi.abs()) * f64::EPSILON.max(1e-14) {
                break;
            }
            let fg = f(guess);
            let slope = fp(guess);
            let newton = if slope.abs() > 1e-300 { guess - fg / slope } else { f64::NAN };
            let next = if newton.is_finite() && newton > lo && newton < hi {
                newton
            } else {
                0.5 * (lo + hi)
            };
            let fnext = f(next);
            if fnext == 0.0 {
                return Ok(next);
            }
            if fnext.signum() == flo.signum() {
                lo = next;
                flo = fnext;
            } else {
                hi = next;
                fhi = fnext;
            }
            guess = next;
        }
        Ok(guess)
    }

    fn locate_y_interval(&self, target_y: f64) -> usize {
        let n = self.y.len();
        // y is not necessarily stored sorted in x order matching value order
        // unless the caller guarantees monotonicity, which inverse callers do.
        let ascending = self.y[n - 1] >= self.y[0];
        for i in 0..n - 1 {
            let (a, b) = (self.y[i], self.y[i + 1]);
            let within = if ascending { target_y >= a && target_y <= b } else { target_y <= a && target_y >= b };
            if within {
                return i;
            }
        }
        if (target_y - self.y[0]).abs() < (target_y - self.y[n - 1]).abs() {
            0
        } else {
            n - 2
        }
    }
}

/// Hyman-limited tangents: standard centered/one-sided finite differences,
/// clamped so each cubic piece stays monotone on its interval. Endpoints
/// use the parabolic (non-centered) approximation.
fn hyman_tangents(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    if n == 2 {
        let d = (y[1] - y[0]) / (x[1] - x[0]);
        return vec![d, d];
    }
    let h: Vec<f64> = (0..n - 1).map(|i| x[i + 1] - x[i]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    let mut m = vec![0.0; n];
    // Endpoints: one-sided three-point (parabolic) estimate.
    m[0] = ((2.0 * h[0] + h[1]) * delta[0] - h[0] * delta[1]) / (h[0] + h[1]);
    m[n - 1] = ((2.0 * h[n - 2] + h[n - 3]) * delta[n - 2] - h[n - 2] * delta[n - 3])
        / (h[n - 2] + h[n - 3]);

    for i in 1..n - 1 {
        let (d0, d1) = (delta[i - 1], delta[i]);
        m[i] = if d0 * d1 <= 0.0 {
            0.0
        } else {
            let w1 = 2.0 * h[i] + h[i - 1];
            let w2 = h[i] + 2.0 * h[i - 1];
            (w1 + w2) / (w1 / d0 + w2 / d1)
        };
    }

    // Clamp endpoint tangents so the end cubic stays monotone too.
    clamp_endpoint(&mut m[0], delta[0]);
    clamp_endpoint(&mut m[n - 1], delta[n - 2]);

    for i in 0..n - 1 {
        if delta[i] == 0.0 {
            m[i] = 0.0;
            m[i + 1] = 0.0;
            continue;
        }
        let alpha = m[i] / delta[i];
        let beta = m[i + 1] / delta[i];
        if alpha < 0.0 {
            m[i] = 0.0;
        }
        if beta < 0.0 {
            m[i + 1] = 0.0;
        }
        let alpha = m[i] / delta[i];
        let beta = m[i + 1] / delta[i];
        let tau = alpha.hypot(beta);
        if tau > 3.0 {
            let scale = 3.0 / tau;
            m[i] = scale * alpha * delta[i];
            m[i + 1] = scale * beta * delta[i];
        }
    }
    m
}

fn clamp_endpoint(mi: &mut f64, delta_adjacent: f64) {
    if *mi * delta_adjacent <= 0.0 {
        *mi = 0.0;
    } else if (*mi / delta_adjacent).abs() > 3.0 {
        *mi = 3.0 * delta_adjacent;
    }
}

fn hermite_basis(t: f64) -> (f64, f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    (h00, h10, h01, h11)
}

#[allow(clippy::too_many_arguments)]
fn hermite_value(x0: f64, x1: f64, y0: f64, y1: f64, m0: f64, m1: f64, x: f64) -> f64 {
    let h = x1 - x0;
    let t = (x - x0) / h;
    let (h00, h10, h01, h11) = hermite_basis(t);
    h00 * y0 + h10 * h * m0 + h01 * y1 + h11 * h * m1
}

#[allow(clippy::too_many_arguments)]
fn hermite_deriv(x0: f64, x1: f64, y0: f64, y1: f64, m0: f64, m1: f64, x: f64) -> f64 {
    let h = x1 - x0;
    let t = (x - x0) / h;
    let t2 = t * t;
    let dh00 = 6.0 * t2 - 6.0 * t;
    let dh10 = 3.0 * t2 - 4.0 * t + 1.0;
    let dh01 = -6.0 * t2 + 6.0 * t;
    let dh11 = 3.0 * t2 - 2.0 * t;
    (dh00 * y0 + dh10 * h * m0 + dh01 * y1 + dh11 * h * m1) / h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_knot_is_linear() {
        let p = Pchip::new(vec![0.0, 1.0], vec![0.0, 2.0]);
        assert!((p.evaluate(0.5, None) - 1.0).abs() < 1e-12);
        assert!((p.evaluate_derivative(0.25, None) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn monotone_input_gives_monotone_output() {
        let x: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let y = vec![1.0, 1.1, 1.3, 1.9, 2.0, 2.05, 2.9, 3.0];
        let p = Pchip::new(x.clone(), y);
        for w in x.windows(2) {
            let mut prev = p.evaluate(w[0], None);
            for k in 1..=100 {
                let xx = w[0] + (w[1] - w[0]) * (k as f64 / 100.0);
                let v = p.evaluate(xx, None);
                assert!(v + 1e-10 >= prev, "non-monotone at {xx}: {v} < {prev}");
                prev = v;
            }
        }
    }

    #[test]
    fn inverse_round_trips() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![1.38, 1.7, 2.05, 2.35];
        let p = Pchip::new(x, y);
        for &target in &[1.5, 1.9, 2.2] {
            let x_found = p.evaluate_inverse(target, None).unwrap();
            let y_back = p.evaluate(x_found, None);
            assert!((y_back - target).abs() < 1e-9, "target={target} got={y_back}");
        }
    }

    #[test]
    fn passes_through_knots() {
        let x = vec![0.0, 1.0, 2.5, 4.0];
        let y = vec![1.0, 2.0, 1.5, 3.0];
        let p = Pchip::new(x.clone(), y.clone());
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert!((p.evaluate(*xi, None) - yi).abs() < 1e-9);
        }
    }
}
