//! Natural cubic spline resampling.
//!
//! Used to put a filter's computed spectrum and an [`crate::Illuminant`]'s
//! spectral power distribution onto an [`crate::Observer`]'s wavelength
//! grid before the discrete-sum XYZ integration. This is a
//! deliberately different interpolant from [`thinfilm_core::Pchip`]: a
//! natural cubic spline has continuous second derivatives and can
//! overshoot between knots, which is the opposite trade-off from PCHIP's
//! monotone, shape-preserving behavior. Using PCHIP here (or this spline
//! for the graded-index discretizer) would be a correctness bug, not a
//! style choice.

use thinfilm_core::Error;

/// A natural cubic spline through a set of knots, with zero second
/// derivative (natural boundary condition) at both endpoints.
#[derive(Debug, Clone)]
pub struct NaturalCubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivatives at each knot, solved once at construction time.
    m: Vec<f64>,
}

impl NaturalCubicSpline {
    /// Builds a natural cubic spline through `(x, y)` knot pairs. `x` must
    /// be strictly increasing and have at least two points.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != y.len()`, `x.len() < 2`, or `x` is not
    /// strictly increasing.
    #[must_use]
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have equal length");
        assert!(x.len() >= 2, "spline needs at least two knots");
        for w in x.windows(2) {
            assert!(w[1] > w[0], "x must be strictly increasing");
        }
        let m = second_derivatives(&x, &y);
        Self { x, y, m }
    }

    /// The spline's knot abscissae.
    #[must_use]
    pub fn knots_x(&self) -> &[f64] {
        &self.x
    }

    /// Evaluates the spline at `x0`, extrapolating linearly from the
    /// nearest endpoint's tangent if `x0` falls outside the knot range.
    #[must_use]
    pub fn evaluate(&self, x0: f64) -> f64 {
        let n = self.x.len();
        if x0 < self.x[0] {
            let slope = self.segment_slope(0) - self.m[0] * (self.x[1] - self.x[0]) / 6.0;
            return self.y[0] + slope * (x0 - self.x[0]);
        }
        if x0 > self.x[n - 1] {
            let slope = self.segment_slope(n - 2) + self.m[n - 1] * (self.x[n - 1] - self.x[n - 2]) / 6.0;
            return self.y[n - 1] + slope * (x0 - self.x[n - 1]);
        }
        let i = self.bracket(x0);
        self.evaluate_segment(i, x0)
    }

    /// Resamples `(xs, ys)` onto `target_x`, returning `Err` if `xs`/`ys`
    /// don't form a valid spline (see [`NaturalCubicSpline::new`]'s
    /// panics, converted here into an [`Error::Parse`] since resampling is
    /// typically called with externally-sourced spectral data).
    pub fn resample(xs: &[f64], ys: &[f64], target_x: &[f64]) -> Result<Vec<f64>, Error> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return Err(Error::Parse { message: "spectrum needs at least two points with matching lengths".into() });
        }
        for w in xs.windows(2) {
            if w[1] <= w[0] {
                return Err(Error::Parse { message: "spectrum wavelengths must be strictly increasing".into() });
            }
        }
        let spline = NaturalCubicSpline::new(xs.to_vec(), ys.to_vec());
        Ok(target_x.iter().map(|&x| spline.evaluate(x)).collect())
    }

    fn segment_slope(&self, i: usize) -> f64 {
        (self.y[i + 1] - self.y[i]) / (self.x[i + 1] - self.x[i])
    }

    fn bracket(&self, x0: f64) -> usize {
        match self.x.binary_search_by(|probe| probe.partial_cmp(&x0).unwrap()) {
            Ok(i) => i.min(self.x.len() - 2),
            Err(0) => 0,
            Err(i) if i >= self.x.len() => self.x.len() - 2,
            Err(i) => i - 1,
        }
    }

    fn evaluate_segment(&self, i: usize, x0: f64) -> f64 {
        let h = self.x[i + 1] - self.x[i];
        let a = (self.x[i + 1] - x0) / h;
        let b = (x0 - self.x[i]) / h;
        a * self.y[i]
            + b * self.y[i + 1]
            + ((a.powi(3) - a) * self.m[i] + (b.powi(3) - b) * self.m[i + 1]) * (h * h) / 6.0
    }
}

/// Solves the tridiagonal system for natural-boundary second derivatives
/// via the standard Thomas-algorithm forward sweep / back substitution.
fn second_derivatives(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];
    // Natural boundary: m[0] = m[n-1] = 0.
    for i in 1..n - 1 {
        let h_im1 = x[i] - x[i - 1];
        let h_i = x[i + 1] - x[i];
        let a = h_im1;
        let b = 2.0 * (h_im1 + h_i);
        let c = h_i;
        let d = 6.0
            * ((y[i + 1] - y[i]) / h_i - (y[i] - y[i - 1]) / h_im1);
        let denom = b - a * c_prime[i - 1];
        c_prime[i] = c / denom;
        d_prime[i] = (d - a * d_prime[i - 1]) / denom;
    }
    let mut m = vec![0.0; n];
    for i in (1..n - 1).rev() {
        m[i] = d_prime[i] - c_prime[i] * m[i + 1];
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_data_is_reproduced_exactly() {
        let spline = NaturalCubicSpline::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 2.0, 4.0, 6.0]);
        for x in [0.0, 0.5, 1.5, 2.5, 3.0] {
            assert_relative_eq!(spline.evaluate(x), 2.0 * x, epsilon = 1e-9);
        }
    }

    #[test]
    fn passes_through_knots() {
        let xs = vec![400.0, 500.0, 600.0, 700.0];
        let ys = vec![0.1, 0.8, 0.3, 0.05];
        let spline = NaturalCubicSpline::new(xs.clone(), ys.clone());
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(spline.evaluate(*x), *y, epsilon = 1e-9);
        }
    }

    #[test]
    fn resample_rejects_non_monotone_input() {
        let err = NaturalCubicSpline::resample(&[1.0, 1.0, 2.0], &[0.0, 1.0, 2.0], &[1.5]);
        assert!(err.is_err());
    }
}
