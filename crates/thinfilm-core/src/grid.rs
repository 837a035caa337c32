//! Wavelength grids, shared by reference and used as a cache key by identity.

use std::sync::Arc;

/// An ordered, strictly increasing sequence of wavelengths (nm) at which
/// every spectral quantity is evaluated.
///
/// Cheap to clone (`Arc` of the backing slice); two grids built from the
/// same construction call compare equal by `Arc::ptr_eq`, which callers use
/// as an O(1) cache key for per-grid workspaces (characteristic-matrix
/// buffers, PCHIP tables) without re-checking the contents.
#[derive(Debug, Clone)]
pub struct WavelengthGrid {
    values: Arc<[f64]>,
}

impl WavelengthGrid {
    /// Build a grid from strictly increasing, positive wavelengths.
    ///
    /// # Panics
    ///
    /// Panics if the input is empty or not strictly increasing, or if any
    /// value is non-positive — these are programmer errors in the
    /// (external) filter builder, not recoverable runtime conditions.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values: Vec<f64> = values.into();
        assert!(!values.is_empty(), "wavelength grid must be non-empty");
        assert!(values[0] > 0.0, "wavelengths must be positive");
        for w in values.windows(2) {
            assert!(w[0] < w[1], "wavelength grid must be strictly increasing");
        }
        Self { values: values.into() }
    }

    /// A uniform grid from `start` to `end` (inclusive) with `count` points.
    pub fn linspace(start: f64, end: f64, count: usize) -> Self {
        assert!(count >= 2, "linspace needs at least 2 points");
        let step = (end - start) / (count - 1) as f64;
        let values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
        Self::new(values)
    }

    /// Number of wavelengths in the grid.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the grid is empty (never true for a constructed grid, but
    /// kept for the standard `is_empty`/`len` pairing clippy expects).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The wavelength values, in nm.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Identity comparison: true iff both grids share the same backing
    /// allocation (i.e. one was cloned from the other).
    #[inline]
    pub fn same_identity(&self, other: &WavelengthGrid) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }

    /// The index closest to `lambda_nm`, for callers that need to locate
    /// the center wavelength within a grid.
    pub fn nearest_index(&self, lambda_nm: f64) -> usize {
        match self
            .values
            .binary_search_by(|v| v.partial_cmp(&lambda_nm).unwrap())
        {
            Ok(i) => i,
            Err(0) => 0,
            Err(i) if i >= self.values.len() => self.values.len() - 1,
            Err(i) => {
                let lo = self.values[i - 1];
                let hi = self.values[i];
                if (lambda_nm - lo).abs() <= (hi - lambda_nm).abs() {
                    i - 1
                } else {
                    i
                }
            }
        }
    }
}

impl std::ops::Index<usize> for WavelengthGrid {
    type Output = f64;
    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_identity() {
        let a = WavelengthGrid::new(vec![400.0, 500.0, 600.0]);
        let b = a.clone();
        assert!(a.same_identity(&b));
    }

    #[test]
    fn distinct_grids_differ_by_identity_even_if_equal_values() {
        let a = WavelengthGrid::new(vec![400.0, 500.0, 600.0]);
        let b = WavelengthGrid::new(vec![400.0, 500.0, 600.0]);
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn linspace_endpoints() {
        let g = WavelengthGrid::linspace(400.0, 700.0, 4);
        assert_eq!(g.len(), 4);
        assert!((g[0] - 400.0).abs() < 1e-9);
        assert!((g[3] - 700.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn rejects_non_increasing() {
        WavelengthGrid::new(vec![400.0, 400.0]);
    }
}
