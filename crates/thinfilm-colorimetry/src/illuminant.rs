//! Standard illuminant spectral power distributions on their own
//! wavelength grid.

use thinfilm_core::WavelengthGrid;

/// A relative spectral power distribution `I(λ)` sampled on its own grid.
/// Loading illuminant tables from an external text format is the caller's
/// concern; this type is what that loader hands the core.
#[derive(Debug, Clone)]
pub struct Illuminant {
    grid: WavelengthGrid,
    power: Vec<f64>,
}

impl Illuminant {
    /// Builds an illuminant from a wavelength grid and matching relative
    /// power values.
    ///
    /// # Panics
    ///
    /// Panics if `grid.len() != power.len()`.
    #[must_use]
    pub fn new(grid: WavelengthGrid, power: Vec<f64>) -> Self {
        assert_eq!(grid.len(), power.len(), "power length must match grid");
        Self { grid, power }
    }

    /// The illuminant's native wavelength grid, in nanometers.
    #[must_use]
    pub fn grid(&self) -> &WavelengthGrid {
        &self.grid
    }

    /// Relative spectral power, aligned with [`Illuminant::grid`].
    #[must_use]
    pub fn power(&self) -> &[f64] {
        &self.power
    }

    /// CIE standard illuminant D65 (average daylight), tabulated every
    /// 10 nm from 380 nm to 780 nm, relative to 100 at 560 nm.
    #[must_use]
    pub fn d65() -> Self {
        let grid = WavelengthGrid::linspace(380.0, 780.0, D65_POWER.len());
        Self::new(grid, D65_POWER.to_vec())
    }

    /// CIE standard illuminant A (incandescent tungsten, ~2856 K),
    /// tabulated every 10 nm from 380 nm to 780 nm, relative to 100 at
    /// 560 nm.
    #[must_use]
    pub fn a() -> Self {
        let grid = WavelengthGrid::linspace(380.0, 780.0, ILLUMINANT_A_POWER.len());
        Self::new(grid, ILLUMINANT_A_POWER.to_vec())
    }
}

#[rustfmt::skip]
const D65_POWER: [f64; 41] = [
    49.98,  54.65,  82.75,  91.49,  93.43,  86.68, 104.87, 117.01, 117.81, 114.86,
   115.92, 108.81, 109.35, 107.80, 104.79, 107.69, 104.41, 104.05, 100.00,  96.33,
    95.79,  88.69,  90.01,  89.60,  87.70,  83.29,  83.70,  80.03,  80.21,  82.28,
    78.28,  69.72,  71.61,  74.35,  61.60,  69.89,  75.09,  63.59,  46.42,  66.81,
    63.38,
];

// Planckian-locus values for a 2856 K blackbody, relative to 100 at 560 nm
// (CIE standard illuminant A).
#[rustfmt::skip]
const ILLUMINANT_A_POWER: [f64; 41] = [
     9.80,  12.09,  14.71,  17.68,  20.99,  24.67,  28.70,  33.09,  37.81,  42.87,
    48.24,  53.91,  59.86,  66.06,  72.50,  79.13,  85.95,  92.91, 100.00, 107.18,
   114.44, 121.73, 129.04, 136.35, 143.62, 150.84, 157.98, 165.03, 171.96, 178.77,
   185.43, 191.93, 198.26, 204.41, 210.36, 216.12, 221.67, 227.00, 232.12, 237.01,
   241.68,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn d65_grid_spans_visible_range() {
        let illuminant = Illuminant::d65();
        assert_eq!(illuminant.grid().len(), 41);
        assert!((illuminant.grid().values()[0] - 380.0).abs() < 1e-9);
        assert!((illuminant.grid().values()[40] - 780.0).abs() < 1e-9);
    }

    #[test]
    fn d65_is_normalized_near_560nm() {
        let illuminant = Illuminant::d65();
        let i = illuminant.grid().nearest_index(560.0);
        assert!((illuminant.power()[i] - 100.0).abs() < 1.0);
    }

    #[test]
    #[should_panic(expected = "power length must match grid")]
    fn mismatched_lengths_panic() {
        let grid = WavelengthGrid::linspace(400.0, 700.0, 4);
        Illuminant::new(grid, vec![1.0; 3]);
    }
}
