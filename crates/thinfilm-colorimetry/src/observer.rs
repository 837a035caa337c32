//! Standard colorimetric observers: the `x̄(λ), ȳ(λ), z̄(λ)` color-matching
//! functions on their own wavelength grid.

use thinfilm_core::WavelengthGrid;

/// A tristimulus color-matching-function triple sampled on its own grid.
/// Loading observer tables from an external text format is the caller's
/// concern; this type is what that loader hands the core.
#[derive(Debug, Clone)]
pub struct Observer {
    grid: WavelengthGrid,
    x_bar: Vec<f64>,
    y_bar: Vec<f64>,
    z_bar: Vec<f64>,
}

impl Observer {
    /// Builds an observer from a wavelength grid and matching three-valued
    /// tables. All four slices must have equal length.
    ///
    /// # Panics
    ///
    /// Panics if the lengths disagree.
    #[must_use]
    pub fn new(grid: WavelengthGrid, x_bar: Vec<f64>, y_bar: Vec<f64>, z_bar: Vec<f64>) -> Self {
        assert_eq!(grid.len(), x_bar.len(), "x_bar length must match grid");
        assert_eq!(grid.len(), y_bar.len(), "y_bar length must match grid");
        assert_eq!(grid.len(), z_bar.len(), "z_bar length must match grid");
        Self { grid, x_bar, y_bar, z_bar }
    }

    /// The observer's native wavelength grid, in nanometers.
    #[must_use]
    pub fn grid(&self) -> &WavelengthGrid {
        &self.grid
    }

    /// `x̄(λ)` color-matching values, aligned with [`Observer::grid`].
    #[must_use]
    pub fn x_bar(&self) -> &[f64] {
        &self.x_bar
    }

    /// `ȳ(λ)` color-matching values, aligned with [`Observer::grid`].
    #[must_use]
    pub fn y_bar(&self) -> &[f64] {
        &self.y_bar
    }

    /// `z̄(λ)` color-matching values, aligned with [`Observer::grid`].
    #[must_use]
    pub fn z_bar(&self) -> &[f64] {
        &self.z_bar
    }

    /// The CIE 1931 2-degree standard observer, tabulated every 10 nm from
    /// 380 nm to 780 nm.
    #[must_use]
    pub fn cie_1931_2deg() -> Self {
        let grid = WavelengthGrid::linspace(380.0, 780.0, CIE_1931_2DEG_X.len());
        Self::new(grid, CIE_1931_2DEG_X.to_vec(), CIE_1931_2DEG_Y.to_vec(), CIE_1931_2DEG_Z.to_vec())
    }
}

#[rustfmt::skip]
const CIE_1931_2DEG_X: [f64; 41] = [
    0.0014, 0.0042, 0.0143, 0.0435, 0.1344, 0.2839, 0.3483, 0.3362, 0.2908, 0.1954,
    0.0956, 0.0320, 0.0049, 0.0093, 0.0633, 0.1655, 0.2904, 0.4334, 0.5945, 0.7621,
    0.9163, 1.0263, 1.0622, 1.0026, 0.8544, 0.6424, 0.4479, 0.2835, 0.1649, 0.0874,
    0.0468, 0.0227, 0.0114, 0.0058, 0.0029, 0.0014, 0.0007, 0.0003, 0.0002, 0.0001,
    0.0000,
];

#[rustfmt::skip]
const CIE_1931_2DEG_Y: [f64; 41] = [
    0.0000, 0.0001, 0.0004, 0.0012, 0.0040, 0.0116, 0.0230, 0.0380, 0.0600, 0.0910,
    0.1390, 0.2080, 0.3230, 0.5030, 0.7100, 0.8620, 0.9540, 0.9950, 0.9950, 0.9520,
    0.8700, 0.7570, 0.6310, 0.5030, 0.3810, 0.2650, 0.1750, 0.1070, 0.0610, 0.0320,
    0.0170, 0.0082, 0.0041, 0.0021, 0.0010, 0.0005, 0.0002, 0.0001, 0.0001, 0.0000,
    0.0000,
];

#[rustfmt::skip]
const CIE_1931_2DEG_Z: [f64; 41] = [
    0.0065, 0.0201, 0.0679, 0.2074, 0.6456, 1.3856, 1.7471, 1.7721, 1.6692, 1.2876,
    0.8130, 0.4652, 0.2720, 0.1582, 0.0782, 0.0422, 0.0203, 0.0087, 0.0039, 0.0021,
    0.0017, 0.0011, 0.0008, 0.0003, 0.0002, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000,
    0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000,
    0.0000,
];
