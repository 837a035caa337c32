//! Discrete-sum XYZ tristimulus integration.

use thinfilm_core::Error;

use crate::illuminant::Illuminant;
use crate::observer::Observer;
use crate::spline::NaturalCubicSpline;

/// A CIE XYZ tristimulus value, `Y` normalized to 100 for the perfect
/// reflecting/transmitting diffuser under the chosen illuminant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xyz {
    /// X tristimulus value.
    pub x: f64,
    /// Y tristimulus value (luminance).
    pub y: f64,
    /// Z tristimulus value.
    pub z: f64,
}

/// Integrates a reflectance or transmittance spectrum `spectrum(λ)`,
/// sampled at `wavelengths_nm`, against `illuminant` and `observer` to
/// produce a CIE XYZ value.
///
/// Both the spectrum and the illuminant are resampled with a natural
/// cubic spline onto the observer's wavelength grid, then combined via
/// the discrete sum
///
/// ```text
/// X = k * Σ I(λ) S(λ) x̄(λ)
/// Y = k * Σ I(λ) S(λ) ȳ(λ)
/// Z = k * Σ I(λ) S(λ) z̄(λ)
/// k = 100 / Σ I(λ) ȳ(λ)
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if `wavelengths_nm`/`spectrum` don't form a
/// resamplable spectrum (fewer than two points, mismatched lengths, or
/// non-increasing wavelengths).
pub fn spectrum_to_xyz(
    wavelengths_nm: &[f64],
    spectrum: &[f64],
    illuminant: &Illuminant,
    observer: &Observer,
) -> Result<Xyz, Error> {
    let grid = observer.grid().values();
    let spectrum_on_grid = NaturalCubicSpline::resample(wavelengths_nm, spectrum, grid)?;
    let illuminant_on_grid =
        NaturalCubicSpline::resample(illuminant.grid().values(), illuminant.power(), grid)?;

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_z = 0.0;
    let mut norm = 0.0;
    for i in 0..grid.len() {
        let iw = illuminant_on_grid[i] * spectrum_on_grid[i];
        sum_x += iw * observer.x_bar()[i];
        sum_y += iw * observer.y_bar()[i];
        sum_z += iw * observer.z_bar()[i];
        norm += illuminant_on_grid[i] * observer.y_bar()[i];
    }
    if norm.abs() < 1e-15 {
        return Err(Error::Unrealizable { reason: "illuminant has zero overlap with observer y_bar" });
    }
    let k = 100.0 / norm;
    Ok(Xyz { x: k * sum_x, y: k * sum_y, z: k * sum_z })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_white_diffuser_has_y_of_100() {
        let observer = Observer::cie_1931_2deg();
        let illuminant = Illuminant::d65();
        let wavelengths: Vec<f64> = observer.grid().values().to_vec();
        let spectrum = vec![1.0; wavelengths.len()];
        let xyz = spectrum_to_xyz(&wavelengths, &spectrum, &illuminant, &observer).unwrap();
        assert_relative_eq!(xyz.y, 100.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_reflectance_gives_zero_xyz() {
        let observer = Observer::cie_1931_2deg();
        let illuminant = Illuminant::d65();
        let wavelengths: Vec<f64> = observer.grid().values().to_vec();
        let spectrum = vec![0.0; wavelengths.len()];
        let xyz = spectrum_to_xyz(&wavelengths, &spectrum, &illuminant, &observer).unwrap();
        assert_relative_eq!(xyz.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(xyz.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(xyz.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn coarser_spectrum_grid_is_resampled() {
        let observer = Observer::cie_1931_2deg();
        let illuminant = Illuminant::d65();
        // A flat reflectance on a much coarser grid than the observer's.
        let wavelengths = vec![380.0, 480.0, 580.0, 680.0, 780.0];
        let spectrum = vec![0.5; wavelengths.len()];
        let xyz = spectrum_to_xyz(&wavelengths, &spectrum, &illuminant, &observer).unwrap();
        assert_relative_eq!(xyz.y, 50.0, epsilon = 1.0);
    }
}
