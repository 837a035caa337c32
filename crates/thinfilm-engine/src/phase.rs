//! Group delay (GD, `-dphi/domega`) and group-delay dispersion (GDD, its
//! derivative), read off the amplitude reflection coefficient and its
//! wavelength derivative without finite differences for GD, and by one
//! additional numerical derivative of GD itself for GDD.

use thinfilm_core::math::constants::PI;
use thinfilm_core::Complex;

/// Speed of light, nm/fs — chosen so that a wavelength grid in nanometers
/// and a delay in femtoseconds fall out directly.
const C_NM_PER_FS: f64 = 299.792458;

/// `GD(lambda) = -dphi/domega = dphi/dlambda * lambda^2 / (2*pi*c)`, in
/// femtoseconds, computed analytically from `r` and `dr/dlambda` (no
/// finite differences: `dphi/dlambda = Im((dr/dlambda) * conj(r)) /
/// |r|^2`).
pub fn group_delay_fs(r: &[Complex], dr_dlambda: &[Complex], grid_nm: &[f64]) -> Vec<f64> {
    r.iter()
        .zip(dr_dlambda)
        .zip(grid_nm)
        .map(|((r, dr), &lambda)| {
            let norm_sqr = r.norm_sqr();
            if norm_sqr == 0.0 {
                return 0.0;
            }
            let dphi_dlambda = (*dr * r.conj()).im / norm_sqr;
            dphi_dlambda * lambda * lambda / (2.0 * PI * C_NM_PER_FS)
        })
        .collect()
}

/// Non-uniform-grid-aware first derivative: central difference in the
/// interior, one-sided at the endpoints.
fn derivative_over_grid(y: &[f64], x: &[f64]) -> Vec<f64> {
    let n = y.len();
    let mut out = vec![0.0; n];
    if n < 2 {
        return out;
    }
    out[0] = (y[1] - y[0]) / (x[1] - x[0]);
    out[n - 1] = (y[n - 1] - y[n - 2]) / (x[n - 1] - x[n - 2]);
    for i in 1..n - 1 {
        out[i] = (y[i + 1] - y[i - 1]) / (x[i + 1] - x[i - 1]);
    }
    out
}

/// `GDD(lambda) = dGD/domega = dGD/dlambda * (-lambda^2 / (2*pi*c))`,
/// femtoseconds squared. `dGD/dlambda` is obtained by one numerical
/// derivative of [`group_delay_fs`]'s output over the wavelength grid,
/// since the engine does not propagate second derivatives of `r`.
pub fn gdd_fs2(gd_fs: &[f64], grid_nm: &[f64]) -> Vec<f64> {
    let dgd_dlambda = derivative_over_grid(gd_fs, grid_nm);
    dgd_dlambda
        .iter()
        .zip(grid_nm)
        .map(|(&d, &lambda)| d * (-lambda * lambda / (2.0 * PI * C_NM_PER_FS)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_phase_has_zero_group_delay() {
        let r = vec![Complex::real(0.5); 5];
        let dr = vec![Complex::ZERO; 5];
        let grid = vec![400.0, 450.0, 500.0, 550.0, 600.0];
        let gd = group_delay_fs(&r, &dr, &grid);
        for g in gd {
            assert!(g.abs() < 1e-12);
        }
    }

    #[test]
    fn gdd_of_constant_gd_is_zero() {
        let gd = vec![10.0; 5];
        let grid = vec![400.0, 450.0, 500.0, 550.0, 600.0];
        let gdd = gdd_fs2(&gd, &grid);
        for g in gdd {
            assert!(g.abs() < 1e-10);
        }
    }
}
