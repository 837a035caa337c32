//! Top-level amplitude computation: ties the material catalog, the
//! [`Filter`] stack, and the characteristic-matrix engine together.

use thinfilm_core::Complex;
use thinfilm_materials::MaterialCatalog;

use crate::matrix_engine::{compute_amplitude, SublayerSpec};
use crate::sin2theta::Sin2Theta;
use crate::stack::{Filter, Layer};

/// Four complex amplitude arrays: `r_s`, `r_p`, `t_s`, `t_p`. `r_p`'s sign
/// follows the ellipsometric convention (flipped relative to the natural
/// Fresnel sign).
#[derive(Debug, Clone, Default)]
pub struct AmplitudeResult {
    /// s-polarization amplitude reflection.
    pub r_s: Vec<Complex>,
    /// p-polarization amplitude reflection, ellipsometric sign.
    pub r_p: Vec<Complex>,
    /// s-polarization amplitude transmission.
    pub t_s: Vec<Complex>,
    /// p-polarization amplitude transmission.
    pub t_p: Vec<Complex>,
    /// `dr_s/dlambda`, present iff derivatives were requested.
    pub dr_s: Option<Vec<Complex>>,
    /// `dr_p/dlambda`, ellipsometric sign, present iff requested.
    pub dr_p: Option<Vec<Complex>>,
    /// `dt_s/dlambda`, present iff derivatives were requested.
    pub dt_s: Option<Vec<Complex>>,
    /// `dt_p/dlambda`, present iff derivatives were requested.
    pub dt_p: Option<Vec<Complex>>,
}

fn negate_all(v: &mut [Complex]) {
    for x in v.iter_mut() {
        *x = -*x;
    }
}

/// Compute `r_s, r_p, t_s, t_p` (and, if `with_derivative`, their
/// wavelength derivatives) for the coherent front-side stack of `filter`
/// at incidence angle `theta0_rad`. The substrate is treated as the
/// terminating medium (no backside contribution) — see [`crate::backside`]
/// for the incoherent combination.
pub fn compute_front_coherent(
    catalog: &MaterialCatalog,
    filter: &Filter,
    theta0_rad: f64,
    with_derivative: bool,
) -> AmplitudeResult {
    let grid = &filter.grid;
    let mut front_medium = catalog.get(&filter.front_medium_id).expect("unknown front medium").clone();
    let mut substrate = catalog.get(&filter.substrate_id).expect("unknown substrate").clone();

    let n0: Vec<Complex> = grid.values().iter().map(|&l| front_medium.index_at(None, l)).collect();
    let n_sub: Vec<Complex> = grid.values().iter().map(|&l| substrate.index_at(None, l)).collect();
    let (dn0, dn_sub) = if with_derivative {
        (
            Some(grid.values().iter().map(|&l| front_medium.dindex_dlambda_at(None, l)).collect::<Vec<_>>()),
            Some(grid.values().iter().map(|&l| substrate.dindex_dlambda_at(None, l)).collect::<Vec<_>>()),
        )
    } else {
        (None, None)
    };

    let sin2theta = if with_derivative {
        Sin2Theta::with_derivative(&n0, dn0.as_ref().unwrap(), theta0_rad)
    } else {
        Sin2Theta::new(&n0, theta0_rad)
    };

    // Flatten the front stack into concrete per-wavelength index arrays,
    // substrate-adjacent first.
    let mut owned_subs: Vec<(Vec<Complex>, Option<Vec<Complex>>, f64)> = Vec::new();
    for layer in &filter.front {
        match layer {
            Layer::Homogeneous { material_id, mix_value, thickness_nm } => {
                let mut material = catalog.get(material_id).expect("unknown material id").clone();
                let index: Vec<Complex> =
                    grid.values().iter().map(|&l| material.index_at(*mix_value, l)).collect();
                let dindex = with_derivative.then(|| {
                    grid.values().iter().map(|&l| material.dindex_dlambda_at(*mix_value, l)).collect()
                });
                owned_subs.push((index, dindex, *thickness_nm));
            }
            Layer::Graded(subs) => {
                for s in subs {
                    owned_subs.push((s.index.clone(), None, s.thickness_nm));
                }
            }
        }
    }
    let specs: Vec<SublayerSpec<'_>> = owned_subs
        .iter()
        .map(|(index, dindex, thickness_nm)| SublayerSpec {
            index,
            dindex_dlambda: dindex.as_deref(),
            thickness_nm: *thickness_nm,
        })
        .collect();

    let amp_s = compute_amplitude(
        crate::stack::Polarization::S,
        grid.values(),
        &n0,
        dn0.as_deref(),
        &n_sub,
        dn_sub.as_deref(),
        &specs,
        &sin2theta,
    );
    let amp_p = compute_amplitude(
        crate::stack::Polarization::P,
        grid.values(),
        &n0,
        dn0.as_deref(),
        &n_sub,
        dn_sub.as_deref(),
        &specs,
        &sin2theta,
    );

    let mut r_p = amp_p.r;
    negate_all(&mut r_p);
    let mut dr_p = amp_p.dr;
    if let Some(d) = dr_p.as_mut() {
        negate_all(d);
    }

    AmplitudeResult {
        r_s: amp_s.r,
        r_p,
        t_s: amp_s.t,
        t_p: amp_p.t,
        dr_s: amp_s.dr,
        dr_p,
        dt_s: amp_s.dt,
        dt_p: amp_p.dt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use thinfilm_core::WavelengthGrid;
    use thinfilm_materials::{Dispersion, Material};

    fn simple_catalog() -> MaterialCatalog {
        let mut m = HashMap::new();
        m.insert("air".to_string(), Material::fixed("air", Dispersion::Constant(Complex::real(1.0))));
        m.insert("bk7".to_string(), Material::fixed("bk7", Dispersion::Constant(Complex::real(1.52))));
        MaterialCatalog::new(m)
    }

    #[test]
    fn bare_glass_reflectance_matches_fresnel() {
        let catalog = simple_catalog();
        let grid = WavelengthGrid::new(vec![500.0]);
        let filter = Filter::bare("bk7", 1_000_000.0, "air", "air", 500.0, grid);
        let amp = compute_front_coherent(&catalog, &filter, 0.0, false);
        let r = amp.r_s[0].norm_sqr();
        let expected = ((1.52 - 1.0) / (1.52 + 1.0)).powi(2);
        assert!((r - expected).abs() < 1e-9, "r={r} expected={expected}");
    }

    #[test]
    fn normal_incidence_rs_equals_minus_rp_returned() {
        // r_s_returned = r_s_natural, r_p_returned = -r_p_natural, and at normal
        // incidence r_s_natural = -r_p_natural, so r_s_returned == r_p_returned.
        let catalog = simple_catalog();
        let grid = WavelengthGrid::new(vec![500.0]);
        let filter = Filter::bare("bk7", 1_000_000.0, "air", "air", 500.0, grid);
        let amp = compute_front_coherent(&catalog, &filter, 0.0, false);
        assert!((amp.r_s[0] - amp.r_p[0]).norm() < 1e-12);
    }

    #[test]
    fn zero_thickness_layer_is_invisible() {
        use crate::stack::Layer;
        let catalog = simple_catalog();
        let grid = WavelengthGrid::new(vec![500.0]);
        let base = Filter::bare("bk7", 1_000_000.0, "air", "air", 500.0, grid.clone());
        let with_zero = base.clone().with_front_layer(Layer::Homogeneous {
            material_id: "bk7".to_string(),
            mix_value: None,
            thickness_nm: 0.0,
        });
        let a = compute_front_coherent(&catalog, &base, 0.0, false);
        let b = compute_front_coherent(&catalog, &with_zero, 0.0, false);
        assert!((a.r_s[0] - b.r_s[0]).norm() < 1e-15);
    }
}
