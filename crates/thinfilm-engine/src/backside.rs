//! Power observables, ellipsometric angles, and the incoherent backside
//! (substrate) combiner.
//!
//! The one-way power transmission through a thick incoherent substrate is
//! `tau = |exp(-2*Im(beta_s))|^2`. The standard Macleod incoherent-sum
//! formula then uses `tau` (one substrate pass) in the transmittance
//! numerator and `tau^2` (two passes: down to the back side and back) in
//! both the reflectance tail and the shared denominator.

use thinfilm_core::Complex;
use thinfilm_materials::MaterialCatalog;

use crate::amplitude::{compute_front_coherent, AmplitudeResult};
use crate::error::{EngineError, Result};
use crate::sin2theta::Sin2Theta;
use crate::stack::{Filter, Polarization};

/// Power reflectance/transmittance and ellipsometric angles across a
/// filter's wavelength grid, for one polarization pair evaluated jointly
/// (so Ψ/Δ can be formed from both).
#[derive(Debug, Clone, Default)]
pub struct Observables {
    /// Power reflectance, s-polarization.
    pub r_power_s: Vec<f64>,
    /// Power reflectance, p-polarization.
    pub r_power_p: Vec<f64>,
    /// Power transmittance, s-polarization.
    pub t_power_s: Vec<f64>,
    /// Power transmittance, p-polarization.
    pub t_power_p: Vec<f64>,
    /// Ellipsometric Ψ, degrees.
    pub psi_deg: Vec<f64>,
    /// Ellipsometric Δ, degrees.
    pub delta_deg: Vec<f64>,
}

fn admittance_ratio_power(pol: Polarization, n_in: Complex, nz_in: Complex, n_out: Complex, nz_out: Complex) -> f64 {
    let eta_in = match pol {
        Polarization::S => nz_in,
        Polarization::P => (n_in * n_in) / nz_in,
        Polarization::Mixed => unreachable!(),
    };
    let eta_out = match pol {
        Polarization::S => nz_out,
        Polarization::P => (n_out * n_out) / nz_out,
        Polarization::Mixed => unreachable!(),
    };
    eta_out.re / eta_in.re
}

fn power_reflectance(r: &[Complex]) -> Vec<f64> {
    r.iter().map(|c| c.norm_sqr()).collect()
}

fn power_transmittance(t: &[Complex], ratio: &[f64]) -> Vec<f64> {
    t.iter().zip(ratio).map(|(c, k)| c.norm_sqr() * k).collect()
}

/// r_s, r_p, their power images, and the per-wavelength admittance ratio
/// `Re(eta_sub)/Re(eta0)` needed to turn `|t|^2` into power transmittance.
struct Side {
    amp: AmplitudeResult,
    r_power_s: Vec<f64>,
    r_power_p: Vec<f64>,
    t_power_s: Vec<f64>,
    t_power_p: Vec<f64>,
}

fn evaluate_side(catalog: &MaterialCatalog, filter: &Filter, theta0_rad: f64) -> Side {
    let amp = compute_front_coherent(catalog, filter, theta0_rad, false);
    let grid = &filter.grid;
    let mut front_medium = catalog.get(&filter.front_medium_id).expect("unknown front medium").clone();
    let mut substrate = catalog.get(&filter.substrate_id).expect("unknown substrate").clone();
    let n0: Vec<Complex> = grid.values().iter().map(|&l| front_medium.index_at(None, l)).collect();
    let n_sub: Vec<Complex> = grid.values().iter().map(|&l| substrate.index_at(None, l)).collect();
    let sin2theta = Sin2Theta::new(&n0, theta0_rad);

    let ratio_s: Vec<f64> = (0..grid.len())
        .map(|w| {
            let n0z = sin2theta.n_z(w, n0[w]);
            let nsz = sin2theta.n_z(w, n_sub[w]);
            admittance_ratio_power(Polarization::S, n0[w], n0z, n_sub[w], nsz)
        })
        .collect();
    let ratio_p: Vec<f64> = (0..grid.len())
        .map(|w| {
            let n0z = sin2theta.n_z(w, n0[w]);
            let nsz = sin2theta.n_z(w, n_sub[w]);
            admittance_ratio_power(Polarization::P, n0[w], n0z, n_sub[w], nsz)
        })
        .collect();

    let r_power_s = power_reflectance(&amp.r_s);
    let r_power_p = power_reflectance(&amp.r_p);
    let t_power_s = power_transmittance(&amp.t_s, &ratio_s);
    let t_power_p = power_transmittance(&amp.t_p, &ratio_p);

    Side { amp, r_power_s, r_power_p, t_power_s, t_power_p }
}

/// Reverse the front stack: light entering from the substrate side and
/// exiting into the front ambient. Shares the forward pass's Snell
/// invariant (it is a property of the whole stack, not of travel
/// direction), so only the sublayer order and the ambient/substrate roles
/// are swapped.
fn evaluate_front_reverse(catalog: &MaterialCatalog, filter: &Filter, theta0_rad: f64) -> Side {
    let reversed = Filter {
        front: filter.front.iter().rev().cloned().collect(),
        back: Vec::new(),
        substrate_id: filter.front_medium_id.clone(),
        substrate_thickness_nm: 0.0,
        front_medium_id: filter.substrate_id.clone(),
        back_medium_id: filter.front_medium_id.clone(),
        center_wavelength_nm: filter.center_wavelength_nm,
        grid: filter.grid.clone(),
    };
    evaluate_side(catalog, &reversed, theta0_rad)
}

/// Coherent-only observables: front stack against the substrate directly,
/// no incoherent combination.
pub fn compute_coherent(catalog: &MaterialCatalog, filter: &Filter, theta0_rad: f64) -> Observables {
    let side = evaluate_side(catalog, filter, theta0_rad);
    let (psi_deg, delta_deg) = ellipsometric_coherent(&side.amp.r_s, &side.amp.r_p);
    Observables {
        r_power_s: side.r_power_s,
        r_power_p: side.r_power_p,
        t_power_s: side.t_power_s,
        t_power_p: side.t_power_p,
        psi_deg,
        delta_deg,
    }
}

fn ellipsometric_coherent(r_s: &[Complex], r_p: &[Complex]) -> (Vec<f64>, Vec<f64>) {
    let mut psi = Vec::with_capacity(r_s.len());
    let mut delta = Vec::with_capacity(r_s.len());
    for (&rs, &rp) in r_s.iter().zip(r_p.iter()) {
        if rs.norm() == 0.0 && rp.norm() == 0.0 {
            psi.push(45.0);
            delta.push(180.0);
            continue;
        }
        psi.push(rp.norm().atan2(rs.norm()).to_degrees());
        // arg() returns a principal value in (-pi, pi], so the raw difference
        // of two args can land outside a single turn; wrap to the
        // conventional ellipsometric [0, 360) range.
        let raw_delta_deg = (rp.arg() - rs.arg()).to_degrees();
        delta.push(raw_delta_deg.rem_euclid(360.0));
    }
    (psi, delta)
}

/// One-way power transmission through the substrate at each wavelength:
/// `exp(-4*Im(beta_s))`, `beta_s = (2*pi*d_s/lambda)*N_s,z`.
fn substrate_one_way_power(
    n_sub: &[Complex],
    thickness_nm: f64,
    grid_values: &[f64],
    sin2theta: &Sin2Theta,
) -> Vec<f64> {
    use thinfilm_core::math::constants::TAU;
    grid_values
        .iter()
        .enumerate()
        .map(|(w, &lambda)| {
            let nsz = sin2theta.n_z(w, n_sub[w]);
            let beta_s = Complex::new(TAU * thickness_nm / lambda, 0.0) * nsz;
            (-4.0 * beta_s.im).exp()
        })
        .collect()
}

fn combine_power(rf: f64, tf: f64, tf_rev: f64, rf_rev: f64, rb: f64, tb: f64, tau: f64) -> (f64, f64) {
    let tau2 = tau * tau;
    let denom = 1.0 - rf_rev * rb * tau2;
    let r = rf + (tf * tf_rev * rb * tau2) / denom;
    let t = (tf * tb * tau) / denom;
    (r, t)
}

/// Full observables including the incoherent substrate combination.
/// `filter.back` is the coating sequence on the exit face;
/// `filter.substrate_thickness_nm` must be positive for the combination to
/// be meaningful. A non-positive substrate thickness is rejected with
/// [`EngineError::MissingSubstrateThickness`] rather than silently
/// degenerating to [`compute_coherent`] — callers that want the bare front
/// stack should call [`compute_coherent`] directly.
pub fn compute_with_backside(catalog: &MaterialCatalog, filter: &Filter, theta0_rad: f64) -> Result<Observables> {
    if filter.substrate_thickness_nm <= 0.0 {
        return Err(EngineError::MissingSubstrateThickness);
    }

    let front = evaluate_side(catalog, filter, theta0_rad);
    let front_rev = evaluate_front_reverse(catalog, filter, theta0_rad);

    // Back stack evaluated as its own coherent filter: substrate is its
    // "ambient" (light enters from the substrate) and the back medium is
    // its "substrate" role in the characteristic-matrix sense.
    let back_filter = Filter {
        front: filter.back.clone(),
        back: Vec::new(),
        substrate_id: filter.back_medium_id.clone(),
        substrate_thickness_nm: 0.0,
        front_medium_id: filter.substrate_id.clone(),
        back_medium_id: filter.back_medium_id.clone(),
        center_wavelength_nm: filter.center_wavelength_nm,
        grid: filter.grid.clone(),
    };
    let back = evaluate_side(catalog, &back_filter, theta0_rad);

    let mut substrate = catalog.get(&filter.substrate_id).expect("unknown substrate").clone();
    let n_sub: Vec<Complex> = filter.grid.values().iter().map(|&l| substrate.index_at(None, l)).collect();
    let mut front_medium = catalog.get(&filter.front_medium_id).expect("unknown front medium").clone();
    let n0: Vec<Complex> = filter.grid.values().iter().map(|&l| front_medium.index_at(None, l)).collect();
    let sin2theta = Sin2Theta::new(&n0, theta0_rad);
    let tau = substrate_one_way_power(&n_sub, filter.substrate_thickness_nm, filter.grid.values(), &sin2theta);

    let w_len = filter.grid.len();
    let mut r_power_s = Vec::with_capacity(w_len);
    let mut r_power_p = Vec::with_capacity(w_len);
    let mut t_power_s = Vec::with_capacity(w_len);
    let mut t_power_p = Vec::with_capacity(w_len);
    let mut psi_deg = Vec::with_capacity(w_len);
    let mut delta_deg = Vec::with_capacity(w_len);

    for w in 0..w_len {
        let (rs, ts) = combine_power(
            front.r_power_s[w],
            front.t_power_s[w],
            front_rev.t_power_s[w],
            front_rev.r_power_s[w],
            back.r_power_s[w],
            back.t_power_s[w],
            tau[w],
        );
        let (rp, tp) = combine_power(
            front.r_power_p[w],
            front.t_power_p[w],
            front_rev.t_power_p[w],
            front_rev.r_power_p[w],
            back.r_power_p[w],
            back.t_power_p[w],
            tau[w],
        );
        r_power_s.push(rs);
        r_power_p.push(rp);
        t_power_s.push(ts);
        t_power_p.push(tp);

        // Mixed coherence term, extended from the R/T incoherent-sum
        // algebra to the complex cross product (-r_p * conj(r_s)); the
        // spec leaves the exact mixed-term recursion unstated, so p/s
        // tail transmissions and the round-trip attenuation are combined
        // by geometric mean, matching the energy-like structure of the
        // R and T recursions above. See DESIGN.md for this choice.
        let cross_front = -front.amp.r_p[w] * front.amp.r_s[w].conj();
        let cross_back = -back.amp.r_p[w] * back.amp.r_s[w].conj();
        let tau2 = tau[w] * tau[w];
        let tf_mix = (front.t_power_s[w] * front.t_power_p[w]).sqrt();
        let tf_rev_mix = (front_rev.t_power_s[w] * front_rev.t_power_p[w]).sqrt();
        let rf_rev_mix = (front_rev.r_power_s[w] * front_rev.r_power_p[w]).sqrt();
        let rb_mix = (back.r_power_s[w] * back.r_power_p[w]).sqrt();
        let denom = 1.0 - rf_rev_mix * rb_mix * tau2;
        let cross_total = cross_front + cross_back * Complex::real(tf_mix * tf_rev_mix * tau2 / denom);

        let r_total_p = rp;
        let r_total_s = rs;
        if r_total_p.sqrt() * r_total_s.sqrt() == 0.0 {
            psi_deg.push(45.0);
            delta_deg.push(180.0);
        } else {
            psi_deg.push(r_total_p.sqrt().atan2(r_total_s.sqrt()).to_degrees());
            let cos_delta = (cross_total.re / (r_total_p.sqrt() * r_total_s.sqrt())).clamp(-1.0, 1.0);
            delta_deg.push(cos_delta.acos().to_degrees());
        }
    }

    Ok(Observables { r_power_s, r_power_p, t_power_s, t_power_p, psi_deg, delta_deg })
}
