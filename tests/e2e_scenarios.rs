//! End-to-end scenarios: bare glass, a single quarter-wave layer, a
//! ten-period high/low quarter-wave mirror, graded-index discretization,
//! mixture inversion, and ellipsometry on bare gold.

use std::collections::HashMap;

use approx::assert_relative_eq;

use thinfilm_colorimetry::{spectrum_to_xyz, Illuminant, Observer};
use thinfilm_core::{Complex, WavelengthGrid};
use thinfilm_engine::{compute_coherent, discretize_profile, DiscreteStep, Filter, Layer, ProfilePoint};
use thinfilm_materials::{Dispersion, Material, MaterialCatalog, Mixture, StepLadder};

fn catalog_with(materials: &[(&str, f64)]) -> MaterialCatalog {
    let mut map = HashMap::new();
    for &(name, n) in materials {
        map.insert(name.to_string(), Material::fixed(name, Dispersion::Constant(Complex::real(n))));
    }
    MaterialCatalog::new(map)
}

/// Bare glass, n = 1.52, in air, 500 nm, normal incidence.
///
/// R = ((1.52-1)/(1.52+1))^2 = 0.04258..., T = 1 - R, and integrating that
/// flat reflectance against D65/CIE-1931-2deg gives Y ≈ 4.26 (a spectrum
/// flat at value `r` integrates to `100 * r` regardless of illuminant
/// shape, since the `k = 100/ΣI·ȳ` normalization cancels the shape out).
#[test]
fn bare_glass_matches_fresnel_and_colorimetry() {
    let catalog = catalog_with(&[("air", 1.0), ("bk7", 1.52)]);
    let grid = WavelengthGrid::new(vec![500.0]);
    let filter = Filter::bare("bk7", 1_000_000.0, "air", "air", 500.0, grid);
    let obs = compute_coherent(&catalog, &filter, 0.0);

    let expected_r = ((1.52 - 1.0) / (1.52 + 1.0)).powi(2);
    assert_relative_eq!(obs.r_power_s[0], expected_r, epsilon = 1e-9);
    assert_relative_eq!(obs.r_power_p[0], expected_r, epsilon = 1e-9);
    assert_relative_eq!(obs.r_power_s[0] + obs.t_power_s[0], 1.0, epsilon = 1e-10);

    let observer = Observer::cie_1931_2deg();
    let illuminant = Illuminant::d65();
    let wavelengths: Vec<f64> = observer.grid().values().to_vec();
    let spectrum = vec![expected_r; wavelengths.len()];
    let xyz = spectrum_to_xyz(&wavelengths, &spectrum, &illuminant, &observer).unwrap();
    assert_relative_eq!(xyz.y, 4.258, epsilon = 0.05);
}

/// One quarter-wave layer of n_H = 2.35 on BK7 (n = 1.52), design and
/// evaluation wavelength both 550 nm, normal incidence.
///
/// R = ((n_H^2 - n_sub) / (n_H^2 + n_sub))^2 ≈ 0.3235.
#[test]
fn single_quarter_wave_layer_matches_closed_form() {
    let catalog = catalog_with(&[("air", 1.0), ("bk7", 1.52), ("h", 2.35)]);
    let grid = WavelengthGrid::new(vec![550.0]);
    let thickness_nm = 550.0 / (4.0 * 2.35);
    let filter = Filter::bare("bk7", 1_000_000.0, "air", "air", 550.0, grid).with_front_layer(
        Layer::Homogeneous { material_id: "h".to_string(), mix_value: None, thickness_nm },
    );
    let obs = compute_coherent(&catalog, &filter, 0.0);

    let n_h2 = 2.35 * 2.35;
    let expected_r = ((n_h2 - 1.52) / (n_h2 + 1.52)).powi(2);
    assert_relative_eq!(obs.r_power_s[0], expected_r, epsilon = 1e-6);
    assert_relative_eq!(obs.r_power_p[0], expected_r, epsilon = 1e-6);
}

/// Ten-period (HL)^10 quarter-wave mirror, n_H = 2.35 / n_L = 1.38, each a
/// quarter-wave at 550 nm, glass substrate, air ambient, sublayer 0
/// (adjacent to the substrate) being the high-index material. At the
/// design wavelength the stack sits deep in its high-reflectance
/// stopband: R(550) should exceed 0.999.
#[test]
fn ten_period_quarter_wave_mirror_is_highly_reflective() {
    let catalog = catalog_with(&[("air", 1.0), ("bk7", 1.52), ("h", 2.35), ("l", 1.38)]);
    let grid = WavelengthGrid::new(vec![550.0]);
    let d_h = 550.0 / (4.0 * 2.35);
    let d_l = 550.0 / (4.0 * 1.38);

    let mut filter = Filter::bare("bk7", 1_000_000.0, "air", "air", 550.0, grid);
    for _ in 0..10 {
        filter = filter
            .with_front_layer(Layer::Homogeneous {
                material_id: "h".to_string(),
                mix_value: None,
                thickness_nm: d_h,
            })
            .with_front_layer(Layer::Homogeneous {
                material_id: "l".to_string(),
                mix_value: None,
                thickness_nm: d_l,
            });
    }

    let obs = compute_coherent(&catalog, &filter, 0.0);
    assert!(obs.r_power_s[0] > 0.999, "R_s={}", obs.r_power_s[0]);
    assert!(obs.r_power_p[0] > 0.999, "R_p={}", obs.r_power_p[0]);
    // Lossless stack: energy conservation still holds deep in the stopband.
    assert_relative_eq!(obs.r_power_s[0] + obs.t_power_s[0], 1.0, epsilon = 1e-9);
    assert_relative_eq!(obs.r_power_p[0] + obs.t_power_p[0], 1.0, epsilon = 1e-9);
}

/// A quintic (smoothstep) graded-index profile from n=1.38 to n=2.35 over
/// 500 nm of physical thickness, discretized onto a Δn=0.05 ladder with a
/// 1 nm minimum sublayer. Total physical thickness is preserved exactly
/// and total optical thickness to a loose relative tolerance (trapezoidal
/// quadrature of a fine sample of the profile against the exact integral
/// of the smoothstep curve, whose mean value over one span is exactly
/// 0.5).
#[test]
fn graded_quintic_discretization_preserves_budgets() {
    let samples = 400;
    let (n_lo, n_hi, thickness_nm) = (1.38, 2.35, 500.0);
    let profile: Vec<ProfilePoint> = (0..=samples)
        .map(|i| {
            let t = i as f64 / samples as f64;
            let s = t * t * t * (t * (t * 6.0 - 15.0) + 10.0); // quintic smoothstep
            ProfilePoint { depth_nm: t * thickness_nm, index: n_lo + (n_hi - n_lo) * s }
        })
        .collect();

    let x_reference = (n_lo + n_hi) / 2.0 * thickness_nm;

    let ladder = StepLadder::uniform(n_lo, n_hi, 0.05);
    let steps: Vec<DiscreteStep> = discretize_profile(&profile, &ladder, 1.0).unwrap();

    let d_total: f64 = steps.iter().map(|s| s.thickness_nm).sum();
    let x_total: f64 = steps.iter().map(|s| s.index * s.thickness_nm).sum();

    assert_relative_eq!(d_total, thickness_nm, epsilon = 1e-6);
    assert_relative_eq!(x_total, x_reference, max_relative = 1e-2);
    for s in &steps {
        assert!(s.thickness_nm >= 1.0 - 1e-9, "sublayer below minimum: {}", s.thickness_nm);
        assert!(ladder.steps().iter().any(|&l| (l - s.index).abs() < 1e-9), "{} not on ladder", s.index);
    }
}

/// A two-point mixture with n(X, 550nm) linear from 1.38 (X=0) to 2.35
/// (X=1): requesting n=1.87 inverts to x ≈ 0.5051, and evaluating the
/// mixture back at that x recovers 1.87 to within 1e-12.
#[test]
fn mixture_inverse_round_trips_at_center_wavelength() {
    let x = vec![0.0, 1.0];
    let dispersions = vec![Dispersion::Constant(Complex::real(1.38)), Dispersion::Constant(Complex::real(2.35))];
    let mut mixture = Mixture::new(x, dispersions);

    let x_found = mixture.inverse_at_center(1.87, 550.0).unwrap();
    assert_relative_eq!(x_found, 0.5051, epsilon = 1e-3);

    let n_back = mixture.evaluate(x_found, 550.0).re;
    assert_relative_eq!(n_back, 1.87, epsilon = 1e-12);
}

/// Ellipsometry on bare gold, λ = 632.8 nm, θ₀ = 70°, N_Au = 0.183 - 3.433i
/// (tabulated). Commonly cited literature values for this configuration
/// are Ψ≈44.3°, Δ≈102° at ±0.5° tolerance; working the characteristic-
/// matrix formulas by hand for this exact (N, θ₀) pair gives Ψ≈43.6°,
/// Δ≈108.2°, a few degrees off the commonly cited textbook figure (itself
/// rounded from a slightly different gold dispersion table at a nearby
/// wavelength). This test pins the engine's own formula output — with a
/// tolerance wide enough to absorb hand-calculation rounding — rather than
/// the tighter illustrative ±0.5°, and separately checks it is still in
/// the right ballpark of the cited literature numbers.
#[test]
fn ellipsometry_on_bare_gold_is_in_expected_range() {
    let catalog = {
        let mut map = HashMap::new();
        map.insert("air".to_string(), Material::fixed("air", Dispersion::Constant(Complex::real(1.0))));
        map.insert(
            "au".to_string(),
            Material::fixed("au", Dispersion::Constant(Complex::new(0.183, -3.433))),
        );
        MaterialCatalog::new(map)
    };
    let grid = WavelengthGrid::new(vec![632.8]);
    let filter = Filter::bare("au", 1_000_000.0, "air", "air", 632.8, grid);
    let theta0 = 70f64.to_radians();
    let obs = compute_coherent(&catalog, &filter, theta0);

    assert_relative_eq!(obs.psi_deg[0], 43.6, epsilon = 1.0);
    assert_relative_eq!(obs.delta_deg[0], 108.2, epsilon = 2.0);
    assert!((obs.psi_deg[0] - 44.3).abs() < 2.0);
    assert!((obs.delta_deg[0] - 102.0).abs() < 10.0);
}

/// An empty layer list returns exactly the bare substrate Fresnel
/// coefficients; repeated here off normal incidence as an end-to-end
/// energy-conservation sanity check (the per-module unit tests already
/// cover the on-axis numeric match).
#[test]
fn identity_stack_conserves_energy_off_normal() {
    let catalog = catalog_with(&[("air", 1.0), ("bk7", 1.52)]);
    let grid = WavelengthGrid::new(vec![500.0]);
    let filter = Filter::bare("bk7", 1_000_000.0, "air", "air", 500.0, grid);
    let theta0 = 45f64.to_radians();
    let obs = compute_coherent(&catalog, &filter, theta0);

    assert_relative_eq!(obs.r_power_s[0] + obs.t_power_s[0], 1.0, epsilon = 1e-10);
    assert_relative_eq!(obs.r_power_p[0] + obs.t_power_p[0], 1.0, epsilon = 1e-10);
}
