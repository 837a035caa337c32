//! Graded-index discretization: converts a continuous
//! physical-thickness index profile into a sequence of homogeneous
//! sublayers drawn exclusively from a [`StepLadder`], preserving both the
//! total physical thickness and the total optical thickness (`∫n dz`),
//! and repairing any sublayer thinner than a minimum.
//!
//! The crossing/turning-point walk rebuilds a continuous quantity from
//! discrete samples via linear interpolation, with the roles reversed
//! from the usual LUT case: here a continuous profile is converted into
//! a discrete ladder, not the other way around.

use thinfilm_core::{Error, Result as CoreResult};
use thinfilm_materials::StepLadder;

use crate::error::Result;

/// One point of a continuous refractive-index profile: physical depth
/// from the substrate-facing surface, and the (real) index there. The
/// profile is piecewise-linear between consecutive points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    /// Depth from the substrate interface, nm.
    pub depth_nm: f64,
    /// Real refractive index at this depth.
    pub index: f64,
}

/// One discretized sublayer: a ladder-valued index and a physical
/// thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteStep {
    /// An element of the ladder's allowed values.
    pub index: f64,
    /// Physical thickness, nm.
    pub thickness_nm: f64,
}

const RANGE_TOLERANCE: f64 = 1e-9;
const CLEANUP_EPS_NM: f64 = 1e-9;

fn clamp_profile(profile: &[ProfilePoint], ladder: &StepLadder) -> CoreResult<Vec<ProfilePoint>> {
    let (lo, hi) = (ladder.min(), ladder.max());
    profile
        .iter()
        .map(|p| {
            if p.index < lo - RANGE_TOLERANCE || p.index > hi + RANGE_TOLERANCE {
                return Err(Error::OutOfRange { requested: p.index, min: lo, max: hi });
            }
            Ok(ProfilePoint { depth_nm: p.depth_nm, index: p.index.clamp(lo, hi) })
        })
        .collect()
}

/// `∫_{z_a}^{z_b} n(z) dz` over the piecewise-linear `profile`, by exact
/// trapezoidal quadrature of each overlapping segment.
fn integral_n_dz(profile: &[ProfilePoint], z_a: f64, z_b: f64) -> f64 {
    let mut total = 0.0;
    for w in profile.windows(2) {
        let (p0, p1) = (w[0], w[1]);
        let span = p1.depth_nm - p0.depth_nm;
        if span <= 0.0 {
            continue;
        }
        let lo = z_a.max(p0.depth_nm);
        let hi = z_b.min(p1.depth_nm);
        if hi <= lo {
            continue;
        }
        let n_at = |z: f64| p0.index + (p1.index - p0.index) * (z - p0.depth_nm) / span;
        total += 0.5 * (n_at(lo) + n_at(hi)) * (hi - lo);
    }
    total
}

fn index_at(profile: &[ProfilePoint], z: f64) -> f64 {
    for w in profile.windows(2) {
        if z >= w[0].depth_nm && z <= w[1].depth_nm {
            let span = w[1].depth_nm - w[0].depth_nm;
            if span <= 0.0 {
                return w[0].index;
            }
            return w[0].index + (w[1].index - w[0].index) * (z - w[0].depth_nm) / span;
        }
    }
    profile.last().map(|p| p.index).unwrap_or(0.0)
}

/// Depths at which the walk must insert a split: ladder crossings, local
/// extrema of the profile, and the two endpoints.
fn collect_events(profile: &[ProfilePoint], ladder: &StepLadder) -> Vec<f64> {
    let mut events = vec![profile[0].depth_nm];
    for w in profile.windows(2) {
        let (p0, p1) = (w[0], w[1]);
        let delta = p1.index - p0.index;
        if delta == 0.0 {
            continue;
        }
        let (lo, hi) = (p0.index.min(p1.index), p0.index.max(p1.index));
        let mut crossed: Vec<f64> = ladder.steps().iter().copied().filter(|&l| l > lo && l < hi).collect();
        if delta < 0.0 {
            crossed.reverse();
        }
        for l in crossed {
            events.push(p0.depth_nm + (l - p0.index) / delta * (p1.depth_nm - p0.depth_nm));
        }
    }
    for i in 1..profile.len().saturating_sub(1) {
        let d0 = profile[i].index - profile[i - 1].index;
        let d1 = profile[i + 1].index - profile[i].index;
        if d0 * d1 < 0.0 {
            events.push(profile[i].depth_nm);
        }
    }
    events.push(profile.last().unwrap().depth_nm);
    events.sort_by(|a, b| a.partial_cmp(b).unwrap());
    events.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
    events
}

/// Split the physical/optical budget of `[z0, z1]` into the two ladder
/// rungs bracketing the profile there. Crossings, turning points, and the
/// final close of the walk all reduce to this one 2x2 solve.
fn split_segment(profile: &[ProfilePoint], ladder: &StepLadder, z0: f64, z1: f64) -> Option<[DiscreteStep; 2]> {
    let dd = z1 - z0;
    if dd <= 0.0 {
        return None;
    }
    let mid = index_at(profile, 0.5 * (z0 + z1));
    let i = ladder.interval_containing(mid);
    let steps = ladder.steps();
    let (n_lower, n_upper) = (steps[i], steps[i + 1]);
    let dx = integral_n_dz(profile, z0, z1);

    if (n_upper - n_lower).abs() < 1e-15 {
        return Some([
            DiscreteStep { index: n_lower, thickness_nm: dd },
            DiscreteStep { index: n_lower, thickness_nm: 0.0 },
        ]);
    }
    let d_upper = (dx - n_lower * dd) / (n_upper - n_lower);
    let d_lower = dd - d_upper;
    let rising = index_at(profile, z0) <= index_at(profile, z1);
    Some(if rising {
        [
            DiscreteStep { index: n_lower, thickness_nm: d_lower },
            DiscreteStep { index: n_upper, thickness_nm: d_upper },
        ]
    } else {
        [
            DiscreteStep { index: n_upper, thickness_nm: d_upper },
            DiscreteStep { index: n_lower, thickness_nm: d_lower },
        ]
    })
}

fn cleanup(raw: Vec<DiscreteStep>) -> Vec<DiscreteStep> {
    let mut out: Vec<DiscreteStep> = Vec::with_capacity(raw.len());
    for step in raw {
        if step.thickness_nm <= CLEANUP_EPS_NM {
            continue;
        }
        if let Some(last) = out.last_mut() {
            if (last.index - step.index).abs() < 1e-12 {
                last.thickness_nm += step.thickness_nm;
                continue;
            }
        }
        out.push(step);
    }
    out
}

/// Remove the sublayer at `idx`, redistributing its physical and optical
/// budget across its two neighbors by solving the same 2x2 system used
/// for crossings, run in reverse (merge three sublayers into two). Returns
/// `false` (no mutation) if `idx` has no two neighbors or the solve would
/// produce a negative thickness.
fn dissolve(steps: &mut Vec<DiscreteStep>, idx: usize) -> bool {
    if idx == 0 || idx + 1 >= steps.len() {
        return false;
    }
    let (lo, mid, hi) = (steps[idx - 1], steps[idx], steps[idx + 1]);
    let dd = lo.thickness_nm + mid.thickness_nm + hi.thickness_nm;
    let dx = lo.index * lo.thickness_nm + mid.index * mid.thickness_nm + hi.index * hi.thickness_nm;

    if (hi.index - lo.index).abs() < 1e-15 {
        steps[idx - 1].thickness_nm = dd;
        steps.remove(idx + 1);
        steps.remove(idx);
        return true;
    }
    let d_hi = (dx - lo.index * dd) / (hi.index - lo.index);
    let d_lo = dd - d_hi;
    if d_lo < 0.0 || d_hi < 0.0 {
        return false;
    }
    steps[idx - 1].thickness_nm = d_lo;
    steps[idx + 1].thickness_nm = d_hi;
    steps.remove(idx);
    true
}

fn is_extremum(steps: &[DiscreteStep], i: usize) -> bool {
    if i == 0 || i + 1 >= steps.len() {
        return false;
    }
    (steps[i].index - steps[i - 1].index) * (steps[i + 1].index - steps[i].index) < 0.0
}

/// Enforce `thickness_nm >= d_min` everywhere by repeatedly dissolving the
/// thinnest offender into its neighbors, failing
/// with [`Error::Unrealizable`] when a round makes no progress.
///
/// The first/last and turning-point cases all reduce to dissolving one
/// specific neighboring sublayer (see [`dissolve`]); the more surgical
/// "steal a little from each neighbor while keeping them above the
/// minimum" refinement for ordinary interior sublayers is not attempted
/// separately — the offender is dissolved directly, which still
/// preserves both budgets exactly.
fn repair_minimum_thickness(mut steps: Vec<DiscreteStep>, d_min: f64) -> CoreResult<Vec<DiscreteStep>> {
    loop {
        let Some(i) = steps.iter().position(|s| s.thickness_nm < d_min) else {
            return Ok(steps);
        };
        if steps.len() < 3 {
            return Err(Error::Unrealizable {
                reason: "profile has too few sublayers to satisfy the minimum thickness",
            });
        }
        let progressed = if i == 0 {
            !is_extremum(&steps, 1) && dissolve(&mut steps, 1)
        } else if i == steps.len() - 1 {
            let j = steps.len() - 2;
            !is_extremum(&steps, j) && dissolve(&mut steps, j)
        } else {
            dissolve(&mut steps, i)
        };
        if !progressed {
            return Err(Error::Unrealizable {
                reason: "minimum sublayer thickness cannot be met without violating the thickness budget",
            });
        }
    }
}

/// Convert a continuous physical-thickness index profile into a sequence
/// of homogeneous sublayers drawn from `ladder`, preserving total physical
/// thickness and total optical thickness exactly, then repairing any
/// sublayer thinner than `d_min`.
pub fn discretize(profile: &[ProfilePoint], ladder: &StepLadder, d_min: f64) -> Result<Vec<DiscreteStep>> {
    assert!(profile.len() >= 2, "profile needs at least two points");
    let profile = clamp_profile(profile, ladder)?;
    let events = collect_events(&profile, ladder);

    let mut raw = Vec::with_capacity(events.len() * 2);
    for w in events.windows(2) {
        if let Some(pair) = split_segment(&profile, ladder, w[0], w[1]) {
            raw.extend(pair);
        }
    }

    let cleaned = cleanup(raw);
    Ok(repair_minimum_thickness(cleaned, d_min)?)
}

/// Inverse of [`discretize`]: a two-point-per-step depth/index sequence
/// suitable for plotting or for re-discretizing at a different center
/// wavelength.
pub fn steps_to_profile(steps: &[DiscreteStep]) -> Vec<ProfilePoint> {
    let mut out = Vec::with_capacity(steps.len() * 2);
    let mut z = 0.0;
    for step in steps {
        out.push(ProfilePoint { depth_nm: z, index: step.index });
        z += step.thickness_nm;
        out.push(ProfilePoint { depth_nm: z, index: step.index });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quintic_profile(n_lo: f64, n_hi: f64, thickness_nm: f64, samples: usize) -> Vec<ProfilePoint> {
        (0..=samples)
            .map(|i| {
                let t = i as f64 / samples as f64;
                let s = t * t * t * (t * (t * 6.0 - 15.0) + 10.0); // smoothstep (quintic)
                ProfilePoint { depth_nm: t * thickness_nm, index: n_lo + (n_hi - n_lo) * s }
            })
            .collect()
    }

    #[test]
    fn total_physical_thickness_is_preserved() {
        let profile = quintic_profile(1.38, 2.35, 500.0, 200);
        let ladder = StepLadder::uniform(1.38, 2.35, 0.05);
        let steps = discretize(&profile, &ladder, 1.0).unwrap();
        let total: f64 = steps.iter().map(|s| s.thickness_nm).sum();
        assert!((total - 500.0).abs() < 1e-6, "total={total}");
    }

    #[test]
    fn total_optical_thickness_is_preserved() {
        let profile = quintic_profile(1.38, 2.35, 500.0, 200);
        let ladder = StepLadder::uniform(1.38, 2.35, 0.05);
        let steps = discretize(&profile, &ladder, 1.0).unwrap();
        let x_out: f64 = steps.iter().map(|s| s.index * s.thickness_nm).sum();
        let x_in = integral_n_dz(&profile, 0.0, 500.0);
        assert!((x_out - x_in).abs() < 1e-3 * x_in.abs(), "x_out={x_out} x_in={x_in}");
    }

    #[test]
    fn every_output_index_is_a_ladder_step() {
        let profile = quintic_profile(1.38, 2.35, 500.0, 200);
        let ladder = StepLadder::uniform(1.38, 2.35, 0.05);
        let steps = discretize(&profile, &ladder, 1.0).unwrap();
        for s in &steps {
            assert!(ladder.steps().iter().any(|&l| (l - s.index).abs() < 1e-9));
        }
    }

    #[test]
    fn minimum_thickness_is_enforced() {
        let profile = quintic_profile(1.38, 2.35, 500.0, 200);
        let ladder = StepLadder::uniform(1.38, 2.35, 0.05);
        let steps = discretize(&profile, &ladder, 1.0).unwrap();
        for s in &steps {
            assert!(s.thickness_nm >= 1.0 - 1e-9, "thickness {} below minimum", s.thickness_nm);
        }
    }

    #[test]
    fn out_of_range_profile_is_rejected() {
        let profile = vec![
            ProfilePoint { depth_nm: 0.0, index: 1.0 },
            ProfilePoint { depth_nm: 100.0, index: 2.35 },
        ];
        let ladder = StepLadder::uniform(1.38, 2.35, 0.05);
        assert!(discretize(&profile, &ladder, 1.0).is_err());
    }

    #[test]
    fn steps_to_profile_round_trips_budgets() {
        let profile = quintic_profile(1.38, 2.35, 500.0, 200);
        let ladder = StepLadder::uniform(1.38, 2.35, 0.05);
        let steps = discretize(&profile, &ladder, 1.0).unwrap();
        let rebuilt = steps_to_profile(&steps);
        assert!((rebuilt.last().unwrap().depth_nm - 500.0).abs() < 1e-6);
    }
}
