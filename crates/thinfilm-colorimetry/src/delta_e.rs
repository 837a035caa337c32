//! CIE color-difference metrics: the Euclidean ΔE76 and
//! the CIEDE2000 formula (Luo, Cui and Rigg's correction of the original
//! CIE 2000 recommendation).

use crate::convert::Lab;

/// The 1976 Euclidean color difference in CIE L\*a\*b\* space.
#[must_use]
pub fn delta_e_1976(a: Lab, b: Lab) -> f64 {
    ((a.l - b.l).powi(2) + (a.a - b.a).powi(2) + (a.b - b.b).powi(2)).sqrt()
}

/// The CIEDE2000 color difference, with the standard unity parametric
/// weights (`kL = kC = kH = 1`).
#[must_use]
pub fn delta_e_2000(lab1: Lab, lab2: Lab) -> f64 {
    delta_e_2000_weighted(lab1, lab2, 1.0, 1.0, 1.0)
}

/// The CIEDE2000 color difference with explicit parametric weighting
/// factors, following Luo, Cui and Rigg (2001).
#[must_use]
pub fn delta_e_2000_weighted(lab1: Lab, lab2: Lab, k_l: f64, k_c: f64, k_h: f64) -> f64 {
    let c1 = (lab1.a * lab1.a + lab1.b * lab1.b).sqrt();
    let c2 = (lab2.a * lab2.a + lab2.b * lab2.b).sqrt();
    let c_bar = (c1 + c2) / 2.0;
    let c_bar7 = c_bar.powi(7);
    let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + 25f64.powi(7))).sqrt());

    let a1_prime = lab1.a * (1.0 + g);
    let a2_prime = lab2.a * (1.0 + g);
    let c1_prime = (a1_prime * a1_prime + lab1.b * lab1.b).sqrt();
    let c2_prime = (a2_prime * a2_prime + lab2.b * lab2.b).sqrt();

    let h1_prime = hue_angle_deg(a1_prime, lab1.b);
    let h2_prime = hue_angle_deg(a2_prime, lab2.b);

    let delta_l_prime = lab2.l - lab1.l;
    let delta_c_prime = c2_prime - c1_prime;

    let delta_h_prime = if c1_prime * c2_prime == 0.0 {
        0.0
    } else {
        let mut diff = h2_prime - h1_prime;
        if diff > 180.0 {
            diff -= 360.0;
        } else if diff < -180.0 {
            diff += 360.0;
        }
        diff
    };
    let delta_big_h_prime = 2.0 * (c1_prime * c2_prime).sqrt() * (delta_h_prime.to_radians() / 2.0).sin();

    let l_bar_prime = (lab1.l + lab2.l) / 2.0;
    let c_bar_prime = (c1_prime + c2_prime) / 2.0;

    let h_bar_prime = if c1_prime * c2_prime == 0.0 {
        h1_prime + h2_prime
    } else if (h1_prime - h2_prime).abs() <= 180.0 {
        (h1_prime + h2_prime) / 2.0
    } else if h1_prime + h2_prime < 360.0 {
        (h1_prime + h2_prime + 360.0) / 2.0
    } else {
        (h1_prime + h2_prime - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_bar_prime - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar_prime).to_radians().cos()
        + 0.32 * (3.0 * h_bar_prime + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar_prime - 63.0).to_radians().cos();

    let delta_theta = 30.0 * (-(((h_bar_prime - 275.0) / 25.0).powi(2))).exp();
    let r_c = 2.0 * (c_bar_prime.powi(7) / (c_bar_prime.powi(7) + 25f64.powi(7))).sqrt();
    let s_l = 1.0
        + (0.015 * (l_bar_prime - 50.0).powi(2)) / (20.0 + (l_bar_prime - 50.0).powi(2)).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_prime;
    let s_h = 1.0 + 0.015 * c_bar_prime * t;
    let r_t = -r_c * (2.0 * delta_theta.to_radians()).sin();

    let term_l = delta_l_prime / (k_l * s_l);
    let term_c = delta_c_prime / (k_c * s_c);
    let term_h = delta_big_h_prime / (k_h * s_h);

    (term_l.powi(2) + term_c.powi(2) + term_h.powi(2) + r_t * term_c * term_h).sqrt()
}

fn hue_angle_deg(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let mut h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h += 360.0;
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identical_colors_have_zero_difference() {
        let lab = Lab { l: 50.0, a: 10.0, b: -5.0 };
        assert_relative_eq!(delta_e_1976(lab, lab), 0.0, epsilon = 1e-12);
        assert_relative_eq!(delta_e_2000(lab, lab), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn delta_e_1976_matches_euclidean_distance() {
        let a = Lab { l: 50.0, a: 0.0, b: 0.0 };
        let b = Lab { l: 53.0, a: 4.0, b: 0.0 };
        assert_relative_eq!(delta_e_1976(a, b), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn delta_e_2000_reference_pair_1() {
        // Classic CIEDE2000 test-suite pair (Sharma, Wu & Dalal 2005, row 1).
        let a = Lab { l: 50.0000, a: 2.6772, b: -79.7751 };
        let b = Lab { l: 50.0000, a: 0.0000, b: -82.7485 };
        let de = delta_e_2000(a, b);
        assert_relative_eq!(de, 2.0425, epsilon = 5e-3);
    }

    #[test]
    fn delta_e_2000_reference_pair_2() {
        // Sharma, Wu & Dalal 2005, row 13 (large hue-angle-difference case).
        let a = Lab { l: 50.0000, a: 2.5000, b: 0.0000 };
        let b = Lab { l: 50.0000, a: -2.5000, b: 0.0000 };
        let de = delta_e_2000(a, b);
        assert_relative_eq!(de, 7.2195, epsilon = 5e-3);
    }

    #[test]
    fn larger_lab_distance_gives_larger_delta_e() {
        let base = Lab { l: 60.0, a: 10.0, b: 10.0 };
        let near = Lab { l: 61.0, a: 10.0, b: 10.0 };
        let far = Lab { l: 70.0, a: 10.0, b: 10.0 };
        assert!(delta_e_2000(base, near) < delta_e_2000(base, far));
    }
}
