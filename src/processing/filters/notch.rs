// src/processing/filters/notch.rs
//! Harmonic comb notch built by explicit pole/zero placement
//!
//! Follows the Challis & Kitney construction: a zero on the unit circle at
//! every harmonic of the fundamental up to Nyquist, with a pole at the same
//! angle and radius `b` just inside it. The gain is chosen for unity gain
//! at DC.

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;

use super::{product_of_differences, IirCoefficients, ZpkFilter};
use crate::config::constants::filters::HARMONIC_TOLERANCE;

/// Harmonic notch coefficient designer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotchDesigner {
    pole_radius: f64,
}

impl NotchDesigner {
    /// `pole_radius` must lie in (0, 1); closer to 1 gives narrower notches
    pub fn new(pole_radius: f64) -> Self {
        Self { pole_radius }
    }

    pub fn pole_radius(&self) -> f64 {
        self.pole_radius
    }

    /// Normalized harmonic frequencies `wn, 2wn, 3wn, ...` not above 1
    pub fn harmonics(wn: f64) -> Vec<f64> {
        if wn.is_nan() || wn <= 0.0 {
            return Vec::new();
        }

        let mut harmonics = Vec::new();
        let mut k = 1.0;
        while k * wn <= 1.0 + HARMONIC_TOLERANCE {
            harmonics.push((k * wn).min(1.0));
            k += 1.0;
        }
        harmonics
    }

    /// Zero/pole/gain form for fundamental `wn` (Nyquist-normalized)
    pub fn design_zpk(&self, wn: f64) -> ZpkFilter {
        let harmonics = Self::harmonics(wn);

        let unit_points: Vec<Complex64> = harmonics
            .iter()
            .map(|&w| Complex64::from_polar(1.0, PI * w))
            .chain(harmonics.iter().map(|&w| Complex64::from_polar(1.0, -PI * w)))
            .collect();

        let zeros = unit_points.clone();
        let poles: Vec<Complex64> = unit_points.iter().map(|&z| z * self.pole_radius).collect();

        // Magnitude of zeros over poles at z = 1
        let one = Complex64::new(1.0, 0.0);
        let k0 = product_of_differences(one, &zeros).norm() / product_of_differences(one, &poles).norm();

        ZpkFilter::new(zeros, poles, 1.0 / k0)
    }

    /// Transfer-function coefficients for fundamental `wn`
    ///
    /// There is no fallback for numerically degenerate designs; whatever the
    /// expansion produces is returned.
    pub fn design(&self, wn: f64) -> IirCoefficients {
        self.design_zpk(wn).to_transfer_function()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::filters::gain_at;

    #[test]
    fn test_harmonics_up_to_nyquist() {
        let harmonics = NotchDesigner::harmonics(0.2);
        assert_eq!(harmonics.len(), 5);
        assert!((harmonics[4] - 1.0).abs() < 1e-12);

        assert_eq!(NotchDesigner::harmonics(0.3).len(), 3);
        assert_eq!(NotchDesigner::harmonics(0.6), vec![0.6]);
    }

    #[test]
    fn test_harmonics_of_invalid_fundamental_are_empty() {
        assert!(NotchDesigner::harmonics(0.0).is_empty());
        assert!(NotchDesigner::harmonics(f64::NAN).is_empty());
    }

    #[test]
    fn test_unity_gain_at_dc() {
        let coefficients = NotchDesigner::new(0.98).design(0.2);
        assert!((gain_at(&coefficients, 0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_order_is_twice_harmonic_count() {
        let coefficients = NotchDesigner::new(0.98).design(0.2);
        assert_eq!(coefficients.order(), 10);
        assert_eq!(coefficients.b.len(), 11);
        assert_eq!(coefficients.a.len(), 11);
        assert_eq!(coefficients.a[0], 1.0);
    }

    #[test]
    fn test_harmonics_are_nulled() {
        let coefficients = NotchDesigner::new(0.95).design(0.1);
        for harmonic in NotchDesigner::harmonics(0.1) {
            assert!(gain_at(&coefficients, harmonic) < 1e-6, "harmonic {}", harmonic);
        }
        // Half way between harmonics the comb passes
        assert!(gain_at(&coefficients, 0.15) > 0.5);
    }

    #[test]
    fn test_poles_sit_inside_unit_circle() {
        let zpk = NotchDesigner::new(0.9).design_zpk(0.25);
        assert!(zpk.poles.iter().all(|p| (p.norm() - 0.9).abs() < 1e-12));
        assert!(zpk.zeros.iter().all(|z| (z.norm() - 1.0).abs() < 1e-12));
    }
}
