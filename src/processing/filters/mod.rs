// src/processing/filters/mod.rs
//! Digital filter design and zero-phase application

pub mod butterworth;
pub mod notch;
pub mod response;
pub mod zero_phase;
pub mod zpk;

pub use butterworth::*;
pub use notch::*;
pub use response::*;
pub use zero_phase::*;
pub use zpk::*;

use serde::{Deserialize, Serialize};

/// Band characteristic of a Butterworth stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandType {
    #[serde(rename = "low", alias = "lowpass")]
    Lowpass,
    #[serde(rename = "high", alias = "highpass")]
    Highpass,
    #[serde(rename = "bandpass", alias = "pass")]
    Bandpass,
    #[serde(rename = "stop", alias = "bandstop")]
    Bandstop,
}

impl BandType {
    /// Short label used in diagnostics titles and serialized results
    pub fn label(&self) -> &'static str {
        match self {
            BandType::Lowpass => "low",
            BandType::Highpass => "high",
            BandType::Bandpass => "bandpass",
            BandType::Bandstop => "stop",
        }
    }

    /// Band-pass and band-stop need two edges
    pub fn needs_band_edges(&self) -> bool {
        matches!(self, BandType::Bandpass | BandType::Bandstop)
    }
}

/// Cutoff frequency: a single corner or a pair of band edges
///
/// Units are whatever the caller uses; the pipeline passes Hz here and
/// normalized frequencies to the designers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cutoff {
    Single(f64),
    Band(f64, f64),
}

impl Cutoff {
    /// Divide every edge by `nyquist`
    pub fn normalized(&self, nyquist: f64) -> Cutoff {
        match *self {
            Cutoff::Single(fc) => Cutoff::Single(fc / nyquist),
            Cutoff::Band(low, high) => Cutoff::Band(low / nyquist, high / nyquist),
        }
    }

    /// Arithmetic mean of the edges
    pub fn mean(&self) -> f64 {
        match *self {
            Cutoff::Single(fc) => fc,
            Cutoff::Band(low, high) => (low + high) / 2.0,
        }
    }

    pub fn edges(&self) -> Vec<f64> {
        match *self {
            Cutoff::Single(fc) => vec![fc],
            Cutoff::Band(low, high) => vec![low, high],
        }
    }
}

/// Transfer function coefficients, highest power first, `a[0] == 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IirCoefficients {
    #[serde(rename = "coef_num")]
    pub b: Vec<f64>, // Numerator coefficients
    #[serde(rename = "coef_den")]
    pub a: Vec<f64>, // Denominator coefficients
}

impl IirCoefficients {
    /// Build coefficients, scaling both sides so that `a[0] == 1`
    pub fn normalized(mut b: Vec<f64>, mut a: Vec<f64>) -> Self {
        if let Some(&a0) = a.first() {
            if a0 != 0.0 && a0 != 1.0 {
                b.iter_mut().for_each(|v| *v /= a0);
                a.iter_mut().for_each(|v| *v /= a0);
            }
        }
        Self { b, a }
    }

    /// Order implied by the coefficient lengths
    pub fn order(&self) -> usize {
        self.b.len().max(self.a.len()).saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_normalization() {
        assert_eq!(Cutoff::Single(10.0).normalized(50.0), Cutoff::Single(0.2));
        assert_eq!(Cutoff::Band(5.0, 25.0).normalized(50.0), Cutoff::Band(0.1, 0.5));
        assert_eq!(Cutoff::Band(5.0, 25.0).mean(), 15.0);
    }

    #[test]
    fn test_coefficients_normalize_leading_denominator() {
        let coefficients = IirCoefficients::normalized(vec![2.0, 4.0], vec![2.0, 1.0]);
        assert_eq!(coefficients.a, vec![1.0, 0.5]);
        assert_eq!(coefficients.b, vec![1.0, 2.0]);
        assert_eq!(coefficients.order(), 1);
    }

    #[test]
    fn test_band_type_serde_aliases() {
        let band: BandType = serde_json::from_str("\"lowpass\"").unwrap();
        assert_eq!(band, BandType::Lowpass);
        let band: BandType = serde_json::from_str("\"stop\"").unwrap();
        assert_eq!(band, BandType::Bandstop);
        assert_eq!(serde_json::to_string(&BandType::Highpass).unwrap(), "\"high\"");
    }

    #[test]
    fn test_cutoff_deserializes_scalar_or_pair() {
        let single: Cutoff = serde_json::from_str("10.0").unwrap();
        assert_eq!(single, Cutoff::Single(10.0));
        let band: Cutoff = serde_json::from_str("[1.0, 40.0]").unwrap();
        assert_eq!(band, Cutoff::Band(1.0, 40.0));
    }
}
