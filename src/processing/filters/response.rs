// src/processing/filters/response.rs
//! Frequency response of a designed filter

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

use super::IirCoefficients;

/// Complex response `H(e^{jw})` of `coefficients` at a normalized frequency
/// (1.0 = Nyquist)
pub fn response_at(coefficients: &IirCoefficients, normalized_freq: f64) -> Complex64 {
    // Polynomials in z^-1: evaluate with Horner on the reversed sequence
    let z_inv = Complex64::from_polar(1.0, -PI * normalized_freq);
    let eval = |c: &[f64]| {
        c.iter()
            .rev()
            .fold(Complex64::new(0.0, 0.0), |acc, &v| acc * z_inv + v)
    };
    eval(&coefficients.b) / eval(&coefficients.a)
}

/// Magnitude of the response at a normalized frequency
pub fn gain_at(coefficients: &IirCoefficients, normalized_freq: f64) -> f64 {
    response_at(coefficients, normalized_freq).norm()
}

/// Sampled frequency response on `[0, fs/2)`
#[derive(Debug, Clone)]
pub struct FrequencyResponse {
    pub frequencies_hz: Vec<f64>,
    pub response: Vec<Complex64>,
}

impl FrequencyResponse {
    /// Evaluate at `points` evenly spaced frequencies using an FFT of the
    /// zero-padded coefficient sequences
    pub fn compute(coefficients: &IirCoefficients, sample_rate: f64, points: usize) -> Self {
        let points = points.max(1);
        let fft_len = 2 * points;

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(fft_len);

        let spectrum = |c: &[f64]| {
            // Sequences longer than the FFT alias onto it, which samples the
            // same DTFT
            let mut buffer = vec![Complex64::new(0.0, 0.0); fft_len];
            for (i, &v) in c.iter().enumerate() {
                buffer[i % fft_len] += v;
            }
            fft.process(&mut buffer);
            buffer
        };

        let numerator = spectrum(&coefficients.b);
        let denominator = spectrum(&coefficients.a);

        let response = numerator
            .iter()
            .zip(&denominator)
            .take(points)
            .map(|(b, a)| b / a)
            .collect();
        let frequencies_hz = (0..points)
            .map(|i| i as f64 * sample_rate / fft_len as f64)
            .collect();

        Self { frequencies_hz, response }
    }

    pub fn magnitude(&self) -> Vec<f64> {
        self.response.iter().map(|h| h.norm()).collect()
    }

    pub fn magnitude_db(&self) -> Vec<f64> {
        self.response
            .iter()
            .map(|h| 20.0 * h.norm().max(f64::MIN_POSITIVE).log10())
            .collect()
    }

    pub fn dc_gain(&self) -> f64 {
        self.response.first().map(|h| h.norm()).unwrap_or(0.0)
    }

    pub fn min_gain(&self) -> f64 {
        self.response.iter().map(|h| h.norm()).fold(f64::INFINITY, f64::min)
    }

    /// First frequency where the magnitude crosses 3 dB below its peak
    pub fn cutoff_3db(&self) -> Option<f64> {
        let magnitude = self.magnitude();
        let peak = magnitude.iter().cloned().fold(0.0, f64::max);
        let level = peak * FRAC_1_SQRT_2;

        magnitude
            .windows(2)
            .position(|w| (w[0] - level).signum() != (w[1] - level).signum())
            .map(|i| self.frequencies_hz[i + 1])
    }
}
