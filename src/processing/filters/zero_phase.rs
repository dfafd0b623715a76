// src/processing/filters/zero_phase.rs
//! Forward-backward (zero-phase) IIR filtering

use tracing::warn;

use super::IirCoefficients;
use crate::config::constants::filters::LENGTH_GUARD_FACTOR;

/// Applies a filter forward then backward so the phase cancels and the
/// magnitude response is squared.
///
/// Holds no signal state; every call to [`ZeroPhaseFilter::apply`] starts
/// from steady-state initial conditions scaled to the signal edges.
#[derive(Debug, Clone)]
pub struct ZeroPhaseFilter {
    b: Vec<f64>,
    a: Vec<f64>,
    order: usize,
}

impl ZeroPhaseFilter {
    /// `order` is the stage's resolved order and only drives the length
    /// guard; padding is sized from the coefficient lengths.
    pub fn new(coefficients: &IirCoefficients, order: usize) -> Self {
        let normalized = IirCoefficients::normalized(coefficients.b.clone(), coefficients.a.clone());
        let taps = normalized.b.len().max(normalized.a.len()).max(1);

        let mut b = normalized.b;
        let mut a = normalized.a;
        b.resize(taps, 0.0);
        a.resize(taps, 0.0);

        Self { b, a, order }
    }

    /// Signals must be strictly longer than this to be filtered
    pub fn min_length(&self) -> usize {
        LENGTH_GUARD_FACTOR * self.order
    }

    /// Number of samples reflected onto each end of a signal of `len`
    pub fn pad_length(&self, len: usize) -> usize {
        (LENGTH_GUARD_FACTOR * self.b.len()).min(len.saturating_sub(1))
    }

    /// Filter `samples`, or return an empty vector when the signal is too
    /// short for the order
    pub fn apply(&self, samples: &[f64]) -> Vec<f64> {
        if samples.len() <= self.min_length() {
            warn!(
                len = samples.len(),
                order = self.order,
                "Signal too short for zero-phase filtering, producing no output"
            );
            return Vec::new();
        }

        let padlen = self.pad_length(samples.len());
        let extended = odd_extension(samples, padlen);
        let zi = self.steady_state();

        let forward_init: Vec<f64> = zi.iter().map(|z| z * extended[0]).collect();
        let mut y = self.lfilter(&extended, forward_init);

        y.reverse();
        let backward_init: Vec<f64> = zi.iter().map(|z| z * y[0]).collect();
        let mut y = self.lfilter(&y, backward_init);
        y.reverse();

        y[padlen..padlen + samples.len()].to_vec()
    }

    /// Transposed direct form II recursion starting from state `z`
    fn lfilter(&self, x: &[f64], mut z: Vec<f64>) -> Vec<f64> {
        let (b, a) = (&self.b, &self.a);
        let state_len = z.len();

        x.iter()
            .map(|&xi| {
                let yi = b[0] * xi + z.first().copied().unwrap_or(0.0);
                for k in 0..state_len {
                    let next = if k + 1 < state_len { z[k + 1] } else { 0.0 };
                    z[k] = b[k + 1] * xi - a[k + 1] * yi + next;
                }
                yi
            })
            .collect()
    }

    /// Delay-line state of the filter after a unit step has settled
    pub fn steady_state(&self) -> Vec<f64> {
        let state_len = self.b.len() - 1;
        let a_sum: f64 = self.a.iter().sum();
        if state_len == 0 || a_sum.abs() < f64::EPSILON {
            return vec![0.0; state_len];
        }
        let dc_gain = self.b.iter().sum::<f64>() / a_sum;

        // zi[k] = sum over j > k of (b[j] - a[j] * G)
        let mut zi = vec![0.0; state_len];
        let mut acc = 0.0;
        for k in (0..state_len).rev() {
            acc += self.b[k + 1] - self.a[k + 1] * dc_gain;
            zi[k] = acc;
        }
        zi
    }
}

/// Zero-phase filter `samples` with `coefficients`; empty when
/// `samples.len() <= 3 * order`
pub fn filtfilt(coefficients: &IirCoefficients, samples: &[f64], order: usize) -> Vec<f64> {
    ZeroPhaseFilter::new(coefficients, order).apply(samples)
}

/// Point-reflect `padlen` samples about each end of the signal
pub fn odd_extension(samples: &[f64], padlen: usize) -> Vec<f64> {
    let len = samples.len();
    if len == 0 || padlen == 0 {
        return samples.to_vec();
    }

    let first = samples[0];
    let last = samples[len - 1];

    let mut extended = Vec::with_capacity(len + 2 * padlen);
    extended.extend((1..=padlen).rev().map(|i| 2.0 * first - samples[i]));
    extended.extend_from_slice(samples);
    extended.extend((1..=padlen).map(|i| 2.0 * last - samples[len - 1 - i]));
    extended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::filters::{BandType, ButterworthDesigner, Cutoff};
    use std::f64::consts::PI;

    fn lowpass(order: usize, wn: f64) -> IirCoefficients {
        ButterworthDesigner::design(order, Cutoff::Single(wn), BandType::Lowpass).unwrap()
    }

    fn sine(len: usize, normalized_freq: f64) -> Vec<f64> {
        (0..len).map(|i| (PI * normalized_freq * i as f64).sin()).collect()
    }

    #[test]
    fn test_length_guard_boundary() {
        let coefficients = lowpass(4, 0.2);
        assert!(filtfilt(&coefficients, &vec![1.0; 12], 4).is_empty());
        assert_eq!(filtfilt(&coefficients, &vec![1.0; 13], 4).len(), 13);
    }

    #[test]
    fn test_empty_input_stays_empty() {
        let coefficients = lowpass(2, 0.2);
        assert!(filtfilt(&coefficients, &[], 2).is_empty());
    }

    #[test]
    fn test_odd_extension() {
        let extended = odd_extension(&[1.0, 2.0, 4.0, 7.0], 2);
        assert_eq!(extended, vec![-2.0, 0.0, 1.0, 2.0, 4.0, 7.0, 10.0, 12.0]);
    }

    #[test]
    fn test_steady_state_first_order() {
        let filter = ZeroPhaseFilter::new(&IirCoefficients { b: vec![0.5, 0.5], a: vec![1.0, 0.0] }, 1);
        assert_eq!(filter.steady_state(), vec![0.5]);
    }

    #[test]
    fn test_constant_signal_passes_unchanged() {
        let coefficients = lowpass(4, 0.1);
        let output = filtfilt(&coefficients, &vec![3.5; 200], 4);
        assert!(output.iter().all(|y| (y - 3.5).abs() < 1e-9));
    }

    #[test]
    fn test_passband_sine_keeps_phase() {
        let input = sine(1000, 0.01);
        let output = filtfilt(&lowpass(4, 0.2), &input, 4);
        assert_eq!(output.len(), input.len());

        let max_error = input[100..900]
            .iter()
            .zip(&output[100..900])
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max);
        assert!(max_error < 1e-3, "max error {}", max_error);
    }

    #[test]
    fn test_stopband_sine_is_removed() {
        let input = sine(1000, 0.8);
        let output = filtfilt(&lowpass(4, 0.2), &input, 4);

        let peak = output[100..900].iter().map(|y| y.abs()).fold(0.0, f64::max);
        assert!(peak < 1e-3, "residual peak {}", peak);
    }

    #[test]
    fn test_unnormalized_denominator_is_scaled() {
        let coefficients = lowpass(2, 0.3);
        let scaled = IirCoefficients {
            b: coefficients.b.iter().map(|v| v * 4.0).collect(),
            a: coefficients.a.iter().map(|v| v * 4.0).collect(),
        };
        let input = sine(300, 0.05);
        let reference = filtfilt(&coefficients, &input, 2);
        let output = filtfilt(&scaled, &input, 2);
        assert!(reference.iter().zip(&output).all(|(r, y)| (r - y).abs() < 1e-12));
    }
}
