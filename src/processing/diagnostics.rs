// src/processing/diagnostics.rs
//! Per-stage diagnostics hook
//!
//! Rendering frequency-response plots is left to the caller. The pipeline
//! only hands each designed stage to a [`DiagnosticsPlotter`] together with
//! the sampling rate and a title.

use tracing::info;

use super::filters::{FrequencyResponse, IirCoefficients};
use crate::config::constants::diagnostics::DEFAULT_RESPONSE_POINTS;

/// Receives every designed stage when diagnostics are enabled
pub trait DiagnosticsPlotter {
    fn plot(&mut self, coefficients: &IirCoefficients, sample_rate: f64, title: &str);
}

/// Discards everything, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPlotter;

impl DiagnosticsPlotter for NoopPlotter {
    fn plot(&mut self, _coefficients: &IirCoefficients, _sample_rate: f64, _title: &str) {}
}

/// Logs a frequency-response summary of each stage through `tracing`
#[derive(Debug, Clone)]
pub struct TracingPlotter {
    points: usize,
}

impl Default for TracingPlotter {
    fn default() -> Self {
        Self { points: DEFAULT_RESPONSE_POINTS }
    }
}

impl TracingPlotter {
    pub fn with_points(points: usize) -> Self {
        Self { points }
    }
}

impl DiagnosticsPlotter for TracingPlotter {
    fn plot(&mut self, coefficients: &IirCoefficients, sample_rate: f64, title: &str) {
        let response = FrequencyResponse::compute(coefficients, sample_rate, self.points);
        let min_gain_db = 20.0 * response.min_gain().max(f64::MIN_POSITIVE).log10();

        info!(
            title,
            sample_rate,
            taps = coefficients.b.len(),
            dc_gain = response.dc_gain(),
            cutoff_3db_hz = ?response.cutoff_3db(),
            min_gain_db,
            "Filter stage frequency response"
        );
    }
}

impl<P: DiagnosticsPlotter + ?Sized> DiagnosticsPlotter for Box<P> {
    fn plot(&mut self, coefficients: &IirCoefficients, sample_rate: f64, title: &str) {
        (**self).plot(coefficients, sample_rate, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plotters_accept_any_stage() {
        let coefficients = IirCoefficients { b: vec![0.5, 0.5], a: vec![1.0, 0.0] };
        NoopPlotter.plot(&coefficients, 100.0, "butter low (n=1; Fc=25)");
        TracingPlotter::with_points(16).plot(&coefficients, 100.0, "butter low (n=1; Fc=25)");

        let mut boxed: Box<dyn DiagnosticsPlotter> = Box::new(TracingPlotter::default());
        boxed.plot(&coefficients, 100.0, "boxed");
    }
}
