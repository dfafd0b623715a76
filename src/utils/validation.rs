// src/utils/validation.rs
//! Precondition checks for pipeline inputs
//!
//! The designers assume normalized cutoffs in (0, 1), pole radii in (0, 1)
//! and orders of at least one. These checks run before any design so that a
//! violation surfaces as [`PhysioError::InvalidParameter`] instead of a
//! meaningless filter. Passthrough stages are never rejected.

use crate::config::constants::filters::MIN_FILTER_ORDER;
use crate::error::{PhysioError, PhysioErrorBuilder, PhysioResult};
use crate::processing::filters::{BandType, Cutoff};
use crate::processing::FilterSpec;

fn invalid(operation: &str, parameter: &str, value: impl ToString, reason: &str) -> PhysioError {
    PhysioErrorBuilder::new("validation", operation).invalid_parameter(parameter, value, reason)
}

/// Sampling rate must be finite and positive
pub fn validate_sample_rate(sample_rate: f64) -> PhysioResult<()> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(invalid(
            "validate_sample_rate",
            "fs",
            sample_rate,
            "sampling rate must be a positive finite number",
        ));
    }
    Ok(())
}

/// Input must contain at least one sample
pub fn validate_samples(samples: &[f64]) -> PhysioResult<()> {
    if samples.is_empty() {
        return Err(invalid("validate_samples", "samples", 0, "input signal is empty"));
    }
    Ok(())
}

/// Value strictly inside (0, 1)
pub fn validate_unit_interval(parameter: &str, value: f64, reason: &str) -> PhysioResult<()> {
    if value.is_nan() || value <= 0.0 || value >= 1.0 {
        return Err(invalid("validate_unit_interval", parameter, value, reason));
    }
    Ok(())
}

/// Check a stage request against the sampling rate
pub fn validate_spec(spec: &FilterSpec, sample_rate: f64) -> PhysioResult<()> {
    let nyquist = sample_rate / 2.0;

    match spec {
        FilterSpec::None => Ok(()),

        FilterSpec::Butterworth { band, order, cutoff } => {
            validate_order(*order)?;
            validate_cutoff_shape(*band, cutoff)?;
            validate_normalized_cutoff(cutoff, nyquist)?;

            if let Cutoff::Band(low, high) = cutoff {
                if low >= high {
                    return Err(invalid(
                        "validate_spec",
                        "fc",
                        format!("[{}, {}]", low, high),
                        "band edges must be in ascending order",
                    ));
                }
            }
            Ok(())
        }

        FilterSpec::Notch { pole_radius, cutoff } => {
            validate_unit_interval("b", *pole_radius, "pole radius must lie in (0, 1)")?;
            validate_normalized_cutoff(&Cutoff::Single(*cutoff), nyquist)
        }
    }
}

fn validate_order(order: usize) -> PhysioResult<()> {
    if order < MIN_FILTER_ORDER {
        return Err(invalid("validate_spec", "n", order, "filter order must be at least 1"));
    }
    Ok(())
}

fn validate_cutoff_shape(band: BandType, cutoff: &Cutoff) -> PhysioResult<()> {
    let edges = cutoff.edges().len();
    let expected = if band.needs_band_edges() { 2 } else { 1 };
    if edges != expected {
        return Err(invalid(
            "validate_spec",
            "fc",
            format!("{:?}", cutoff.edges()),
            &format!("{} filter needs {} cutoff value(s)", band.label(), expected),
        ));
    }
    Ok(())
}

fn validate_normalized_cutoff(cutoff: &Cutoff, nyquist: f64) -> PhysioResult<()> {
    for edge in cutoff.normalized(nyquist).edges() {
        validate_unit_interval("fc / (fs / 2)", edge, "normalized cutoff must lie in (0, 1)")?;
    }
    Ok(())
}
