// src/processing/filters/butterworth.rs
//! Butterworth IIR design with adaptive order reduction
//!
//! Coefficients come from the analog prototype: poles on the left half of
//! the unit circle, a band transform at the pre-warped corner(s), then the
//! bilinear transform. Everything is computed at a nominal sampling rate of
//! 2 so that cutoffs are Nyquist-normalized.

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{product_of_differences, BandType, Cutoff, IirCoefficients, ZpkFilter};
use crate::config::constants::filters::NUMERATOR_EPSILON;
use crate::error::{PhysioError, PhysioErrorBuilder, PhysioResult};
use crate::error_context;

/// Sampling rate the design is carried out at (Nyquist = 1)
const DESIGN_SAMPLE_RATE: f64 = 2.0;

/// Outcome of an adaptive design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButterworthDesign {
    pub coefficients: IirCoefficients,
    pub order: usize,
    pub requested_order: usize,
}

impl ButterworthDesign {
    pub fn order_reduced(&self) -> bool {
        self.order < self.requested_order
    }
}

/// Butterworth coefficient designer
#[derive(Debug, Clone)]
pub struct ButterworthDesigner {
    epsilon: f64,
}

impl Default for ButterworthDesigner {
    fn default() -> Self {
        Self { epsilon: NUMERATOR_EPSILON }
    }
}

impl ButterworthDesigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the numerator magnitude threshold below which a design is
    /// treated as degenerate
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Design at `requested_order`, stepping the order down while every
    /// numerator coefficient is below epsilon.
    ///
    /// `wn` must be Nyquist-normalized. Fails with [`PhysioError::Design`]
    /// once no order down to 1 yields a usable numerator.
    pub fn design_adaptive(
        &self,
        requested_order: usize,
        wn: Cutoff,
        band: BandType,
    ) -> PhysioResult<ButterworthDesign> {
        let mut order = requested_order;

        while order > 0 {
            let coefficients = Self::design(order, wn, band)?;

            if coefficients.b.iter().any(|c| c.abs() >= self.epsilon) {
                if order < requested_order {
                    warn!(
                        requested_order,
                        order,
                        wn = ?wn,
                        band = band.label(),
                        "Butterworth order reduced to obtain a well-scaled design"
                    );
                }
                return Ok(ButterworthDesign {
                    coefficients,
                    order,
                    requested_order,
                });
            }

            debug!(order, "Butterworth numerator underflow, retrying at lower order");
            order -= 1;
        }

        Err(PhysioError::Design {
            requested_order,
            context: error_context!("butterworth", "design_adaptive")
                .add_info("wn", format!("{:?}", wn))
                .add_info("band", band.label()),
        })
    }

    /// Single design at a fixed order, no order reduction
    pub fn design(order: usize, wn: Cutoff, band: BandType) -> PhysioResult<IirCoefficients> {
        Ok(Self::design_zpk(order, wn, band)?.to_transfer_function())
    }

    /// Digital zero/pole/gain form of the filter
    pub fn design_zpk(order: usize, wn: Cutoff, band: BandType) -> PhysioResult<ZpkFilter> {
        let prototype = Self::analog_prototype(order);

        let analog = match (band, wn) {
            (BandType::Lowpass, Cutoff::Single(w)) => lowpass_to_lowpass(&prototype, prewarp(w)),
            (BandType::Highpass, Cutoff::Single(w)) => lowpass_to_highpass(&prototype, prewarp(w)),
            (BandType::Bandpass, Cutoff::Band(low, high)) => {
                let (wo, bw) = band_center(prewarp(low), prewarp(high));
                lowpass_to_bandpass(&prototype, wo, bw)
            }
            (BandType::Bandstop, Cutoff::Band(low, high)) => {
                let (wo, bw) = band_center(prewarp(low), prewarp(high));
                lowpass_to_bandstop(&prototype, wo, bw)
            }
            (band, wn) => {
                let expected = if band.needs_band_edges() { "two band edges" } else { "a single cutoff" };
                return Err(PhysioErrorBuilder::new("butterworth", "design")
                    .invalid_parameter("fc", format!("{:?}", wn), &format!("{} filter needs {}", band.label(), expected)));
            }
        };

        Ok(bilinear(&analog, DESIGN_SAMPLE_RATE))
    }

    /// Analog prototype of `order` with unit cutoff: no zeros, unit gain
    pub fn analog_prototype(order: usize) -> ZpkFilter {
        let n = order as f64;
        let poles = (0..order)
            .map(|i| {
                let m = -(n - 1.0) + 2.0 * i as f64;
                -Complex64::from_polar(1.0, PI * m / (2.0 * n))
            })
            .collect();
        ZpkFilter::new(Vec::new(), poles, 1.0)
    }
}

/// Pre-warp a normalized frequency for the bilinear transform
fn prewarp(wn: f64) -> f64 {
    2.0 * DESIGN_SAMPLE_RATE * (PI * wn / DESIGN_SAMPLE_RATE).tan()
}

/// Geometric center and width of a band
fn band_center(low: f64, high: f64) -> (f64, f64) {
    ((low * high).sqrt(), high - low)
}

fn zero_point() -> Complex64 {
    Complex64::new(0.0, 0.0)
}

/// Real part of `prod(-zeros) / prod(-poles)`
fn reciprocal_gain_factor(zpk: &ZpkFilter) -> f64 {
    (product_of_differences(zero_point(), &zpk.zeros) / product_of_differences(zero_point(), &zpk.poles)).re
}

fn lowpass_to_lowpass(prototype: &ZpkFilter, wo: f64) -> ZpkFilter {
    let degree = prototype.relative_degree() as i32;
    ZpkFilter::new(
        prototype.zeros.iter().map(|&z| z * wo).collect(),
        prototype.poles.iter().map(|&p| p * wo).collect(),
        prototype.gain * wo.powi(degree),
    )
}

fn lowpass_to_highpass(prototype: &ZpkFilter, wo: f64) -> ZpkFilter {
    let degree = prototype.relative_degree();
    let mut zeros: Vec<Complex64> = prototype.zeros.iter().map(|&z| wo / z).collect();
    let poles = prototype.poles.iter().map(|&p| wo / p).collect();

    // Zeros at infinity map to the origin
    zeros.extend(std::iter::repeat(zero_point()).take(degree));

    ZpkFilter::new(zeros, poles, prototype.gain * reciprocal_gain_factor(prototype))
}

/// Split each root `r` into `r ± sqrt(r^2 - wo^2)`
fn split_roots(roots: &[Complex64], wo: f64) -> Vec<Complex64> {
    let wo2 = Complex64::new(wo * wo, 0.0);
    let plus = roots.iter().map(|&r| r + (r * r - wo2).sqrt());
    let minus = roots.iter().map(|&r| r - (r * r - wo2).sqrt());
    plus.chain(minus).collect()
}

fn lowpass_to_bandpass(prototype: &ZpkFilter, wo: f64, bw: f64) -> ZpkFilter {
    let degree = prototype.relative_degree();
    let scaled_zeros: Vec<Complex64> = prototype.zeros.iter().map(|&z| z * (bw / 2.0)).collect();
    let scaled_poles: Vec<Complex64> = prototype.poles.iter().map(|&p| p * (bw / 2.0)).collect();

    let mut zeros = split_roots(&scaled_zeros, wo);
    let poles = split_roots(&scaled_poles, wo);
    zeros.extend(std::iter::repeat(zero_point()).take(degree));

    ZpkFilter::new(zeros, poles, prototype.gain * bw.powi(degree as i32))
}

fn lowpass_to_bandstop(prototype: &ZpkFilter, wo: f64, bw: f64) -> ZpkFilter {
    let degree = prototype.relative_degree();
    let half_bw = Complex64::new(bw / 2.0, 0.0);
    let inverted_zeros: Vec<Complex64> = prototype.zeros.iter().map(|&z| half_bw / z).collect();
    let inverted_poles: Vec<Complex64> = prototype.poles.iter().map(|&p| half_bw / p).collect();

    let mut zeros = split_roots(&inverted_zeros, wo);
    let poles = split_roots(&inverted_poles, wo);

    // Zeros at infinity land on the band center
    zeros.extend(std::iter::repeat(Complex64::new(0.0, wo)).take(degree));
    zeros.extend(std::iter::repeat(Complex64::new(0.0, -wo)).take(degree));

    ZpkFilter::new(zeros, poles, prototype.gain * reciprocal_gain_factor(prototype))
}

/// Bilinear transform from the s-plane to the z-plane
fn bilinear(analog: &ZpkFilter, sample_rate: f64) -> ZpkFilter {
    let fs2 = Complex64::new(2.0 * sample_rate, 0.0);
    let degree = analog.relative_degree();

    let mut zeros: Vec<Complex64> = analog.zeros.iter().map(|&z| (fs2 + z) / (fs2 - z)).collect();
    let poles = analog.poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();

    // Zeros at infinity map to Nyquist
    zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(degree));

    let gain = analog.gain
        * (product_of_differences(fs2, &analog.zeros) / product_of_differences(fs2, &analog.poles)).re;

    ZpkFilter::new(zeros, poles, gain)
}
