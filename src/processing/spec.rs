// src/processing/spec.rs
//! Declarative stage requests and their resolved results

use serde::{Deserialize, Serialize};

use super::filters::{BandType, Cutoff, IirCoefficients};
use crate::config::constants::filters::DEFAULT_NOTCH_POLE_RADIUS;

/// One requested stage of the pipeline
///
/// Deserializes from `{ name = "butter", type = "low", n = 4, fc = 10.0 }`,
/// `{ name = "notch", fc = 50.0, b = 0.98 }` or `{ name = "none" }`. Any
/// unknown `name` becomes a passthrough stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum FilterSpec {
    #[serde(rename = "butter", alias = "butterworth")]
    Butterworth {
        #[serde(rename = "type")]
        band: BandType,
        #[serde(rename = "n")]
        order: usize,
        #[serde(rename = "fc")]
        cutoff: Cutoff,
    },

    #[serde(rename = "notch")]
    Notch {
        #[serde(rename = "b")]
        pole_radius: f64,
        #[serde(rename = "fc")]
        cutoff: f64,
    },

    #[serde(rename = "none", other)]
    None,
}

impl FilterSpec {
    pub fn butterworth(band: BandType, order: usize, cutoff: Cutoff) -> Self {
        FilterSpec::Butterworth { band, order, cutoff }
    }

    pub fn lowpass(order: usize, cutoff_hz: f64) -> Self {
        Self::butterworth(BandType::Lowpass, order, Cutoff::Single(cutoff_hz))
    }

    pub fn highpass(order: usize, cutoff_hz: f64) -> Self {
        Self::butterworth(BandType::Highpass, order, Cutoff::Single(cutoff_hz))
    }

    pub fn bandpass(order: usize, low_hz: f64, high_hz: f64) -> Self {
        Self::butterworth(BandType::Bandpass, order, Cutoff::Band(low_hz, high_hz))
    }

    pub fn bandstop(order: usize, low_hz: f64, high_hz: f64) -> Self {
        Self::butterworth(BandType::Bandstop, order, Cutoff::Band(low_hz, high_hz))
    }

    pub fn notch(cutoff_hz: f64, pole_radius: f64) -> Self {
        FilterSpec::Notch { pole_radius, cutoff: cutoff_hz }
    }

    /// Mains interference notch (50 or 60 Hz) at the default pole radius
    pub fn powerline_notch(mains_hz: f64) -> Self {
        Self::notch(mains_hz, DEFAULT_NOTCH_POLE_RADIUS)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterSpec::Butterworth { .. } => "butter",
            FilterSpec::Notch { .. } => "notch",
            FilterSpec::None => "none",
        }
    }
}

/// Resolved stage: the request plus the coefficients actually used
///
/// `order` of a Butterworth result may be lower than `requested_order`
/// when the design was reduced; a notch order is derived from its
/// coefficient lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum FilterResult {
    #[serde(rename = "butter")]
    Butterworth {
        #[serde(rename = "type")]
        band: BandType,
        #[serde(rename = "n")]
        order: usize,
        requested_order: usize,
        #[serde(rename = "fc")]
        cutoff: Cutoff,
        #[serde(flatten)]
        coefficients: IirCoefficients,
    },

    #[serde(rename = "notch")]
    Notch {
        #[serde(rename = "b")]
        pole_radius: f64,
        #[serde(rename = "n")]
        order: usize,
        #[serde(rename = "fc")]
        cutoff: f64,
        #[serde(flatten)]
        coefficients: IirCoefficients,
    },

    #[serde(rename = "none")]
    None,
}

impl FilterResult {
    pub fn name(&self) -> &'static str {
        match self {
            FilterResult::Butterworth { .. } => "butter",
            FilterResult::Notch { .. } => "notch",
            FilterResult::None => "none",
        }
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, FilterResult::None)
    }

    pub fn band(&self) -> Option<BandType> {
        match self {
            FilterResult::Butterworth { band, .. } => Some(*band),
            _ => None,
        }
    }

    /// Band label, empty for notch and passthrough stages
    pub fn band_label(&self) -> &'static str {
        self.band().map(|b| b.label()).unwrap_or("")
    }

    pub fn order(&self) -> Option<usize> {
        match self {
            FilterResult::Butterworth { order, .. } | FilterResult::Notch { order, .. } => Some(*order),
            FilterResult::None => None,
        }
    }

    /// Cutoff in Hz as requested
    pub fn cutoff(&self) -> Option<Cutoff> {
        match self {
            FilterResult::Butterworth { cutoff, .. } => Some(*cutoff),
            FilterResult::Notch { cutoff, .. } => Some(Cutoff::Single(*cutoff)),
            FilterResult::None => None,
        }
    }

    pub fn pole_radius(&self) -> Option<f64> {
        match self {
            FilterResult::Notch { pole_radius, .. } => Some(*pole_radius),
            _ => None,
        }
    }

    pub fn coefficients(&self) -> Option<&IirCoefficients> {
        match self {
            FilterResult::Butterworth { coefficients, .. } | FilterResult::Notch { coefficients, .. } => {
                Some(coefficients)
            }
            FilterResult::None => None,
        }
    }

    /// True when a Butterworth design ended below the requested order
    pub fn order_reduced(&self) -> bool {
        match self {
            FilterResult::Butterworth { order, requested_order, .. } => order < requested_order,
            _ => false,
        }
    }

    /// `"<name> <type> (n=<n>; Fc=<mean fc>)"`, none for passthrough stages
    pub fn title(&self) -> Option<String> {
        let order = self.order()?;
        let cutoff = self.cutoff()?;
        Some(format!(
            "{} {} (n={}; Fc={})",
            self.name(),
            self.band_label(),
            order,
            cutoff.mean()
        ))
    }
}
