//! physio-filter: offline zero-phase filtering for physiological signals
//!
//! This library designs and applies a chain of filters to a recorded
//! single-channel signal such as EMG or ECG. It features:
//!
//! - Butterworth low/high/band-pass/band-stop design with automatic order
//!   reduction when a narrow cutoff makes the numerator vanish
//! - Harmonic notch filters for powerline interference
//! - Forward-backward (zero-phase) application with odd-extension padding
//! - TOML/environment configuration and JSON-serializable stage results
//!
//! # Quick Start
//!
//! ```rust
//! use physio_filter::{filter_pipeline, FilterSpec};
//!
//! fn main() -> Result<(), physio_filter::PhysioError> {
//!     let fs = 500.0;
//!     let signal: Vec<f64> = (0..2000)
//!         .map(|i| (2.0 * std::f64::consts::PI * 5.0 * i as f64 / fs).sin())
//!         .collect();
//!
//!     let stages = [
//!         FilterSpec::bandpass(2, 1.0, 100.0),
//!         FilterSpec::notch(50.0, 0.98),
//!     ];
//!     let (filtered, results) = filter_pipeline(&signal, fs, &stages, false)?;
//!
//!     assert_eq!(filtered.len(), signal.len());
//!     assert_eq!(results[1].order(), Some(10));
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod error;
pub mod processing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::config::{ConfigError, ConfigLoader, PipelineConfig};
pub use error::{ErrorContext, PhysioError, PhysioResult};
pub use processing::filters::{BandType, Cutoff, IirCoefficients};
pub use processing::{
    filter_pipeline, DiagnosticsPlotter, FilterPipeline, FilterResult, FilterSpec, NoopPlotter,
    PipelineOutput, TracingPlotter,
};
pub use utils::conversion::AsSamples;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Offline zero-phase filter pipeline for physiological signals".to_string(),
        features: vec![
            "Adaptive-order Butterworth design".to_string(),
            "Harmonic notch filters".to_string(),
            "Zero-phase forward-backward filtering".to_string(),
            "Layered TOML and environment configuration".to_string(),
        ],
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// List of features
    pub features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert_eq!(info.name, NAME);
        assert_eq!(info.version, VERSION);
        assert!(!info.features.is_empty());
    }

    #[test]
    fn test_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "physio-filter");
    }
}
