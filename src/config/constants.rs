// src/config/constants.rs
//! Filter design and pipeline constants

/// Signal constants
pub mod signal {
    pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 1000.0;
}

/// Filter design constants
pub mod filters {
    /// Butterworth designs whose numerator is entirely below this are redesigned
    /// at a lower order
    pub const NUMERATOR_EPSILON: f64 = 1e-6;

    /// Zero-phase filtering needs more than this many samples per order
    pub const LENGTH_GUARD_FACTOR: usize = 3;

    /// Slack when deciding whether a harmonic lands on Nyquist
    pub const HARMONIC_TOLERANCE: f64 = 1e-10;

    pub const MIN_FILTER_ORDER: usize = 1;
    pub const POWERLINE_FREQ_50HZ: f64 = 50.0;
    pub const POWERLINE_FREQ_60HZ: f64 = 60.0;
    pub const DEFAULT_NOTCH_POLE_RADIUS: f64 = 0.98;
}

/// Diagnostics constants
pub mod diagnostics {
    pub const DEFAULT_RESPONSE_POINTS: usize = 512;
}

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "PHYSIO";
