//! Common utility functions
//!
//! - Precondition checks for sampling rates, signals and stage requests
//! - Sample type coercion into double precision

pub mod conversion;
pub mod validation;

pub use conversion::{to_f64_samples, AsSamples};

pub use validation::{
    validate_sample_rate,
    validate_samples,
    validate_spec,
    validate_unit_interval,
};
