// src/config/mod.rs
//! Pipeline configuration: constants, serde structures and the layered loader

pub mod constants;
pub mod loader;
pub mod pipeline_config;

pub use loader::{ConfigError, ConfigLoader};
pub use pipeline_config::{validate_pipeline_config, PipelineConfig};
