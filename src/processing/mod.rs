// src/processing/mod.rs
//! Filter design and the offline zero-phase pipeline

pub mod diagnostics;
pub mod filters;
pub mod pipeline;
pub mod spec;

pub use diagnostics::{DiagnosticsPlotter, NoopPlotter, TracingPlotter};
pub use pipeline::{filter_pipeline, FilterPipeline, PipelineOutput};
pub use spec::{FilterResult, FilterSpec};
