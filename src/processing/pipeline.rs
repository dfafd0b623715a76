// src/processing/pipeline.rs
//! Ordered filter pipeline
//!
//! Each stage is a pure step `(signal, spec) -> (signal', result)`; a run is a
//! fold of that step over the configured stages. Passthrough stages hand the
//! signal on untouched. A stage whose signal is too short for its order
//! yields an empty signal, and every later stage sees that empty signal.

use ndarray::{Array1, ArrayView1};
use tracing::debug;

use super::diagnostics::{DiagnosticsPlotter, TracingPlotter};
use super::filters::{ButterworthDesigner, NotchDesigner, ZeroPhaseFilter};
use super::spec::{FilterResult, FilterSpec};
use crate::config::PipelineConfig;
use crate::error::PhysioResult;
use crate::utils::conversion::AsSamples;
use crate::utils::validation::{validate_sample_rate, validate_samples, validate_spec};

/// Final signal plus one resolved result per stage
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub filtered: Vec<f64>,
    pub results: Vec<FilterResult>,
}

impl PipelineOutput {
    pub fn into_parts(self) -> (Vec<f64>, Vec<FilterResult>) {
        (self.filtered, self.results)
    }

    /// True once the length guard tripped in some stage
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Stage results as a JSON array, one object per stage
    pub fn results_json(&self) -> PhysioResult<String> {
        Ok(serde_json::to_string_pretty(&self.results)?)
    }
}

/// Runs an ordered list of filter stages over one signal
pub struct FilterPipeline {
    sample_rate: f64,
    stages: Vec<FilterSpec>,
    butterworth: ButterworthDesigner,
    plotter: Option<Box<dyn DiagnosticsPlotter>>,
}

impl FilterPipeline {
    pub fn new(sample_rate: f64, stages: Vec<FilterSpec>) -> Self {
        Self {
            sample_rate,
            stages,
            butterworth: ButterworthDesigner::default(),
            plotter: None,
        }
    }

    /// Build from configuration; diagnostics go to [`TracingPlotter`]
    pub fn from_config(config: &PipelineConfig) -> Self {
        let pipeline = Self::new(config.sample_rate_hz, config.stages.clone());
        if config.diagnostics {
            pipeline.with_plotter(TracingPlotter::default())
        } else {
            pipeline
        }
    }

    /// Send every designed stage to `plotter`
    pub fn with_plotter<P: DiagnosticsPlotter + 'static>(mut self, plotter: P) -> Self {
        self.plotter = Some(Box::new(plotter));
        self
    }

    pub fn with_designer(mut self, designer: ButterworthDesigner) -> Self {
        self.butterworth = designer;
        self
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn stages(&self) -> &[FilterSpec] {
        &self.stages
    }

    /// Filter `samples` through every stage in order
    ///
    /// Fails only on invalid parameters or a collapsed Butterworth design;
    /// in that case no partial results are returned.
    pub fn run<S: AsSamples + ?Sized>(&mut self, samples: &S) -> PhysioResult<PipelineOutput> {
        validate_sample_rate(self.sample_rate)?;
        let signal = samples.to_f64_vec();
        validate_samples(&signal)?;

        let stages = std::mem::take(&mut self.stages);
        let outcome = stages
            .iter()
            .try_fold((signal, Vec::with_capacity(stages.len())), |(signal, mut results), spec| -> PhysioResult<_> {
                let (next, result) = self.apply_stage(signal, spec)?;
                results.push(result);
                Ok((next, results))
            });
        self.stages = stages;

        let (filtered, results) = outcome?;
        Ok(PipelineOutput { filtered, results })
    }

    /// Same as [`FilterPipeline::run`] for `ndarray` input and output
    pub fn run_array<T: Copy + Into<f64>>(
        &mut self,
        samples: ArrayView1<'_, T>,
    ) -> PhysioResult<(Array1<f64>, Vec<FilterResult>)> {
        let output = self.run(&samples)?;
        Ok((Array1::from(output.filtered), output.results))
    }

    /// One stage: design the filter for `spec` and apply it to `signal`
    pub fn apply_stage(&mut self, signal: Vec<f64>, spec: &FilterSpec) -> PhysioResult<(Vec<f64>, FilterResult)> {
        validate_spec(spec, self.sample_rate)?;
        let nyquist = self.sample_rate / 2.0;

        let result = match *spec {
            FilterSpec::None => {
                debug!(len = signal.len(), "Passthrough stage");
                return Ok((signal, FilterResult::None));
            }

            FilterSpec::Butterworth { band, order, cutoff } => {
                let design = self
                    .butterworth
                    .design_adaptive(order, cutoff.normalized(nyquist), band)?;
                FilterResult::Butterworth {
                    band,
                    order: design.order,
                    requested_order: design.requested_order,
                    cutoff,
                    coefficients: design.coefficients,
                }
            }

            FilterSpec::Notch { pole_radius, cutoff } => {
                let coefficients = NotchDesigner::new(pole_radius).design(cutoff / nyquist);
                FilterResult::Notch {
                    pole_radius,
                    order: coefficients.order(),
                    cutoff,
                    coefficients,
                }
            }
        };

        let (coefficients, order) = match (result.coefficients(), result.order()) {
            (Some(coefficients), Some(order)) => (coefficients, order),
            _ => return Ok((signal, result)),
        };

        let filtered = ZeroPhaseFilter::new(coefficients, order).apply(&signal);
        debug!(
            name = result.name(),
            band = result.band_label(),
            order,
            input_len = signal.len(),
            output_len = filtered.len(),
            "Filter stage applied"
        );

        if let (Some(plotter), Some(title)) = (self.plotter.as_mut(), result.title()) {
            plotter.plot(coefficients, self.sample_rate, &title);
        }

        Ok((filtered, result))
    }
}

/// Filter `samples` at sampling rate `fs` through `specs` in order
///
/// With `diagnostics` set, every designed stage is summarized through
/// `tracing` at info level.
pub fn filter_pipeline<S: AsSamples + ?Sized>(
    samples: &S,
    fs: f64,
    specs: &[FilterSpec],
    diagnostics: bool,
) -> PhysioResult<(Vec<f64>, Vec<FilterResult>)> {
    let mut pipeline = FilterPipeline::new(fs, specs.to_vec());
    if diagnostics {
        pipeline = pipeline.with_plotter(TracingPlotter::default());
    }
    Ok(pipeline.run(samples)?.into_parts())
}
