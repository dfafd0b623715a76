// src/config/pipeline_config.rs
//! Pipeline configuration structures

use serde::{Deserialize, Serialize};

use crate::error::PhysioResult;
use crate::processing::FilterSpec;
use crate::utils::validation::{validate_sample_rate, validate_spec};

/// Sampling rate, diagnostics switch and ordered stage list
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PipelineConfig {
    #[serde(default = "defaults::sample_rate_hz")]
    pub sample_rate_hz: f64,

    #[serde(default = "defaults::diagnostics")]
    pub diagnostics: bool,

    #[serde(default)]
    pub stages: Vec<FilterSpec>,
}

mod defaults {
    use crate::config::constants::signal;

    pub fn sample_rate_hz() -> f64 { signal::DEFAULT_SAMPLE_RATE_HZ }
    pub fn diagnostics() -> bool { false }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: defaults::sample_rate_hz(),
            diagnostics: defaults::diagnostics(),
            stages: Vec::new(),
        }
    }
}

impl PipelineConfig {
    pub fn with_stage(mut self, stage: FilterSpec) -> Self {
        self.stages.push(stage);
        self
    }

    /// Stages that actually design a filter
    pub fn active_stages(&self) -> usize {
        self.stages.iter().filter(|s| !matches!(s, FilterSpec::None)).count()
    }
}

/// Check the sampling rate and every stage; the first violation wins
pub fn validate_pipeline_config(config: &PipelineConfig) -> PhysioResult<()> {
    validate_sample_rate(config.sample_rate_hz)?;
    config
        .stages
        .iter()
        .try_for_each(|stage| validate_spec(stage, config.sample_rate_hz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::signal::DEFAULT_SAMPLE_RATE_HZ;
    use crate::processing::filters::{BandType, Cutoff};

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.sample_rate_hz, DEFAULT_SAMPLE_RATE_HZ);
        assert!(!config.diagnostics);
        assert!(config.stages.is_empty());
        assert!(validate_pipeline_config(&config).is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: PipelineConfig = toml::from_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_stage_table_parsing() {
        let config: PipelineConfig = toml::from_str(
            r#"
            sample_rate_hz = 500.0
            diagnostics = true

            [[stages]]
            name = "butter"
            type = "bandpass"
            n = 2
            fc = [20, 150]

            [[stages]]
            name = "notch"
            fc = 50
            b = 0.98

            [[stages]]
            name = "none"
            "#,
        )
        .unwrap();

        assert_eq!(config.sample_rate_hz, 500.0);
        assert!(config.diagnostics);
        assert_eq!(
            config.stages,
            vec![
                FilterSpec::butterworth(BandType::Bandpass, 2, Cutoff::Band(20.0, 150.0)),
                FilterSpec::notch(50.0, 0.98),
                FilterSpec::None,
            ]
        );
        assert_eq!(config.active_stages(), 2);
        assert!(validate_pipeline_config(&config).is_ok());
    }

    #[test]
    fn test_first_violation_reported() {
        let config = PipelineConfig { sample_rate_hz: 100.0, ..Default::default() }
            .with_stage(FilterSpec::lowpass(2, 10.0))
            .with_stage(FilterSpec::notch(80.0, 0.9))
            .with_stage(FilterSpec::lowpass(0, 10.0));

        let err = validate_pipeline_config(&config).unwrap_err();
        assert!(err.to_string().contains("fc / (fs / 2)"));
    }

    #[test]
    fn test_bad_sample_rate_rejected() {
        let config = PipelineConfig { sample_rate_hz: -1.0, ..Default::default() };
        assert!(validate_pipeline_config(&config).is_err());
    }

    #[test]
    fn test_toml_export_round_trip() {
        let config = PipelineConfig::default()
            .with_stage(FilterSpec::highpass(4, 20.0))
            .with_stage(FilterSpec::notch(60.0, 0.95));
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: PipelineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
