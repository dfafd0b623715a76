// src/config/loader.rs
//! Layered configuration loader
//!
//! Sources are applied in order: built-in defaults, each TOML file that
//! exists (later files win), then `PHYSIO_*` environment variables. The
//! merged result is validated before it is handed out.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::constants::ENV_PREFIX;
use crate::config::pipeline_config::{validate_pipeline_config, PipelineConfig};

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Configuration parse error: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

impl From<::config::ConfigError> for ConfigError {
    fn from(err: ::config::ConfigError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Pipeline configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    use_environment: bool,
}

impl ConfigLoader {
    /// Loader over the default search paths
    pub fn new() -> Self {
        Self::with_paths(Self::discover_config_paths())
    }

    /// Create loader with custom paths
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            use_environment: true,
        }
    }

    /// Skip `PHYSIO_*` environment overrides
    pub fn without_environment(mut self) -> Self {
        self.use_environment = false;
        self
    }

    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Merge every source and validate the result
    ///
    /// Missing files are skipped; use [`ConfigLoader::load_file`] when the
    /// file must exist.
    pub fn load(&self) -> Result<PipelineConfig, ConfigError> {
        let mut builder = Config::builder();

        for path in &self.config_paths {
            if path.exists() {
                debug!(path = %path.display(), "Merging configuration file");
                builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
            }
        }

        if self.use_environment {
            builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        }

        let config: PipelineConfig = builder.build()?.try_deserialize()?;
        Self::validated(config)
    }

    /// Load a single file that must exist, then apply environment overrides
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<PipelineConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        Self { config_paths: vec![path.to_path_buf()], ..self.clone() }.load()
    }

    /// Parse and validate a TOML document, without environment overrides
    pub fn load_from_str(content: &str) -> Result<PipelineConfig, ConfigError> {
        let config: PipelineConfig = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Self::validated(config)
    }

    /// Write `config` as pretty TOML
    pub fn export_config<P: AsRef<Path>>(path: P, config: &PipelineConfig) -> Result<(), ConfigError> {
        let toml_content =
            toml::to_string_pretty(config).map_err(|e| ConfigError::Parse(e.to_string()))?;

        std::fs::write(path, toml_content)?;
        Ok(())
    }

    fn validated(config: PipelineConfig) -> Result<PipelineConfig, ConfigError> {
        validate_pipeline_config(&config).map_err(|e| ConfigError::Validation(e.to_string()))?;
        info!(
            sample_rate_hz = config.sample_rate_hz,
            stages = config.stages.len(),
            diagnostics = config.diagnostics,
            "Pipeline configuration loaded"
        );
        Ok(config)
    }

    fn discover_config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("config/default.toml"),
            PathBuf::from("config/local.toml"),
            PathBuf::from("physio-filter.toml"),
        ]
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
