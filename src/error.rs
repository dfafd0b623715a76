// src/error.rs
//! Unified error handling for the filter pipeline
//!
//! Only genuinely exceptional conditions live here. Passthrough stages and
//! signals too short to filter are reported as data in the pipeline output,
//! not as errors.

use std::collections::HashMap;
use thiserror::Error;

use crate::config::ConfigError;

/// Unified error type for the whole crate
#[derive(Debug, Error)]
pub enum PhysioError {
    /// Butterworth order reduction ran down to zero without a usable design
    #[error("bad Butterworth design: no usable numerator for any order in 1..={requested_order} ({})", .context.operation)]
    Design {
        requested_order: usize,
        context: ErrorContext,
    },

    /// Caller-side precondition violation
    #[error("invalid {parameter} = {value}: {reason} ({})", .context.operation)]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
        context: ErrorContext,
    },

    /// Configuration load or validation failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Result serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where an error was raised, for debugging
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
    pub additional_info: HashMap<String, String>,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            file: None,
            line: None,
            additional_info: HashMap::new(),
        }
    }

    /// Create error context with file and line information
    pub fn with_location(component: &str, operation: &str, file: &'static str, line: u32) -> Self {
        let mut context = Self::new(component, operation);
        context.file = Some(file);
        context.line = Some(line);
        context
    }

    /// Add additional information to the context
    pub fn add_info<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.additional_info.insert(key.into(), value.into());
        self
    }
}

/// Macro for creating error context with file and line info
#[macro_export]
macro_rules! error_context {
    ($component:expr, $operation:expr) => {
        $crate::error::ErrorContext::with_location($component, $operation, file!(), line!())
    };
}

impl PhysioError {
    /// Context attached to the error, if it carries one
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            PhysioError::Design { context, .. } => Some(context),
            PhysioError::InvalidParameter { context, .. } => Some(context),
            PhysioError::Config(_) | PhysioError::Serialization(_) => None,
        }
    }

    /// True for the fatal Butterworth order collapse
    pub fn is_design_failure(&self) -> bool {
        matches!(self, PhysioError::Design { .. })
    }
}

/// Result type alias for pipeline operations
pub type PhysioResult<T> = Result<T, PhysioError>;

/// Error builder for convenient error construction
pub struct PhysioErrorBuilder {
    component: String,
    operation: String,
}

impl PhysioErrorBuilder {
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn invalid_parameter(self, parameter: &str, value: impl ToString, reason: &str) -> PhysioError {
        PhysioError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
            context: ErrorContext::new(&self.component, &self.operation),
        }
    }
}
