//! Error types for the configuration system

use code_assist_common::{ErrorSeverity, Severity};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration parsing failed
    #[error("Failed to parse configuration: {source}")]
    ParseError {
        #[source]
        source: Box<figment::Error>,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ValidationError { message: String },

    /// Current directory could not be determined
    #[error("Unable to determine current directory")]
    CurrentDirectoryNotFound,

    /// An allowed root is not usable
    #[error("Invalid allowed root '{}': {message}", .path.display())]
    InvalidRoot { path: PathBuf, message: String },
}

impl ConfigError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError {
            source: Box::new(error),
        }
    }
}

impl Severity for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ConfigError::CurrentDirectoryNotFound => ErrorSeverity::Critical,
            ConfigError::ParseError { .. }
            | ConfigError::ValidationError { .. }
            | ConfigError::InvalidRoot { .. } => ErrorSeverity::Error,
        }
    }
}
