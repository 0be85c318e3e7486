//! Error types for the CLI

use abacus::theme::ThemeError;
use abacus::{Failure, SessionError};
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Expression could not be evaluated
    #[error("{0}")]
    Evaluation(#[from] Failure),

    /// Calculator session error
    #[error("{0}")]
    Session(#[from] SessionError),

    /// Theme preference could not be read or written
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    /// Config file is not valid YAML
    #[error("Configuration error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON output could not be produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
