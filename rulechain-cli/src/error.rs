//! Error types for the rulechain CLI.

use rulechain_config::ConfigError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings or schema could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Record input is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// One or more records failed validation
    #[error("Validation failed: {0} invalid record(s)")]
    Invalid(usize),
}

impl CliError {
    /// `1` for failed validation, `2` for everything that kept the check
    /// from running.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Invalid(_) => 1,
            _ => 2,
        }
    }
}
