//! CLI error types.

use thiserror::Error;

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by the `saw` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected lattice, trial count or policy.
    #[error(transparent)]
    Config(#[from] saw_engine::ConfigError),

    /// Configuration file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration values failed validation.
    #[error("Invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// JSON output failed.
    #[error("Failed to serialise output: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
