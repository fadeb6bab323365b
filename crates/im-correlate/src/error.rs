//! Error types for im-correlate

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for correlation operations
pub type Result<T> = std::result::Result<T, CorrelateError>;

/// Main error type for correlation operations
#[derive(Error, Debug)]
pub enum CorrelateError {
    /// A candidate's probe pattern could not be compiled
    #[error("Probe error for name {name:?}: {source}")]
    Probe {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration values are invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration text could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// Reading an input or config file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON input or output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Acceptance threshold is not a usable number
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// A pass multiplier is not a usable number
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
