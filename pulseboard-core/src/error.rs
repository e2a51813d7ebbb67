//! Error types for pulseboard-core

use thiserror::Error;

/// Main error type for the pulseboard-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or empty analytics input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Advisor relay error (upstream model API or transport)
    #[error("relay error: {0}")]
    Relay(String),

    /// Export error
    #[error("export error: {0}")]
    Export(String),
}

/// Result type alias for pulseboard-core
pub type Result<T> = std::result::Result<T, Error>;
