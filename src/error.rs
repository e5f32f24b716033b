//! Error types module.
//!
//! This module defines the error types used throughout the edgemap
//! application. It uses `thiserror` for structured error handling and
//! provides a custom `Result` type alias for convenience.

use thiserror::Error;

/// A specialized `Result` type for edgemap operations.
///
/// This type is used throughout the crate to handle errors consistently.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the edgemap application.
///
/// Each variant represents a different category of error. Note that
/// per-address lookup failures and per-resolver query failures are not
/// represented here: those degrade to empty values at the call site and
/// never surface as an `Error`.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations, process spawning, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error (configuration files)
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error (report sink)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP client error (client construction, request building)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error (invalid config, missing files)
    #[error("Config error: {0}")]
    Config(String),

    /// Parse error (invalid input format, malformed data)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create a new configuration error with a message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new parse error with a message.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
