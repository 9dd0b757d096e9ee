//! Error types for signal generation, filtering and session control.

use thiserror::Error;

/// Result type for sinelab operations
pub type Result<T> = std::result::Result<T, LabError>;

/// Errors that can occur while generating, filtering or configuring signals
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabError {
    /// A parameter lies outside the range the operation accepts
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Two sequences that must share a time grid have different lengths
    #[error("length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl LabError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        LabError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LabError {
    fn from(err: serde_json::Error) -> Self {
        LabError::Config(err.to_string())
    }
}

impl From<std::io::Error> for LabError {
    fn from(err: std::io::Error) -> Self {
        LabError::Config(err.to_string())
    }
}
