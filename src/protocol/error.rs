//! Codec error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Inbound frame could not be decoded.
#[derive(Debug, Clone, Display, Error)]
#[display("Decode error: {} at {}:{}", message, file, line)]
pub struct DecodeError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DecodeError {
    /// Creates a new decode error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Invalid JSON: {}", err))
    }
}

/// Outbound intent could not be encoded.
#[derive(Debug, Clone, Display, Error)]
#[display("Encode error: {} at {}:{}", message, file, line)]
pub struct EncodeError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EncodeError {
    /// Creates a new encode error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for EncodeError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Serialization failed: {}", err))
    }
}
