//! Connection error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// The manager already owns a connection.
///
/// Calling `connect` twice without `close` is a programming error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Already connected to {}", url)]
pub struct AlreadyConnectedError {
    /// Endpoint of the connection that is still owned.
    pub url: String,
}

impl AlreadyConnectedError {
    /// Creates a new error naming the owned endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Socket-level failure.
#[derive(Debug, Clone, Display, Error)]
#[display("Transport error: {} at {}:{}", message, file, line)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TransportError {
    /// Creates a new transport error with caller location tracking.
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

impl From<tokio_tungstenite::tungstenite::Error> for TransportError {
    #[track_caller]
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::new(format!("WebSocket error: {}", err))
    }
}
