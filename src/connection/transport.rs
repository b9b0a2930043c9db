//! Seam between the connection manager and the network.

use super::error::TransportError;
use async_trait::async_trait;

/// An open duplex text-frame connection.
#[async_trait]
pub trait Transport: Send {
    /// Transmits one text frame.
    async fn send(&mut self, frame: String) -> Result<(), TransportError>;

    /// Waits for the next inbound text frame.
    ///
    /// Returns `None` once the remote side has closed the connection.
    async fn recv(&mut self) -> Option<Result<String, TransportError>>;

    /// Closes the connection. Errors are swallowed; the link is gone either way.
    async fn close(&mut self);
}

/// Opens transports to an endpoint.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Opens a connection to `url`.
    async fn connect(&self, url: &str) -> Result<Box<dyn Transport>, TransportError>;
}
