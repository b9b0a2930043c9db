//! Connection lifecycle: one owned relay connection per client.

mod error;
mod manager;
mod transport;
mod websocket;

pub use error::{AlreadyConnectedError, TransportError};
pub use manager::{ConnectionEvent, ConnectionManager, ConnectionState};
pub use transport::{Connector, Transport};
pub use websocket::{WebSocketConnector, WebSocketTransport};
