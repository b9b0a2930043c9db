//! WebSocket transport backed by tokio-tungstenite.

use super::error::TransportError;
use super::transport::{Connector, Transport};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, info, instrument, warn};

/// Opens WebSocket connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketConnector;

#[async_trait]
impl Connector for WebSocketConnector {
    #[instrument(skip(self))]
    async fn connect(&self, url: &str) -> Result<Box<dyn Transport>, TransportError> {
        info!("Opening WebSocket");
        let (stream, response) = connect_async(url).await?;
        info!(status = %response.status(), "WebSocket handshake complete");
        Ok(Box::new(WebSocketTransport { stream }))
    }
}

/// One open WebSocket.
pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        self.stream.send(Message::Text(frame)).await?;
        Ok(())
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Binary(bytes)) => {
                    return Some(String::from_utf8(bytes).map_err(|e| {
                        TransportError::new(format!("Binary frame is not UTF-8: {}", e))
                    }));
                }
                Ok(Message::Close(frame)) => {
                    debug!(?frame, "Server sent close frame");
                    return None;
                }
                // Ping/pong are answered by tungstenite itself.
                Ok(_) => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            warn!(error = %e, "WebSocket close handshake failed");
        }
    }
}
