//! In-memory relay used by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use strictly_relay::{Connector, Transport, TransportError};
use tokio::sync::mpsc;

/// How long a test waits for the link task before giving up.
pub const WAIT: Duration = Duration::from_secs(2);

/// One connection the scripted connector will hand out.
enum ScriptedLink {
    Accept(MemoryTransport),
    Refuse(String),
}

/// Connector that serves pre-arranged links in order.
#[derive(Default)]
pub struct ScriptedConnector {
    links: Mutex<VecDeque<ScriptedLink>>,
    urls: Mutex<Vec<String>>,
}

impl ScriptedConnector {
    /// Creates a connector with no links; connecting fails until one is added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a link that connects, returning the relay side of it.
    pub fn accept(&self) -> RelayHandle {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        self.links
            .lock()
            .unwrap()
            .push_back(ScriptedLink::Accept(MemoryTransport {
                inbound: inbound_rx,
                sent: Some(sent_tx),
            }));
        RelayHandle {
            inbound: Some(inbound_tx),
            sent: sent_rx,
        }
    }

    /// Queues a link whose connect attempt fails with `reason`.
    pub fn refuse(&self, reason: &str) {
        self.links
            .lock()
            .unwrap()
            .push_back(ScriptedLink::Refuse(reason.to_string()));
    }

    /// URLs of every connect attempt so far.
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn Transport>, TransportError> {
        self.urls.lock().unwrap().push(url.to_string());
        let link = self.links.lock().unwrap().pop_front();
        match link {
            Some(ScriptedLink::Accept(transport)) => Ok(Box::new(transport)),
            Some(ScriptedLink::Refuse(reason)) => Err(TransportError::new(reason)),
            None => Err(TransportError::new("no scripted link")),
        }
    }
}

/// Connector shared between a test and the code under test.
pub struct SharedConnector(pub std::sync::Arc<ScriptedConnector>);

#[async_trait]
impl Connector for SharedConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn Transport>, TransportError> {
        self.0.connect(url).await
    }
}

/// Client side of an in-memory link.
pub struct MemoryTransport {
    inbound: mpsc::UnboundedReceiver<String>,
    sent: Option<mpsc::UnboundedSender<String>>,
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        let Some(sent) = &self.sent else {
            return Err(TransportError::new("transport closed"));
        };
        sent.send(frame)
            .map_err(|_| TransportError::new("relay side dropped"))
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        self.inbound.recv().await.map(Ok)
    }

    async fn close(&mut self) {
        self.sent = None;
    }
}

/// Relay side of an in-memory link.
pub struct RelayHandle {
    inbound: Option<mpsc::UnboundedSender<String>>,
    sent: mpsc::UnboundedReceiver<String>,
}

impl RelayHandle {
    /// Delivers a frame to the client.
    pub fn push(&self, frame: &str) {
        if let Some(inbound) = &self.inbound {
            inbound.send(frame.to_string()).unwrap();
        }
    }

    /// Closes the relay side; the client sees an orderly remote close.
    pub fn hang_up(&mut self) {
        self.inbound = None;
    }

    /// Next frame the client transmitted, or `None` once the client closed.
    pub async fn next_sent(&mut self) -> Option<String> {
        tokio::time::timeout(WAIT, self.sent.recv())
            .await
            .expect("client neither sent nor closed in time")
    }
}

/// A `GAME_STATE` frame with an empty board.
pub fn game_state(status: &str, game_id: &str, symbol: &str, turn: &str) -> String {
    serde_json::json!({
        "type": "GAME_STATE",
        "status": status,
        "gameId": game_id,
        "playerSymbol": symbol,
        "board": [null, null, null, null, null, null, null, null, null],
        "currentTurn": turn,
    })
    .to_string()
}
