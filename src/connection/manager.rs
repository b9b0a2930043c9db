//! Ownership of the single relay connection.

use super::error::AlreadyConnectedError;
use super::transport::Connector;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

/// Observable phase of the managed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ConnectionState {
    /// Never connected.
    Idle,
    /// Connect issued, transport not ready; sends are queued.
    Opening,
    /// Transport ready; sends go straight out.
    Open,
    /// Connection ended or was closed; sends are dropped.
    Closed,
}

/// What the manager reports to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The connection became ready and queued frames were flushed.
    Open,
    /// A text frame arrived.
    Message(String),
    /// The connection ended, or never opened.
    Closed {
        /// Failure description, `None` for an orderly remote close.
        reason: Option<String>,
    },
}

/// Messages from the link task.
#[derive(Debug)]
enum LinkEvent {
    Opened,
    Frame(String),
    Closed(Option<String>),
}

/// Channels to the task that owns one socket.
#[derive(Debug)]
struct Link {
    url: String,
    outbound_tx: mpsc::UnboundedSender<String>,
    events_rx: mpsc::UnboundedReceiver<LinkEvent>,
    stop_tx: oneshot::Sender<()>,
}

/// Owns at most one relay connection at a time.
///
/// The socket itself lives in a background link task; the manager only holds
/// channel ends to it. Releasing the [`Link`] stops the task before it writes
/// anything still in flight.
#[derive(Debug)]
pub struct ConnectionManager<C> {
    connector: Arc<C>,
    state: ConnectionState,
    link: Option<Link>,
    pending: VecDeque<String>,
}

impl<C: Connector> ConnectionManager<C> {
    /// Creates a manager that opens connections through `connector`.
    #[instrument(skip(connector))]
    pub fn new(connector: C) -> Self {
        debug!("Creating connection manager");
        Self {
            connector: Arc::new(connector),
            state: ConnectionState::Idle,
            link: None,
            pending: VecDeque::new(),
        }
    }

    /// Returns the current phase.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Checks if a connection is owned (opening or open).
    pub fn is_active(&self) -> bool {
        self.link.is_some()
    }

    /// Number of frames waiting for the connection to open.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Starts opening a connection to `url`.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub fn connect(&mut self, url: &str) -> Result<(), AlreadyConnectedError> {
        if let Some(link) = &self.link {
            warn!(owned = %link.url, "Connect called while a connection is owned");
            return Err(AlreadyConnectedError::new(link.url.clone()));
        }

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();

        tokio::spawn(drive_link(
            Arc::clone(&self.connector),
            url.to_string(),
            outbound_rx,
            events_tx,
            stop_rx,
        ));

        self.link = Some(Link {
            url: url.to_string(),
            outbound_tx,
            events_rx,
            stop_tx,
        });
        self.pending.clear();
        self.state = ConnectionState::Opening;

        info!("Connection opening");
        Ok(())
    }

    /// Sends a frame, queues it, or drops it, depending on the phase.
    ///
    /// Frames sent while opening are flushed in order when `Open` is
    /// reported. With no connection the frame is silently dropped.
    #[instrument(skip(self, frame), fields(state = %self.state))]
    pub fn send(&mut self, frame: String) {
        match (self.state, &self.link) {
            (ConnectionState::Open, Some(link)) => {
                if link.outbound_tx.send(frame).is_err() {
                    debug!("Link task already gone, frame dropped");
                }
            }
            (ConnectionState::Opening, Some(_)) => {
                self.pending.push_back(frame);
                debug!(pending = self.pending.len(), "Queued frame until open");
            }
            _ => debug!("No connection, frame dropped"),
        }
    }

    /// Waits for the next connection event.
    ///
    /// Returns `None` when no connection is owned. Cancel-safe: dropping the
    /// future before it completes loses no event.
    pub async fn next_event(&mut self) -> Option<ConnectionEvent> {
        let event = self.link.as_mut()?.events_rx.recv().await;

        let event = match event {
            Some(LinkEvent::Opened) => {
                self.flush_pending();
                self.state = ConnectionState::Open;
                info!("Connection open");
                ConnectionEvent::Open
            }
            Some(LinkEvent::Frame(text)) => ConnectionEvent::Message(text),
            Some(LinkEvent::Closed(reason)) => {
                info!(?reason, "Connection closed");
                self.release();
                ConnectionEvent::Closed { reason }
            }
            None => {
                warn!("Link task ended without reporting");
                self.release();
                ConnectionEvent::Closed { reason: None }
            }
        };

        Some(event)
    }

    /// Closes the connection and discards queued frames. Idempotent.
    #[instrument(skip(self))]
    pub fn close(&mut self) {
        if self.link.is_none() {
            debug!("Close called with no connection");
            return;
        }
        info!(discarded = self.pending.len(), "Closing connection");
        self.release();
    }

    fn flush_pending(&mut self) {
        let Some(link) = &self.link else {
            return;
        };
        let count = self.pending.len();
        for frame in self.pending.drain(..) {
            if link.outbound_tx.send(frame).is_err() {
                warn!("Link task gone during flush");
                break;
            }
        }
        debug!(count, "Flushed queued frames");
    }

    fn release(&mut self) {
        if let Some(link) = self.link.take() {
            // The task may already have ended on its own.
            let _ = link.stop_tx.send(());
        }
        self.pending.clear();
        self.state = ConnectionState::Closed;
    }
}

/// Owns one transport for the lifetime of a connection.
///
/// Ends when the remote side closes, a socket error occurs, or the manager
/// releases the link. A stop wins over frames still buffered in `outbound_rx`:
/// none of them reach the socket once the manager has let go.
async fn drive_link<C: Connector>(
    connector: Arc<C>,
    url: String,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
    events_tx: mpsc::UnboundedSender<LinkEvent>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut transport = match connector.connect(&url).await {
        Ok(transport) => transport,
        Err(e) => {
            warn!(error = %e, url = %url, "Connect failed");
            let _ = events_tx.send(LinkEvent::Closed(Some(e.message)));
            return;
        }
    };

    if events_tx.send(LinkEvent::Opened).is_err() {
        debug!("Manager closed before open, dropping connection");
        transport.close().await;
        return;
    }

    loop {
        tokio::select! {
            biased;

            _ = &mut stop_rx => {
                debug!("Link stopped, closing transport without flushing");
                transport.close().await;
                break;
            }
            frame = outbound_rx.recv() => {
                match frame {
                    Some(text) => {
                        if let Err(e) = transport.send(text).await {
                            warn!(error = %e, "Send failed");
                            let _ = events_tx.send(LinkEvent::Closed(Some(e.message)));
                            break;
                        }
                    }
                    None => {
                        debug!("Manager released link, closing transport");
                        transport.close().await;
                        break;
                    }
                }
            }
            incoming = transport.recv() => {
                match incoming {
                    Some(Ok(text)) => {
                        if events_tx.send(LinkEvent::Frame(text)).is_err() {
                            transport.close().await;
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Receive failed");
                        let _ = events_tx.send(LinkEvent::Closed(Some(e.message)));
                        break;
                    }
                    None => {
                        debug!("Remote closed connection");
                        let _ = events_tx.send(LinkEvent::Closed(None));
                        break;
                    }
                }
            }
        }
    }
}
