//! Strictly Relay - type-safe client for relayed tic-tac-toe
//!
//! The relay server owns the rules. This crate keeps a faithful, ordered
//! view of what the relay reports and forwards what the player wants.
//!
//! # Architecture
//!
//! - **Protocol**: encodes intents and decodes relay frames
//! - **Connection**: owns the single WebSocket, queueing sends until open
//! - **Session**: pure reducer from (session, action) to session
//! - **Bridge**: wires the three together and publishes each new session
//!
//! # Example
//!
//! ```no_run
//! use strictly_relay::{ProtocolBridge, WebSocketConnector, DEFAULT_SERVER_URL};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut bridge = ProtocolBridge::new(WebSocketConnector, DEFAULT_SERVER_URL);
//! let session = bridge.subscribe();
//! bridge.connect()?;
//! bridge.start_game()?;
//! while bridge.pump().await {
//!     println!("{}", session.borrow().status());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bridge;
mod config;
mod connection;
mod games;
mod protocol;
mod session;

pub mod cli;
pub mod headless;
pub mod tui;

// Crate-level exports - Bridge
pub use bridge::{BridgeError, ProtocolBridge, UiIntent, action_for};

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, DEFAULT_SERVER_URL, SERVER_URL_ENV};

// Crate-level exports - Connection management
pub use connection::{
    AlreadyConnectedError, ConnectionEvent, ConnectionManager, ConnectionState, Connector,
    Transport, TransportError, WebSocketConnector, WebSocketTransport,
};

// Crate-level exports - Wire protocol
pub use protocol::{
    DecodeError, EmptyPayload, EncodeError, GAME_MOVE, GAME_STATE, GameMoveFrame, GameStateFrame,
    Inbound, Intent, MovePayload, OutboundFrame, decode, encode,
};

// Crate-level exports - Session state machine
pub use session::{
    Action, GameId, GameSnapshot, MoveUpdate, PlayerId, Session, SessionError, SessionStatus,
    reduce, replay,
};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::invariants;
pub use games::tictactoe::{Board, Cell, Mark, Position, Winner};
