//! Game value types shared by the protocol and session layers.

pub mod tictactoe;
