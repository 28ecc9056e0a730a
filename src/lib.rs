//! Room-based WebSocket chat relay.
//!
//! Clients join named rooms over a WebSocket connection, exchange text
//! messages and shared location links, and receive a live roster of room
//! occupants. State lives entirely in memory for the lifetime of the process.

pub mod error;
pub mod filter;
pub mod logger;
pub mod message;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod time;
