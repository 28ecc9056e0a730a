//! Error types for the chat relay.
//!
//! Every variant's `Display` string is surfaced verbatim to the originating
//! client through its acknowledgment, so the messages are written for end
//! users rather than for logs.

use thiserror::Error;

/// Reasons a `join` request can be rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// Username or room was missing or blank after trimming
    #[error("Username and room are required!")]
    MissingCredentials,

    /// Another user in the room already holds this username (case-insensitive)
    #[error("Username is in use!")]
    UsernameTaken,

    /// The session already joined a room; removal + re-add is the only update path
    #[error("You have already joined a room!")]
    AlreadyJoined,
}

/// Reasons an outgoing `sendMessage` / `sendLocation` can be rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// The text tripped the content filter
    #[error("Profanity is not allowed!")]
    ProfanityRejected,

    /// The session tried to send before joining a room
    #[error("You must join a room first!")]
    NotJoined,
}
