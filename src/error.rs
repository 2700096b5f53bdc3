//! Error types for the chat relay
//!
//! Defines connection-level errors, per-recipient delivery errors and
//! registry invariant breaches. Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use crate::types::ClientId;

/// Connection-level errors
///
/// All of these are local to one connection: they end that reader and
/// are never escalated to other clients or the broadcast loop.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error on the client transport
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Line framing error (overlong line or underlying IO failure)
    #[error("Line codec error: {0}")]
    Codec(#[from] tokio_util::codec::LinesCodecError),

    /// Event channel closed (broadcast loop is gone)
    #[error("Channel send error")]
    ChannelSend,
}

/// Message delivery errors
///
/// Occurs when handing a line to one recipient's outbound queue.
#[derive(Debug, Error)]
pub enum SendError {
    /// The recipient's writer task has exited
    #[error("Channel closed")]
    ChannelClosed,

    /// The recipient is not draining its queue fast enough
    #[error("Outbound queue full")]
    QueueFull,
}

/// Registry invariant breaches
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// An entry with this id was already registered; it has been replaced
    #[error("Duplicate client identity: {0}")]
    DuplicateIdentity(ClientId),
}
