//! Client struct definition
//!
//! Represents a registered client with its display name and outbound queue.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::SendError;
use crate::types::ClientId;

/// Registered client information
///
/// Holds the client's identity, its display name and the sending half of
/// its outbound queue. The connection's writer task owns the receiving half.
#[derive(Debug)]
pub struct RegisteredClient {
    /// Unique identifier for this client
    pub id: ClientId,
    /// Name given at the prompt
    pub name: String,
    /// Server → Client line queue
    pub sender: mpsc::Sender<String>,
}

impl RegisteredClient {
    /// Create a new client with the given ID, name and sender channel
    pub fn new(id: ClientId, name: String, sender: mpsc::Sender<String>) -> Self {
        Self { id, name, sender }
    }

    /// Queue a line for this client without waiting
    ///
    /// Returns an error if the writer has exited or the queue is full;
    /// in both cases the line is dropped for this client only.
    pub fn deliver(&self, line: &str) -> Result<(), SendError> {
        self.sender.try_send(line.to_string()).map_err(|e| match e {
            TrySendError::Full(_) => SendError::QueueFull,
            TrySendError::Closed(_) => SendError::ChannelClosed,
        })
    }

    /// Get the display name for this client
    pub fn display_name(&self) -> &str {
        &self.name
    }
}
