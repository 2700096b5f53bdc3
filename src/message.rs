//! Message protocol definitions
//!
//! Inbound lines are parsed into `ClientCommand`s; readers turn them into
//! `Event`s for the broadcast loop, which turns those into `OutboundMessage`s.

use tokio::sync::mpsc;

use crate::types::ClientId;

/// Literal line a client sends to disconnect gracefully
pub const QUIT_COMMAND: &str = "\\quit";

/// Prompt written to a client before its display name is read
pub const NAME_PROMPT: &str = "Enter name: ";

/// Client → Server line, after framing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Graceful disconnect request
    Quit,
    /// Anything else, relayed verbatim
    Text(String),
}

impl ClientCommand {
    /// Interpret one framed line
    pub fn parse(line: String) -> Self {
        if line == QUIT_COMMAND {
            ClientCommand::Quit
        } else {
            ClientCommand::Text(line)
        }
    }
}

/// Reader → broadcast loop event
///
/// Each connection produces `Joined`, any number of `Line`s, then one `Left`.
#[derive(Debug)]
pub enum Event {
    /// Client finished the name prompt
    Joined {
        id: ClientId,
        name: String,
        sender: mpsc::Sender<String>,
    },
    /// Client sent a line
    Line { id: ClientId, text: String },
    /// Client's connection ended
    Left { id: ClientId },
}

impl Event {
    /// Identity the event belongs to
    pub fn client_id(&self) -> ClientId {
        match self {
            Event::Joined { id, .. } | Event::Line { id, .. } | Event::Left { id } => *id,
        }
    }
}

/// A line fanned out to every registered client except `exclude`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub exclude: Option<ClientId>,
}

impl OutboundMessage {
    /// Chat line from `from`, not echoed back to it
    pub fn chat(from: ClientId, name: &str, text: &str) -> Self {
        Self {
            text: format!("{}: {}", name, text),
            exclude: Some(from),
        }
    }

    pub fn joined(id: ClientId, name: &str) -> Self {
        Self {
            text: format!("{} joined.", name),
            exclude: Some(id),
        }
    }

    pub fn disconnected(id: ClientId, name: &str) -> Self {
        Self {
            text: format!("{} disconnected.", name),
            exclude: Some(id),
        }
    }

    /// Whether `id` should receive this message
    pub fn is_for(&self, id: ClientId) -> bool {
        self.exclude != Some(id)
    }
}
