//! Broadcaster actor implementation
//!
//! The single consumer of reader events. It owns the `Registry` and is the
//! only place clients are added, removed or written to, so processing events
//! one at a time is all the synchronization the relay needs.

use std::collections::VecDeque;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::client::RegisteredClient;
use crate::error::SendError;
use crate::message::{Event, OutboundMessage};
use crate::registry::Registry;
use crate::types::ClientId;

/// The broadcast loop actor
pub struct Broadcaster {
    /// Live clients; only touched from `handle_event`
    registry: Registry,
    /// Event receiver channel
    receiver: mpsc::Receiver<Event>,
}

impl Broadcaster {
    /// Create a new Broadcaster with the given event receiver
    pub fn new(receiver: mpsc::Receiver<Event>) -> Self {
        Self {
            registry: Registry::new(),
            receiver,
        }
    }

    /// Run the event loop
    ///
    /// Continuously receives and processes events until all senders are dropped.
    pub async fn run(mut self) {
        info!("Broadcaster started");

        while let Some(event) = self.receiver.recv().await {
            self.handle_event(event);
        }

        info!("Broadcaster shutting down");
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Process a single event
    pub fn handle_event(&mut self, event: Event) {
        debug!("Processing event for client {}", event.client_id());
        match event {
            Event::Joined { id, name, sender } => self.handle_joined(id, name, sender),
            Event::Line { id, text } => self.handle_line(id, text),
            Event::Left { id } => self.handle_left(id),
        }
    }

    fn handle_joined(&mut self, id: ClientId, name: String, sender: mpsc::Sender<String>) {
        info!("Client {} joined as '{}'", id, name);
        let announcement = OutboundMessage::joined(id, &name);

        if let Err(e) = self.registry.insert(RegisteredClient::new(id, name, sender)) {
            error!("{}; stale entry replaced", e);
        }

        self.broadcast(announcement);
        debug!("Total clients: {}", self.registry.len());
    }

    fn handle_line(&mut self, id: ClientId, text: String) {
        let Some(client) = self.registry.get(id) else {
            debug!("Dropping line from unregistered client {}", id);
            return;
        };

        let msg = OutboundMessage::chat(id, client.display_name(), &text);
        self.broadcast(msg);
    }

    fn handle_left(&mut self, id: ClientId) {
        let Some(client) = self.registry.remove(id) else {
            debug!("Left for unregistered client {} ignored", id);
            return;
        };

        info!("Client {} ('{}') disconnected", id, client.name);
        self.broadcast(OutboundMessage::disconnected(id, &client.name));
        debug!("Total clients: {}", self.registry.len());
    }

    /// Fan a message out to every registered client it is addressed to
    ///
    /// A recipient whose queue is full is unregistered once the fan-out is
    /// done, which closes its connection, and its departure is announced in
    /// turn. A closed queue is only logged; that reader's `Left` follows.
    fn broadcast(&mut self, msg: OutboundMessage) {
        let mut pending = VecDeque::from([msg]);

        while let Some(msg) = pending.pop_front() {
            let mut overflowed = Vec::new();

            for recipient in self.registry.snapshot().filter(|c| msg.is_for(c.id)) {
                match recipient.deliver(&msg.text) {
                    Ok(()) => {}
                    Err(SendError::QueueFull) => overflowed.push(recipient.id),
                    Err(e) => warn!("Dropped line for client {}: {}", recipient.id, e),
                }
            }

            for id in overflowed {
                if let Some(client) = self.registry.remove(id) {
                    warn!("Client {} ('{}') fell behind, disconnecting", id, client.name);
                    pending.push_back(OutboundMessage::disconnected(id, &client.name));
                }
            }
        }
    }
}
