//! Line-based TCP Chat Relay Library
//!
//! Every line a client sends is relayed to all other connected clients,
//! and joins and disconnects are announced.
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `Broadcaster` is the single actor owning the client `Registry`
//! - Each connection has a `handler` task that turns lines into `Event`s
//! - Each connection has a writer task draining its own outbound queue
//! - No locks needed - all registry access goes through the event channel
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use chat_relay::{handle_connection, Broadcaster, ConnectionConfig, IdAllocator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:9000").await.unwrap();
//!     let (event_tx, event_rx) = mpsc::channel(256);
//!     let ids = IdAllocator::new();
//!
//!     tokio::spawn(Broadcaster::new(event_rx).run());
//!
//!     while let Ok((stream, _)) = listener.accept().await {
//!         let event_tx = event_tx.clone();
//!         let id = ids.next_id();
//!         tokio::spawn(handle_connection(id, stream, event_tx, ConnectionConfig::default()));
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod message;
pub mod registry;
pub mod server;
pub mod types;

// Re-export main types for convenience
pub use client::RegisteredClient;
pub use config::{ConnectionConfig, ServerConfig};
pub use error::{AppError, RegistryError, SendError};
pub use handler::handle_connection;
pub use message::{ClientCommand, Event, OutboundMessage};
pub use registry::Registry;
pub use server::Broadcaster;
pub use types::{ClientId, IdAllocator};
