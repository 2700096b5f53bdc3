//! Chat Relay Server - Entry Point
//!
//! Starts the TCP listener and Broadcaster actor, accepting connections.

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use chat_relay::{handle_connection, Broadcaster, IdAllocator, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=chat_relay=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chat_relay=info")),
        )
        .init();

    let config = ServerConfig::parse();
    let addr = config.bind_addr();

    // Failing to bind is the only fatal error
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        error!("Failed to listen on {}: {}", addr, e);
        e
    })?;
    info!("Chat relay listening on {}", listener.local_addr()?);

    let (event_tx, event_rx) = mpsc::channel(config.event_buffer);
    tokio::spawn(Broadcaster::new(event_rx).run());

    let ids = IdAllocator::new();
    let connection = config.connection();

    // Connection accept loop
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let client_id = ids.next_id();
                info!("Client {} connected from {}", client_id, peer);
                let event_tx = event_tx.clone();

                // Spawn handler task for each connection
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(client_id, stream, event_tx, connection).await {
                        debug!("Connection {} ({}) ended with error: {}", client_id, peer, e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
