//! Chat Relay Client
//!
//! Connects to the relay, copies stdin to the connection and the
//! connection to stdout until both directions are closed.

use clap::Parser;
use tokio::io::{self, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinError;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Line-based TCP chat relay client
#[derive(Parser, Debug)]
#[command(name = "chat_relay_client", about = "Line-based TCP chat relay client")]
struct Cli {
    /// Relay address to connect to
    #[arg(long, env = "CHAT_RELAY_ADDR", default_value = "127.0.0.1:9000")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries only chat text
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chat_relay_client=info")),
        )
        .init();

    let cli = Cli::parse();
    let stream = TcpStream::connect(&cli.addr).await?;
    debug!("Connected to {}", cli.addr);

    let (mut reader, mut writer) = stream.into_split();

    // Server -> stdout
    let printer = tokio::spawn(async move {
        let mut stdout = io::stdout();
        let copied = io::copy(&mut reader, &mut stdout).await;
        let _ = stdout.flush().await;
        copied
    });

    // stdin -> server; closing our write half tells the server we are done
    io::copy(&mut io::stdin(), &mut writer).await?;
    writer.shutdown().await?;

    if let Some(reason) = output_failure(printer.await) {
        debug!("{}", reason);
    }
    info!("done");

    Ok(())
}

/// Describe how the relay -> stdout task failed, if it did
fn output_failure(result: Result<io::Result<u64>, JoinError>) -> Option<String> {
    match result {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(format!("Reading from relay failed: {}", e)),
        Err(e) => Some(format!("Output task failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clean_output_is_not_a_failure() {
        let handle = tokio::spawn(async { Ok::<u64, io::Error>(12) });
        assert!(output_failure(handle.await).is_none());
    }

    #[tokio::test]
    async fn test_read_error_reported() {
        let handle = tokio::spawn(async { Err::<u64, _>(io::Error::other("reset")) });
        let reason = output_failure(handle.await).unwrap();
        assert!(reason.starts_with("Reading from relay failed"));
    }

    #[tokio::test]
    async fn test_aborted_task_reported() {
        let handle = tokio::spawn(std::future::pending::<io::Result<u64>>());
        handle.abort();
        let reason = output_failure(handle.await).unwrap();
        assert!(reason.starts_with("Output task failed"));
    }
}
