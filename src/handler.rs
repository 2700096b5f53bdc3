//! Connection handler
//!
//! Handles individual client connections: name prompt, line framing, and
//! turning inbound lines into `Event`s for the Broadcaster. Outbound lines
//! are written by a separate task fed from the client's queue.

use futures_util::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::AppError;
use crate::message::{ClientCommand, Event, NAME_PROMPT};
use crate::types::ClientId;

/// Handle one accepted connection
///
/// Emits `Joined` once the name line is read, a `Line` per later line, and
/// exactly one `Left` when the connection ends for any reason after joining.
/// A connection that ends before giving a name emits nothing. The connection
/// also ends once the Broadcaster drops this client's queue.
pub async fn handle_connection<S>(
    client_id: ClientId,
    stream: S,
    events: mpsc::Sender<Event>,
    config: ConnectionConfig,
) -> Result<(), AppError>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut lines = FramedRead::new(
        reader,
        LinesCodec::new_with_max_length(config.max_line_length),
    );

    writer.write_all(NAME_PROMPT.as_bytes()).await?;
    writer.flush().await?;

    let name = match lines.next().await {
        Some(line) => match ClientCommand::parse(line?) {
            ClientCommand::Text(name) if !name.trim().is_empty() => name,
            ClientCommand::Text(_) => format!("client-{}", client_id.0),
            ClientCommand::Quit => {
                debug!("Client {} quit at the name prompt", client_id);
                return Ok(());
            }
        },
        None => {
            debug!("Client {} closed before giving a name", client_id);
            return Ok(());
        }
    };

    // Create channel for server -> client lines
    let (msg_tx, msg_rx) = mpsc::channel::<String>(config.outbound_buffer);
    let write_task = tokio::spawn(write_lines(client_id, writer, msg_rx));

    if events
        .send(Event::Joined {
            id: client_id,
            name,
            sender: msg_tx,
        })
        .await
        .is_err()
    {
        debug!("Broadcaster closed, dropping client {}", client_id);
        return Err(AppError::ChannelSend);
    }

    // Wait for either side to finish
    let result = tokio::select! {
        result = read_lines(client_id, &mut lines, &events) => result,
        _ = write_task => {
            debug!("Write side closed for {}, ending reader", client_id);
            Ok(())
        }
    };

    let _ = events.send(Event::Left { id: client_id }).await;
    info!("Client {} connection ended", client_id);

    result
}

/// Forward lines as events until EOF, a read error, or `\quit`
///
/// Lines must be valid UTF-8. Anything else is a read error and ends the
/// connection rather than being relayed as raw bytes.
async fn read_lines<R>(
    client_id: ClientId,
    lines: &mut FramedRead<R, LinesCodec>,
    events: &mpsc::Sender<Event>,
) -> Result<(), AppError>
where
    R: AsyncRead + Unpin,
{
    while let Some(line) = lines.next().await {
        match ClientCommand::parse(line?) {
            ClientCommand::Quit => {
                debug!("Client {} sent quit", client_id);
                break;
            }
            ClientCommand::Text(text) => {
                if events
                    .send(Event::Line {
                        id: client_id,
                        text,
                    })
                    .await
                    .is_err()
                {
                    return Err(AppError::ChannelSend);
                }
            }
        }
    }
    Ok(())
}

/// Drain the client's queue onto its transport
///
/// Ends when the Broadcaster drops the queue sender or a write fails, then
/// shuts the write half down.
async fn write_lines<W>(client_id: ClientId, mut writer: W, mut queue: mpsc::Receiver<String>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = queue.recv().await {
        if let Err(e) = write_line(&mut writer, &line).await {
            debug!("Write to client {} failed: {}", client_id, e);
            break;
        }
    }

    let _ = writer.shutdown().await;
    debug!("Write task ended for {}", client_id);
}

async fn write_line<W>(writer: &mut W, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\r\n").await?;
    writer.flush().await
}
