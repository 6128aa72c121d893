use crate::config::FtpConfiguration;
use crate::constants::{GREETING, MAX_LINE_LENGTH};
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_network::control::ControlChannel;
use crate::session::{FtpState, Session};
use anyhow::Result;
use log::{debug, error, info};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// Accepts control connections until `shutdown` fires or its sender is dropped.
///
/// Each connection gets its own task and session; sessions already running
/// are not interrupted by the shutdown.
pub async fn accept_loop(
    listener: TcpListener,
    config: Arc<FtpConfiguration>,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Server stopped accepting connections");
                break;
            }
            accepted = listener.accept() => {
                let (socket, addr) = match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                        continue;
                    }
                };
                info!("New connection from {:?}", addr);

                let config = Arc::clone(&config);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(socket, config).await {
                        error!("Connection error: {:?}", e);
                    }
                    info!("Connection closed for {:?}", addr);
                });
            }
        }
    }
}

/// Serves one control connection: greeting, then one command per line.
pub async fn handle_connection(socket: TcpStream, config: Arc<FtpConfiguration>) -> Result<()> {
    let local_addr = socket.local_addr()?;
    let peer_addr = socket.peer_addr()?;
    let (reader, writer) = socket.into_split();
    let control = ControlChannel::new(writer, local_addr, peer_addr);

    let root = config.filesystem.lock().await.root();
    let mut session = Session::new(&config, root);

    control.reply(ReplyCode::ServiceReady, GREETING).await?;

    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        let n = read_control_line(&mut reader, &mut buffer).await?;
        if n == 0 {
            debug!("Client {} disconnected", peer_addr);
            break;
        }

        let line = String::from_utf8_lossy(&buffer);
        session.handle_line(&line, &control, &config).await?;

        if session.state == FtpState::Closed {
            break;
        }
    }

    session.close_passive();
    Ok(())
}

/// Reads one line into `buffer`, at most [`MAX_LINE_LENGTH`] bytes.
///
/// Returns 0 at end of stream. A line that fills the limit without a newline
/// is an `InvalidData` error.
async fn read_control_line<R>(reader: &mut R, buffer: &mut Vec<u8>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let n = reader
        .take(MAX_LINE_LENGTH as u64)
        .read_until(b'\n', buffer)
        .await?;

    if n == MAX_LINE_LENGTH && buffer.last() != Some(&b'\n') {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "control line too long",
        ));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_control_line() {
        let mut input: &[u8] = b"USER test\r\nPWD\r\n";
        let mut buffer = Vec::new();

        assert_eq!(read_control_line(&mut input, &mut buffer).await.unwrap(), 11);
        assert_eq!(buffer, b"USER test\r\n");
        buffer.clear();
        assert_eq!(read_control_line(&mut input, &mut buffer).await.unwrap(), 5);
        buffer.clear();
        assert_eq!(read_control_line(&mut input, &mut buffer).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_read_control_line_rejects_endless_lines() {
        let endless = vec![b'A'; MAX_LINE_LENGTH * 2];
        let mut input: &[u8] = &endless;
        let mut buffer = Vec::new();

        let err = read_control_line(&mut input, &mut buffer).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        assert_eq!(buffer.len(), MAX_LINE_LENGTH);
    }
}
