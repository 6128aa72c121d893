use crate::config::FtpConfiguration;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_mockfs::FileSource;
use crate::core_network::control::ControlChannel;
use crate::core_network::data::open_data_connection;
use crate::session::Session;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

const DOWNLOAD_BUFFER_SIZE: usize = 8192;

/// What a RETR sends down the data connection.
#[derive(Debug)]
enum Payload {
    Buffer(Vec<u8>),
    Target(PathBuf),
}

/// Handles the RETR (Retrieve) FTP command.
///
/// Streams the file's in-memory bytes, or the real file it is backed by,
/// followed by a single `\n`. The bytes go out from a spawned task: `226` is
/// sent once the task is started, not when it finishes. Only one download per
/// session may run at a time.
///
/// # Arguments
///
/// * `control` - The control channel of the client.
/// * `config` - The server configuration holding the shared tree.
/// * `session` - The session owning the data connection setup.
/// * `arg` - The file to retrieve.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_retr_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    if session.is_transfer_pending() {
        warn!("RETR {} refused, a transfer is still running", arg);
        return control
            .reply(ReplyCode::FileBusy, "A file transfer is pending")
            .await;
    }

    let payload = {
        let fs = config.filesystem.lock().await;
        fs.get(session.cwd(&fs), arg)
            .and_then(|id| fs.node(id))
            .filter(|node| !node.is_directory())
            .map(|node| match node.source() {
                Some(FileSource::Contents(bytes)) => Payload::Buffer(bytes.clone()),
                Some(FileSource::Target(path)) => Payload::Target(path.clone()),
                None => Payload::Buffer(Vec::new()),
            })
    };

    let payload = match payload {
        Some(payload) => payload,
        None => {
            warn!("RETR on unknown file: {}", arg);
            session.close_passive();
            return control
                .reply(ReplyCode::FileUnavailable, "Failed to open file")
                .await;
        }
    };

    let mut data_stream = match open_data_connection(control, session).await? {
        Some(stream) => stream,
        None => return Ok(()),
    };

    control
        .reply(
            ReplyCode::FileStatusOk,
            format!("Opening BINARY mode data connection for {}", arg),
        )
        .await?;

    let pending = session.transfer_pending.clone();
    pending.store(true, Ordering::SeqCst);
    let name = arg.to_string();
    tokio::spawn(async move {
        match send_payload(&mut data_stream, payload).await {
            Ok(sent) => info!("Sent {} ({} bytes)", name, sent),
            Err(e) => error!("Error sending {} to client: {}", name, e),
        }
        pending.store(false, Ordering::SeqCst);
    });

    control
        .reply(ReplyCode::ClosingDataConnection, "Transfer complete")
        .await
}

async fn send_payload(data_stream: &mut TcpStream, payload: Payload) -> std::io::Result<usize> {
    let mut sent = 0;
    match payload {
        Payload::Buffer(bytes) => {
            data_stream.write_all(&bytes).await?;
            sent += bytes.len();
        }
        Payload::Target(path) => {
            let mut file = File::open(&path).await?;
            let mut buffer = vec![0; DOWNLOAD_BUFFER_SIZE];
            loop {
                let bytes_read = file.read(&mut buffer).await?;
                if bytes_read == 0 {
                    break;
                }
                data_stream.write_all(&buffer[..bytes_read]).await?;
                sent += bytes_read;
            }
        }
    }

    data_stream.write_all(b"\n").await?;
    data_stream.shutdown().await?;
    Ok(sent + 1)
}
