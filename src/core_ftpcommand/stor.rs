use crate::config::FtpConfiguration;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_mockfs::{NodeId, SharedFs};
use crate::core_network::control::ControlChannel;
use crate::core_network::data::open_data_connection;
use crate::session::Session;
use chrono::Local;
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

const UPLOAD_BUFFER_SIZE: usize = 65536;

/// Handles STOR, APPE and STOU.
///
/// The file is created first (or reused when it exists), then every chunk
/// read from the data connection is appended to it. A file backed by a real
/// path is copied into memory before the data connection is opened; when
/// that file cannot be read the upload is refused with `451`. `226` follows
/// the end of the upload.
///
/// # Arguments
///
/// * `control` - The control channel of the client.
/// * `config` - The server configuration holding the shared tree.
/// * `session` - The session owning the data connection setup.
/// * `arg` - The file to store.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_stor_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    let node = {
        let mut fs = config.filesystem.lock().await;
        let cwd = session.cwd(&fs);
        fs.ensure_file(cwd, arg, Local::now(), config.owner())
    };

    let node = match node {
        Ok(node) => node,
        Err(e) => {
            warn!("STOR {} failed: {}", arg, e);
            return control
                .reply(ReplyCode::FileNameNotAllowed, "Could not create file")
                .await;
        }
    };

    if !load_target(control, &config.filesystem, node).await? {
        return Ok(());
    }

    let data_stream = match open_data_connection(control, session).await? {
        Some(stream) => stream,
        None => return Ok(()),
    };

    control.reply(ReplyCode::FileStatusOk, "Ok to send data").await?;

    let upload = Upload {
        node,
        name: arg.to_string(),
        filesystem: config.filesystem.clone(),
        control: control.clone(),
        pending: session.transfer_pending.clone(),
    };
    tokio::spawn(async move {
        if let Err(e) = upload.receive(data_stream).await {
            error!("Upload failed: {}", e);
        }
    });

    Ok(())
}

/// Copies the real file behind `node`, if any, into memory.
///
/// The read happens outside the tree lock. A failed read answers `451` and
/// returns `false`.
async fn load_target(
    control: &ControlChannel,
    filesystem: &SharedFs,
    node: NodeId,
) -> Result<bool, std::io::Error> {
    let target = {
        let fs = filesystem.lock().await;
        fs.node(node).and_then(|n| n.target().cloned())
    };
    let Some(target) = target else {
        return Ok(true);
    };

    match tokio::fs::read(&target).await {
        Ok(bytes) => {
            if let Err(e) = filesystem.lock().await.load_contents(node, bytes) {
                warn!("Could not load {}: {}", target.display(), e);
            }
            Ok(true)
        }
        Err(e) => {
            warn!("Could not read {}: {}", target.display(), e);
            control
                .reply(
                    ReplyCode::LocalError,
                    format!("Could not read {}", target.display()),
                )
                .await?;
            Ok(false)
        }
    }
}

/// State moved into the task reading one upload.
struct Upload {
    node: NodeId,
    name: String,
    filesystem: SharedFs,
    control: ControlChannel,
    pending: Arc<AtomicBool>,
}

impl Upload {
    async fn receive(self, mut data_stream: TcpStream) -> std::io::Result<()> {
        let mut buffer = vec![0; UPLOAD_BUFFER_SIZE];
        let mut received = 0;

        loop {
            let bytes_read = match data_stream.read(&mut buffer).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    error!("Error reading from data stream: {}", e);
                    self.pending.store(false, Ordering::SeqCst);
                    return self
                        .control
                        .reply(
                            ReplyCode::ConnectionClosed,
                            "Connection closed; transfer aborted",
                        )
                        .await;
                }
            };

            self.pending.store(true, Ordering::SeqCst);
            let mut fs = self.filesystem.lock().await;
            if let Err(e) = fs.append_contents(self.node, &buffer[..bytes_read], Local::now()) {
                warn!("Could not write into {}: {}", self.name, e);
            }
            received += bytes_read;
        }

        self.pending.store(false, Ordering::SeqCst);
        info!("File stored successfully: {} ({} bytes)", self.name, received);
        self.control
            .reply(ReplyCode::ClosingDataConnection, "Transfer complete")
            .await
    }
}
