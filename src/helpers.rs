use crate::config::FtpConfiguration;
use chrono::Local;
use log::info;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;

/// Sends a response to the client.
pub async fn send_response(
    writer: &Arc<Mutex<OwnedWriteHalf>>,
    message: &[u8],
) -> Result<(), std::io::Error> {
    let mut writer = writer.lock().await;
    writer.write_all(message).await?;
    writer.flush().await?;
    Ok(())
}

/// File name handed out by STOU: the current time in milliseconds.
pub fn unique_file_name() -> String {
    Local::now().timestamp_millis().to_string()
}

// Helper function to log configuration options
pub fn log_config(config: &FtpConfiguration) {
    info!("  Listen Address: {}:{}", config.host, config.port);
    match (&config.user, &config.password) {
        (Some(user), Some(_)) => info!("  Login: {} (password required)", user),
        (Some(user), None) => info!("  Login: {} (anonymous, no password set)", user),
        _ => info!("  Login: anonymous"),
    }
    match config.passive_port {
        Some(port) => info!("  Passive Port: {}", port),
        None => info!("  Passive Port: ephemeral"),
    }
    info!("  Node Owner: {}", config.owner());
}
