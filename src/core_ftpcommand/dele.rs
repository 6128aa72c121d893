use crate::config::FtpConfiguration;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{info, warn};

/// Handles DELE, RMD and ABOR: removes the node at `arg` with its whole subtree.
///
/// # Arguments
///
/// * `control` - The control channel of the client.
/// * `config` - The server configuration holding the shared tree.
/// * `session` - The session the path is resolved against.
/// * `arg` - The file or directory to remove.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_dele_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &Session,
    arg: &str,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    let removed = {
        let mut fs = config.filesystem.lock().await;
        let cwd = session.cwd(&fs);
        fs.path_exists(cwd, arg) && fs.remove(cwd, arg).is_ok()
    };

    if removed {
        info!("Removed {}", arg);
        control
            .reply(ReplyCode::FileActionOk, "Delete operation successful")
            .await
    } else {
        warn!("Could not remove {}", arg);
        control
            .reply(ReplyCode::FileUnavailable, "Delete operation failed")
            .await
    }
}
