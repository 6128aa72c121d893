use crate::config::FtpConfiguration;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{debug, warn};

/// Handles the CWD FTP command. CDUP comes through here with `..`.
///
/// # Arguments
///
/// * `control` - The control channel of the client.
/// * `config` - The server configuration holding the shared tree.
/// * `session` - The session whose working directory changes.
/// * `arg` - The directory to change to, relative to the working directory.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_cwd_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    if arg.is_empty() {
        return control.reply(ReplyCode::SyntaxError, "Path needed").await;
    }

    let target = {
        let fs = config.filesystem.lock().await;
        let cwd = session.cwd(&fs);
        if !fs.path_exists(cwd, arg) {
            None
        } else {
            Some(fs.change_directory(cwd, arg))
        }
    };

    match target {
        None => {
            warn!("CWD to unknown path: {}", arg);
            control.reply(ReplyCode::ActionNotTaken, "Unknown path").await
        }
        Some(None) => {
            warn!("CWD target is not a directory: {}", arg);
            control
                .reply(
                    ReplyCode::ActionNotTaken,
                    format!("Dir {} does not exist", arg),
                )
                .await
        }
        Some(Some(dir)) => {
            debug!("Working directory changed to {}", arg);
            session.current_dir = dir;
            control.reply(ReplyCode::CommandOk, "CWD changed").await
        }
    }
}
