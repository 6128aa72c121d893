use crate::config::FtpConfiguration;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_mockfs::tree::split_parent;
use crate::core_network::control::ControlChannel;
use crate::session::{FtpState, Session};
use log::{info, warn};

/// Handles the RNTO FTP command.
///
/// Moves the node remembered by RNFR to `arg`. The session goes back to
/// accepting any command whatever the outcome.
pub async fn handle_rnto_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    let rename_from = match session.rename_from.take() {
        Some(path) => path,
        None => {
            return control
                .reply(ReplyCode::BadSequence, "Please use RNFR before")
                .await;
        }
    };

    session.state = FtpState::AwaitAny;
    session.expected_next = None;

    let renamed = {
        let mut fs = config.filesystem.lock().await;
        let cwd = session.cwd(&fs);
        let (parent, _) = split_parent(arg);
        if !fs.path_exists(cwd, parent) {
            false
        } else {
            match fs.move_node(&rename_from, arg, cwd) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Rename {} -> {} failed: {}", rename_from, arg, e);
                    false
                }
            }
        }
    };

    if renamed {
        info!("Renamed {} to {}", rename_from, arg);
        control
            .reply(ReplyCode::FileActionOk, "Rename Successful")
            .await
    } else {
        control.reply(ReplyCode::FileUnavailable, "RNTO Failed").await
    }
}
