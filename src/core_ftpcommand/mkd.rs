use crate::config::FtpConfiguration;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_mockfs::node::DEFAULT_MODE;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use chrono::Local;
use log::{info, warn};

/// Handles the MKD FTP command.
///
/// The new directory is owned by the configured user and gets mode 777.
/// Fails when the path already exists or its parent cannot be resolved.
pub async fn handle_mkd_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &Session,
    arg: &str,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    let created = {
        let mut fs = config.filesystem.lock().await;
        let cwd = session.cwd(&fs);
        if fs.path_exists(cwd, arg) {
            None
        } else {
            match fs.mkdir(cwd, arg, Local::now(), config.owner(), DEFAULT_MODE) {
                Ok(id) => Some(fs.absolute_path(id)),
                Err(e) => {
                    warn!("MKD {} failed: {}", arg, e);
                    None
                }
            }
        }
    };

    match created {
        Some(path) => {
            info!("Directory created: {}", path);
            control
                .reply(ReplyCode::PathCreated, format!("\"{}\" created", path))
                .await
        }
        None => {
            control
                .reply(
                    ReplyCode::FileUnavailable,
                    "Create directory operation failed",
                )
                .await
        }
    }
}
