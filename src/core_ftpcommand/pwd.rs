use crate::config::FtpConfiguration;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_network::control::ControlChannel;
use crate::session::Session;

/// Handles the PWD FTP command.
pub async fn handle_pwd_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &Session,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    let path = {
        let fs = config.filesystem.lock().await;
        fs.absolute_path(session.cwd(&fs))
    };
    control.reply(ReplyCode::PathCreated, path).await
}
