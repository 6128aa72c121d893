use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::warn;

/// Answers `530 Not logged in` unless the session may touch the filesystem.
///
/// Returns whether the caller should go on.
pub async fn ensure_logged_in(
    control: &ControlChannel,
    session: &Session,
) -> Result<bool, std::io::Error> {
    if session.allowed {
        return Ok(true);
    }

    warn!("Command refused, client {} is not logged in", control.peer_addr());
    control.reply(ReplyCode::NotLoggedIn, "Not logged in").await?;
    Ok(false)
}

pub async fn handle_not_implemented(control: &ControlChannel) -> Result<(), std::io::Error> {
    control.reply(ReplyCode::NotImplemented, "Not implemented").await
}
