use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_network::control::ControlChannel;
use crate::session::{FtpState, Session};
use log::{error, info};

/// Handles the QUIT FTP command.
///
/// Accepted in every state. Closes the passive listener and the control
/// connection; the session is over afterwards.
pub async fn handle_quit_command(
    control: &ControlChannel,
    session: &mut Session,
) -> Result<(), std::io::Error> {
    info!("Received QUIT command. Closing connection.");
    session.close_passive();
    session.state = FtpState::Closed;

    control.reply(ReplyCode::ClosingControl, "Goodbye").await?;
    if let Err(e) = control.close().await {
        error!("Failed to close control connection: {}", e);
    }
    Ok(())
}
