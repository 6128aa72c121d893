use crate::config::FtpConfiguration;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_network::control::ControlChannel;
use crate::session::{FtpState, Session};
use log::{info, warn};

/// Handles the PASS FTP command.
///
/// Without a configured password the server is anonymous only. A wrong
/// password logs the client out and sends it back to USER.
pub async fn handle_pass_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &mut Session,
    password: &str,
) -> Result<(), std::io::Error> {
    match config.password.as_deref() {
        None => {
            control
                .reply(ReplyCode::ActionNotTaken, "Anonymous login only")
                .await
        }
        Some(expected) if expected == password => {
            let message = if session.allowed {
                "Already logged in"
            } else {
                "Logged in"
            };
            session.state = FtpState::AwaitAny;
            session.allowed = true;
            session.expected_next = None;
            info!("Client {} logged in", control.peer_addr());
            control.reply(ReplyCode::LoggedIn, message).await
        }
        Some(_) => {
            warn!("Wrong password from {}", control.peer_addr());
            session.state = FtpState::AwaitSpecific;
            session.allowed = false;
            session.expected_next = Some(FtpCommand::USER);
            control.reply(ReplyCode::NotLoggedIn, "Login incorrect").await
        }
    }
}
