use crate::config::FtpConfiguration;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_network::control::ControlChannel;
use crate::session::{FtpState, Session};
use log::{info, warn};

/// Handles the USER FTP command.
///
/// A matching user name moves the session to waiting for PASS. A client that
/// is already logged in as that user keeps its rights and is told any
/// password will do.
///
/// # Arguments
///
/// * `control` - The control channel of the client.
/// * `config` - The server configuration holding the expected user.
/// * `session` - The session of the client.
/// * `username` - The username provided by the client.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_user_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &mut Session,
    username: &str,
) -> Result<(), std::io::Error> {
    info!("Received USER command with username: {}", username);

    if config.user.as_deref() != Some(username) {
        warn!("Unknown user: {}", username);
        return control.reply(ReplyCode::NotLoggedIn, "Login incorrect").await;
    }

    let already_allowed = session.allowed;
    session.state = FtpState::AwaitSpecific;
    session.expected_next = Some(FtpCommand::PASS);

    let message = if already_allowed {
        "Any password will do"
    } else {
        "Please specify the password"
    };
    control.reply(ReplyCode::NeedPassword, message).await
}
