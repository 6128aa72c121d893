use crate::config::FtpConfiguration;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_network::control::ControlChannel;
use crate::session::Session;

/// Body of the 211 status block for this session.
pub fn status_block(control: &ControlChannel, config: &FtpConfiguration, session: &Session) -> String {
    let mut info = format!("\tConnected to {}\n", control.local_addr().ip());

    if let (Some(user), true) = (&config.user, session.allowed) {
        info.push_str(&format!("\tLogged in as {}\n", user));
    }

    info.push_str("\tTYPE: ASCII\n");
    info.push_str("\tNo session bandwith limit\n");
    info.push_str("\tControl connection is plain text\n");
    info.push_str("\tData connections will be plain text\n");
    info.push_str("\tSMFTP v1.0\n");
    info
}

/// Handles the STAT FTP command. Available before login.
pub async fn handle_stat_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &Session,
) -> Result<(), std::io::Error> {
    control
        .reply(
            ReplyCode::SystemStatus,
            status_block(control, config, session),
        )
        .await
}
