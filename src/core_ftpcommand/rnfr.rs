use crate::config::FtpConfiguration;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_network::control::ControlChannel;
use crate::session::{FtpState, Session};
use log::{info, warn};

/// Handles the RNFR FTP command.
///
/// Remembers the source path and only lets RNTO through until it arrives.
pub async fn handle_rnfr_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    let exists = {
        let fs = config.filesystem.lock().await;
        fs.path_exists(session.cwd(&fs), arg)
    };

    if !exists {
        warn!("RNFR on unknown path: {}", arg);
        return control.reply(ReplyCode::FileUnavailable, "RNFR Failed").await;
    }

    info!("Rename from: {}", arg);
    session.rename_from = Some(arg.to_string());
    session.state = FtpState::AwaitSpecific;
    session.expected_next = Some(FtpCommand::RNTO);
    control
        .reply(ReplyCode::PendingFurtherInformation, "Ready for RNTO")
        .await
}
