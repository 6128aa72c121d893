use crate::core_ftpcommand::ftpcommand::{StructureMode, TypeMode};
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{debug, warn};

/// Handles the TYPE FTP command. Only `I` and `A` are understood.
///
/// Any other code, or none, gets `504` and the type stays as it was.
///
/// # Arguments
///
/// * `control` - The control channel of the client.
/// * `session` - The session whose transfer type changes.
/// * `arg` - The type code.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating the success or failure of the operation.
pub async fn handle_type_command(
    control: &ControlChannel,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    match TypeMode::from_code(arg) {
        Some(mode) => {
            session.type_mode = mode;
            debug!("Transfer type set to {:?}", mode);
            control
                .reply(
                    ReplyCode::CommandOk,
                    format!("Switching to {} mode", mode.display_name()),
                )
                .await
        }
        None => {
            warn!("Unsupported TYPE: {:?}", arg);
            control
                .reply(
                    ReplyCode::NotImplementedForParameter,
                    "Command not implemented for that parameter",
                )
                .await
        }
    }
}

/// Handles the STRU FTP command: `F` (file) or `R` (record).
///
/// Other codes answer `504` and keep the current structure.
pub async fn handle_stru_command(
    control: &ControlChannel,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    match StructureMode::from_code(arg) {
        Some(mode) => {
            session.structure_mode = mode;
            debug!("Structure set to {}", mode.display_name());
            control
                .reply(
                    ReplyCode::CommandOk,
                    format!("Structure set to {}.", mode.code()),
                )
                .await
        }
        None => {
            warn!("Unsupported STRU: {:?}", arg);
            control
                .reply(
                    ReplyCode::NotImplementedForParameter,
                    "Command not implemented for that parameter",
                )
                .await
        }
    }
}
