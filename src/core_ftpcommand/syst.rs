use crate::constants::SYSTEM_TYPE;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_network::control::ControlChannel;
use log::info;

/// Handles the SYST (System) FTP command.
pub async fn handle_syst_command(control: &ControlChannel) -> Result<(), std::io::Error> {
    info!("Responding to SYST command with system type.");
    control.reply(ReplyCode::SystemType, SYSTEM_TYPE).await
}
