use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_network::control::ControlChannel;

pub async fn handle_noop_command(control: &ControlChannel) -> Result<(), std::io::Error> {
    control.reply(ReplyCode::CommandOk, "NOOP ok").await
}
