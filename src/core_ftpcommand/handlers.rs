use crate::config::FtpConfiguration;
use crate::core_ftpcommand::ftpcommand::{Command, FtpCommand};
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::handle_not_implemented;
use crate::core_ftpcommand::{
    cwd, dele, list, mkd, noop, pass, pwd, quit, retr, rnfr, rnto, stat, stor, syst, type_, user,
};
use crate::core_network::control::ControlChannel;
use crate::helpers::unique_file_name;
use crate::session::Session;
use log::info;

// Specific crates for PORT and PASV commands
use crate::core_network::pasv;
use crate::core_network::port;

/// Runs the handler for an already sequenced command.
///
/// Every handler replies on `control` itself and mutates `session` in place.
/// The returned error is a failed write on the control connection, which
/// ends the session.
pub async fn process_command(
    command: &Command,
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &mut Session,
) -> Result<(), std::io::Error> {
    let arg = command.arg();

    match command.verb {
        FtpCommand::USER => user::handle_user_command(control, config, session, arg).await,
        FtpCommand::PASS => pass::handle_pass_command(control, config, session, arg).await,
        FtpCommand::CWD => cwd::handle_cwd_command(control, config, session, arg).await,
        FtpCommand::CDUP => cwd::handle_cwd_command(control, config, session, "..").await,
        FtpCommand::QUIT => quit::handle_quit_command(control, session).await,
        FtpCommand::REIN => {
            let root = config.filesystem.lock().await.root();
            session.reinitialize(config, root);
            info!("Session of {} reinitialized", control.peer_addr());
            control
                .reply(ReplyCode::ServiceReady, "Service ready for new user")
                .await
        }
        FtpCommand::PORT => port::handle_port_command(control, session, arg).await,
        FtpCommand::PASV => pasv::handle_pasv_command(control, config, session, false).await,
        FtpCommand::EPSV => pasv::handle_pasv_command(control, config, session, true).await,
        FtpCommand::TYPE => type_::handle_type_command(control, session, arg).await,
        FtpCommand::STRU => type_::handle_stru_command(control, session, arg).await,
        FtpCommand::RETR => retr::handle_retr_command(control, config, session, arg).await,
        FtpCommand::STOR | FtpCommand::APPE => {
            stor::handle_stor_command(control, config, session, arg).await
        }
        FtpCommand::STOU => {
            let name = unique_file_name();
            stor::handle_stor_command(control, config, session, &name).await
        }
        FtpCommand::RNFR => rnfr::handle_rnfr_command(control, config, session, arg).await,
        FtpCommand::RNTO => rnto::handle_rnto_command(control, config, session, arg).await,
        FtpCommand::DELE | FtpCommand::RMD | FtpCommand::ABOR => {
            dele::handle_dele_command(control, config, session, arg).await
        }
        FtpCommand::MKD => mkd::handle_mkd_command(control, config, session, arg).await,
        FtpCommand::PWD => pwd::handle_pwd_command(control, config, session).await,
        FtpCommand::LIST => list::handle_list_command(control, config, session, arg, true).await,
        FtpCommand::NLST => list::handle_list_command(control, config, session, arg, false).await,
        FtpCommand::SYST => syst::handle_syst_command(control).await,
        FtpCommand::STAT => stat::handle_stat_command(control, config, session).await,
        FtpCommand::NOOP => noop::handle_noop_command(control).await,
        FtpCommand::ACCT
        | FtpCommand::SMNT
        | FtpCommand::MODE
        | FtpCommand::ALLO
        | FtpCommand::REST
        | FtpCommand::SITE
        | FtpCommand::HELP => handle_not_implemented(control).await,
    }
}
