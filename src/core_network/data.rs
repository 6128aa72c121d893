use crate::constants::DEFAULT_DATA_PORT;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{debug, error};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpStream;

/// Whether the client set up a data channel with PORT or PASV.
pub fn has_data_target(session: &Session) -> bool {
    session.active_target.is_some() || session.passive.is_some()
}

/// Opens the data connection for one transfer.
///
/// A pending passive listener wins and is consumed. Otherwise the server
/// connects out to the PORT target, or to the control peer on port 20 when
/// none was given. Failures are answered on the control channel and yield
/// `Ok(None)`; the outer error is only for the control write itself.
pub async fn open_data_connection(
    control: &ControlChannel,
    session: &mut Session,
) -> io::Result<Option<TcpStream>> {
    if let Some(listener) = session.passive.take() {
        return match listener.accept().await {
            Ok(stream) => Ok(Some(stream)),
            Err(e) => {
                error!("Passive data connection failed: {}", e);
                control.reply(ReplyCode::LocalError, e.to_string()).await?;
                Ok(None)
            }
        };
    }

    let addr = match session.active_target {
        Some(target) => target.socket_addr(),
        None => SocketAddr::new(control.peer_addr().ip(), DEFAULT_DATA_PORT),
    };

    debug!("Opening active data connection to {}", addr);
    match TcpStream::connect(addr).await {
        Ok(stream) => Ok(Some(stream)),
        Err(e) => {
            error!("Failed to connect to client {}: {}", addr, e);
            control
                .reply(ReplyCode::CantOpenDataConnection, "Can't open data connection")
                .await?;
            Ok(None)
        }
    }
}
