use crate::config::FtpConfiguration;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{debug, error, info};
use std::io;
use std::net::Ipv4Addr;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A passive data listener waiting for its single client connection.
///
/// The accept runs in its own task from the moment the listener is bound, so
/// a client may connect before it sends the transfer command. Dropping the
/// listener aborts the task and releases the port.
#[derive(Debug)]
pub struct PassiveListener {
    port: u16,
    accept: JoinHandle<io::Result<TcpStream>>,
}

impl PassiveListener {
    /// Binds on every interface; `port` 0 picks an ephemeral port.
    pub async fn bind(port: u16) -> io::Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
        let port = listener.local_addr()?.port();
        debug!("Passive listener bound on port {}", port);

        let accept = tokio::spawn(async move {
            let (data_stream, addr) = listener.accept().await?;
            debug!("Accepted data connection from: {}", addr);
            Ok(data_stream)
        });

        Ok(Self { port, accept })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Waits for the client's data connection. The listener is closed afterwards.
    pub async fn accept(mut self) -> io::Result<TcpStream> {
        match (&mut self.accept).await {
            Ok(result) => result,
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    }
}

impl Drop for PassiveListener {
    fn drop(&mut self) {
        self.accept.abort();
    }
}

pub fn passive_reply(port: u16) -> String {
    format!(
        "Entering Passive Mode (0,0,0,0,{},{})",
        port >> 8,
        port & 0xff
    )
}

pub fn extended_passive_reply(port: u16) -> String {
    format!("Entering Extended Passive Mode (|||{}|)", port)
}

/// Handles PASV and EPSV: opens a fresh listener, replacing any previous one.
pub async fn handle_pasv_command(
    control: &ControlChannel,
    config: &FtpConfiguration,
    session: &mut Session,
    extended: bool,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    session.close_passive();

    let listener = match PassiveListener::bind(config.passive_port.unwrap_or(0)).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to set up passive listener: {}", e);
            return control.reply(ReplyCode::LocalError, e.to_string()).await;
        }
    };

    let port = listener.port();
    session.passive = Some(listener);
    info!("Passive mode enabled on port {}", port);

    if extended {
        control
            .reply(ReplyCode::EnteringExtendedPassiveMode, extended_passive_reply(port))
            .await
    } else {
        control
            .reply(ReplyCode::EnteringPassiveMode, passive_reply(port))
            .await
    }
}
