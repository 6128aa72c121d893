use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_ftpcommand::utils::ensure_logged_in;
use crate::core_network::control::ControlChannel;
use crate::session::Session;
use log::{info, warn};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Client address announced with PORT for active transfers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveTarget {
    pub ip: [u8; 4],
    pub port: u16,
}

impl ActiveTarget {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::from(self.ip), self.port))
    }
}

/// Parses `h1,h2,h3,h4,p1,p2`. Every field has to fit in a byte.
pub fn parse_port_argument(arg: &str) -> Option<ActiveTarget> {
    let parts: Vec<u8> = arg
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .ok()?;

    match parts.as_slice() {
        [h1, h2, h3, h4, p1, p2] => Some(ActiveTarget {
            ip: [*h1, *h2, *h3, *h4],
            port: (u16::from(*p1) << 8) + u16::from(*p2),
        }),
        _ => None,
    }
}

/// Handles the PORT (Active Mode) FTP command.
///
/// Only records the target; the connection is opened by the next transfer.
pub async fn handle_port_command(
    control: &ControlChannel,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error> {
    if !ensure_logged_in(control, session).await? {
        return Ok(());
    }

    match parse_port_argument(arg) {
        Some(target) => {
            info!("Received PORT command, data target is {}", target.socket_addr());
            session.active_target = Some(target);
            control.reply(ReplyCode::CommandOk, "Defined port").await
        }
        None => {
            warn!("Invalid PORT argument: {:?}", arg);
            control.reply(ReplyCode::SyntaxError, "Wrong port format").await
        }
    }
}
