use crate::core_ftpcommand::reply::{Reply, ReplyCode};
use crate::helpers::send_response;
use log::trace;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;

/// Write side of a control connection.
///
/// Cloned into transfer tasks so they can report completion on their own.
#[derive(Clone, Debug)]
pub struct ControlChannel {
    writer: Arc<Mutex<OwnedWriteHalf>>,
    local_addr: SocketAddr,
    peer_addr: SocketAddr,
}

impl ControlChannel {
    pub fn new(writer: OwnedWriteHalf, local_addr: SocketAddr, peer_addr: SocketAddr) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            local_addr,
            peer_addr,
        }
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub async fn reply(&self, code: ReplyCode, message: impl Into<String>) -> io::Result<()> {
        let reply = Reply::new(code, message);
        trace!("Reply to {}: {}", self.peer_addr, reply.to_string().trim_end());
        send_response(&self.writer, reply.to_string().as_bytes()).await
    }

    /// Shuts down the write side; the client sees EOF.
    pub async fn close(&self) -> io::Result<()> {
        self.writer.lock().await.shutdown().await
    }
}
