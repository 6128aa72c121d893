use crate::config::FtpConfiguration;
use crate::core_network::network;
use crate::helpers::log_config;
use anyhow::{Context, Result};
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A running server. Dropping the handle stops the accept loop too.
#[derive(Debug)]
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the server actually listens on, useful after binding port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections and waits for the accept loop to end.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            error!("Accept loop ended abnormally: {}", e);
        }
    }

    /// Waits until the accept loop ends.
    pub async fn wait(self) -> Result<()> {
        let ServerHandle { shutdown, task, .. } = self;
        let outcome = task.await;
        drop(shutdown);
        outcome.context("Accept loop ended abnormally")
    }
}

/// Binds the configured address and starts serving in the background.
///
/// # Arguments
///
/// * `configuration` - The runtime configuration, tree included.
///
/// # Returns
///
/// The handle of the running server, or the bind error.
pub async fn start(configuration: FtpConfiguration) -> Result<ServerHandle> {
    let address = format!("{}:{}", configuration.host, configuration.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    let local_addr = listener.local_addr()?;
    info!("Server listening on {}", local_addr);

    let (shutdown, shutdown_rx) = oneshot::channel();
    let task = tokio::spawn(network::accept_loop(
        listener,
        Arc::new(configuration),
        shutdown_rx,
    ));

    Ok(ServerHandle {
        local_addr,
        shutdown,
        task,
    })
}

/// Runs the FTP server with the provided configuration until it stops.
pub async fn run(configuration: FtpConfiguration) -> Result<()> {
    info!("Starting server with config:");
    log_config(&configuration);

    let handle = match start(configuration).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e);
        }
    };
    info!("Server started successfully.");

    handle.wait().await
}
