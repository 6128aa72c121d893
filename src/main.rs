use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use env_logger::{Builder, Env};
use log::info;
use mockftpd::core_cli::Cli;
use mockftpd::{server, FileConfig};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };

    // Initialize the logger with a custom format and colors
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let timestamp = buf.timestamp().to_string();
            let level = match record.level() {
                log::Level::Error => record.level().to_string().red(),
                log::Level::Warn => record.level().to_string().yellow(),
                log::Level::Info => record.level().to_string().green(),
                log::Level::Debug => record.level().to_string().blue(),
                log::Level::Trace => record.level().to_string().white(),
            };
            writeln!(buf, "[{}] [{}] {}", timestamp, level, record.args())
        })
        .init();

    let mut file_config = FileConfig::load_from_file(&args.config)
        .with_context(|| format!("Failed to load configuration file: {}", args.config))?;

    if let Some(port) = args.port {
        file_config.server.port = port;
    }
    if let Some(host) = args.host {
        file_config.server.host = host;
    }

    let configuration = file_config
        .into_configuration()
        .context("Failed to build the filesystem")?;
    info!("Configuration loaded from {}", args.config);

    server::run(configuration).await
}
