//! A scriptable FTP server backed by an in-memory filesystem, for testing FTP clients.

pub mod config;
pub mod constants;
pub mod core_cli;
pub mod core_ftpcommand;
pub mod core_mockfs;
pub mod core_network;
pub mod helpers;
pub mod server;
pub mod session;

pub use config::{ConfigError, FileConfig, FtpConfiguration};
pub use core_mockfs::{create as create_mock_filesystem, FsError, MockFs};
pub use server::{run, start, ServerHandle};
