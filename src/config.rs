use crate::constants::DEFAULT_OWNER;
use crate::core_mockfs::{self, FsError, MockFs, SharedFs};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid filesystem description: {0}")]
    Filesystem(#[from] FsError),
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub passive_port: Option<u16>, // 0 or absent means ephemeral
    pub owner: Option<String>,
}

fn default_host() -> String {
    String::from("127.0.0.1")
}

fn default_port() -> u16 {
    21
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: None,
            password: None,
            passive_port: None,
            owner: None,
        }
    }
}

/// On-disk configuration: a `[server]` table and the `[filesystem]` description.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub filesystem: toml::Table,
}

impl FileConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(config_str)?)
    }

    /// Builds the tree described by `[filesystem]` and the runtime configuration around it.
    pub fn into_configuration(self) -> Result<FtpConfiguration, ConfigError> {
        let owner = self
            .server
            .owner
            .clone()
            .or_else(|| self.server.user.clone())
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());
        let fs = core_mockfs::create(&self.filesystem, &owner, Local::now())?;

        Ok(FtpConfiguration {
            host: self.server.host,
            port: self.server.port,
            user: self.server.user,
            password: self.server.password,
            passive_port: self.server.passive_port.filter(|port| *port != 0),
            owner,
            filesystem: core_mockfs::shared(fs),
        })
    }
}

/// Runtime configuration handed to every session.
#[derive(Clone, Debug)]
pub struct FtpConfiguration {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub passive_port: Option<u16>,
    pub owner: String,
    pub filesystem: SharedFs,
}

impl FtpConfiguration {
    /// Anonymous configuration serving `fs`.
    pub fn new(host: impl Into<String>, port: u16, fs: MockFs) -> Self {
        Self {
            host: host.into(),
            port,
            user: None,
            password: None,
            passive_port: None,
            owner: DEFAULT_OWNER.to_string(),
            filesystem: core_mockfs::shared(fs),
        }
    }

    /// Requires `user`/`password` to log in. Nodes created afterwards are owned by `user`.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        let user = user.into();
        self.owner = user.clone();
        self.user = Some(user);
        self.password = Some(password.into());
        self
    }

    pub fn with_passive_port(mut self, port: u16) -> Self {
        self.passive_port = Some(port).filter(|port| *port != 0);
        self
    }

    /// Sessions start logged out only when both a user and a password are configured.
    pub fn login_required(&self) -> bool {
        self.user.is_some() && self.password.is_some()
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[server]
host = "0.0.0.0"
port = 2121
user = "test"
password = "testpwd"

[filesystem]
folder1 = { foo = { ___contents = "bar" } }
folder2 = {}
"#;

    #[test]
    fn test_parse_and_build() {
        let config = FileConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.server.port, 2121);
        assert_eq!(config.server.user.as_deref(), Some("test"));

        let configuration = config.into_configuration().unwrap();
        assert!(configuration.login_required());
        assert_eq!(configuration.owner(), "test");
        assert_eq!(configuration.passive_port, None);

        let fs = configuration.filesystem.try_lock().unwrap();
        let foo = fs.get(fs.root(), "/folder1/foo").unwrap();
        assert_eq!(fs.node(foo).unwrap().contents(), Some(&b"bar"[..]));
        assert_eq!(fs.node(foo).unwrap().user, "test");
    }

    #[test]
    fn test_defaults() {
        let configuration = FileConfig::from_toml_str("")
            .unwrap()
            .into_configuration()
            .unwrap();
        assert_eq!(configuration.host, "127.0.0.1");
        assert_eq!(configuration.port, 21);
        assert!(!configuration.login_required());
        assert_eq!(configuration.owner(), "root");
    }

    #[test]
    fn test_user_without_password_is_anonymous() {
        let config = FileConfig::from_toml_str("[server]\nuser = \"test\"\npassive_port = 0\n").unwrap();
        let configuration = config.into_configuration().unwrap();
        assert!(!configuration.login_required());
        assert_eq!(configuration.passive_port, None);
    }

    #[test]
    fn test_builders() {
        let configuration = FtpConfiguration::new("127.0.0.1", 0, MockFs::new("root", Local::now()))
            .with_credentials("test", "testpwd")
            .with_passive_port(0);
        assert!(configuration.login_required());
        assert_eq!(configuration.owner(), "test");
        assert_eq!(configuration.passive_port, None);
        assert_eq!(configuration.with_passive_port(4000).passive_port, Some(4000));
    }

    #[test]
    fn test_invalid_description() {
        let config = FileConfig::from_toml_str("[filesystem]\nfoo = 42\n").unwrap();
        assert!(matches!(
            config.into_configuration(),
            Err(ConfigError::Filesystem(FsError::InvalidDescription { .. }))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = FileConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(matches!(
            FileConfig::load_from_file("/definitely/not/here.toml"),
            Err(ConfigError::Read { .. })
        ));
        assert!(matches!(
            FileConfig::from_toml_str("[server\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}
