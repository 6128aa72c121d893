use crate::constants::DEFAULT_CONFIG_PATH;
use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "mockftpd",
    about = "An FTP server serving an in-memory filesystem described in TOML."
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Port to listen on, overrides the configuration
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to listen on, overrides the configuration
    #[arg(long)]
    pub host: Option<String>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["mockftpd"]);
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
        assert_eq!(cli.port, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["mockftpd", "-c", "demo.toml", "-p", "2121", "--host", "0.0.0.0", "-v"]);
        assert_eq!(cli.config, "demo.toml");
        assert_eq!(cli.port, Some(2121));
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert!(cli.verbose);
    }
}
