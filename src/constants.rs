// src/constants.rs

/// Reserved keys of the filesystem description.
pub const MODE_KEY: &str = "___mode";
pub const CONTENTS_KEY: &str = "___contents";
pub const TARGET_KEY: &str = "___target";

/// Owner stamped on nodes when no user is configured.
pub const DEFAULT_OWNER: &str = "root";

pub const GREETING: &str = "(mockftpd 1.0.0)";
pub const SYSTEM_TYPE: &str = "UNIX Type: L8";

/// Separator between entries of a LIST/NLST payload.
pub const LISTING_TERMINATOR: &str = "\r\n";

/// Longest control line accepted, newline included.
pub const MAX_LINE_LENGTH: usize = 8192;

/// Client port used for active transfers when no PORT was given.
pub const DEFAULT_DATA_PORT: u16 = 20;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/mockftpd.toml";
