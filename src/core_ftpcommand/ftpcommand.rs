use std::fmt;

/// Every verb the server recognises on the control connection.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Eq, Hash, PartialEq, Debug)]
pub enum FtpCommand {
    USER,
    PASS,
    ACCT,
    CWD,
    CDUP,
    SMNT,
    QUIT,
    REIN,
    PORT,
    PASV,
    EPSV,
    TYPE,
    STRU,
    MODE,
    RETR,
    STOR,
    STOU,
    APPE,
    ALLO,
    REST,
    RNFR,
    RNTO,
    ABOR,
    DELE,
    RMD,
    MKD,
    PWD,
    LIST,
    NLST,
    SITE,
    SYST,
    STAT,
    HELP,
    NOOP,
}

impl FtpCommand {
    /// Maps an exact, upper-case verb to its command.
    pub fn from_verb(verb: &str) -> Option<FtpCommand> {
        match verb {
            "USER" => Some(FtpCommand::USER),
            "PASS" => Some(FtpCommand::PASS),
            "ACCT" => Some(FtpCommand::ACCT),
            "CWD" => Some(FtpCommand::CWD),
            "CDUP" => Some(FtpCommand::CDUP),
            "SMNT" => Some(FtpCommand::SMNT),
            "QUIT" => Some(FtpCommand::QUIT),
            "REIN" => Some(FtpCommand::REIN),
            "PORT" => Some(FtpCommand::PORT),
            "PASV" => Some(FtpCommand::PASV),
            "EPSV" => Some(FtpCommand::EPSV),
            "TYPE" => Some(FtpCommand::TYPE),
            "STRU" => Some(FtpCommand::STRU),
            "MODE" => Some(FtpCommand::MODE),
            "RETR" => Some(FtpCommand::RETR),
            "STOR" => Some(FtpCommand::STOR),
            "STOU" => Some(FtpCommand::STOU),
            "APPE" => Some(FtpCommand::APPE),
            "ALLO" => Some(FtpCommand::ALLO),
            "REST" => Some(FtpCommand::REST),
            "RNFR" => Some(FtpCommand::RNFR),
            "RNTO" => Some(FtpCommand::RNTO),
            "ABOR" => Some(FtpCommand::ABOR),
            "DELE" => Some(FtpCommand::DELE),
            "RMD" => Some(FtpCommand::RMD),
            "MKD" => Some(FtpCommand::MKD),
            "PWD" => Some(FtpCommand::PWD),
            "LIST" => Some(FtpCommand::LIST),
            "NLST" => Some(FtpCommand::NLST),
            "SITE" => Some(FtpCommand::SITE),
            "SYST" => Some(FtpCommand::SYST),
            "STAT" => Some(FtpCommand::STAT),
            "HELP" => Some(FtpCommand::HELP),
            "NOOP" => Some(FtpCommand::NOOP),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FtpCommand::USER => "USER",
            FtpCommand::PASS => "PASS",
            FtpCommand::ACCT => "ACCT",
            FtpCommand::CWD => "CWD",
            FtpCommand::CDUP => "CDUP",
            FtpCommand::SMNT => "SMNT",
            FtpCommand::QUIT => "QUIT",
            FtpCommand::REIN => "REIN",
            FtpCommand::PORT => "PORT",
            FtpCommand::PASV => "PASV",
            FtpCommand::EPSV => "EPSV",
            FtpCommand::TYPE => "TYPE",
            FtpCommand::STRU => "STRU",
            FtpCommand::MODE => "MODE",
            FtpCommand::RETR => "RETR",
            FtpCommand::STOR => "STOR",
            FtpCommand::STOU => "STOU",
            FtpCommand::APPE => "APPE",
            FtpCommand::ALLO => "ALLO",
            FtpCommand::REST => "REST",
            FtpCommand::RNFR => "RNFR",
            FtpCommand::RNTO => "RNTO",
            FtpCommand::ABOR => "ABOR",
            FtpCommand::DELE => "DELE",
            FtpCommand::RMD => "RMD",
            FtpCommand::MKD => "MKD",
            FtpCommand::PWD => "PWD",
            FtpCommand::LIST => "LIST",
            FtpCommand::NLST => "NLST",
            FtpCommand::SITE => "SITE",
            FtpCommand::SYST => "SYST",
            FtpCommand::STAT => "STAT",
            FtpCommand::HELP => "HELP",
            FtpCommand::NOOP => "NOOP",
        }
    }
}

impl fmt::Display for FtpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded control line: the verb plus its space separated arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub verb: FtpCommand,
    pub args: Vec<String>,
}

impl Command {
    /// Decodes one raw control line.
    ///
    /// The verb is taken from the first four characters, right-trimmed, and has to
    /// match exactly (case-sensitive). Arguments are every space separated
    /// token after the first one, each trimmed of surrounding whitespace.
    pub fn decode(raw: &str) -> Option<Command> {
        let head: String = raw.chars().take(4).collect();
        let verb = FtpCommand::from_verb(head.trim_end())?;
        let args = raw
            .split(' ')
            .skip(1)
            .map(|arg| arg.trim().to_string())
            .collect();

        Some(Command { verb, args })
    }

    /// First argument, or `""` when the verb came alone.
    pub fn arg(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }
}

/// Representation type selected with TYPE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeMode {
    Image,
    Ascii,
}

impl TypeMode {
    pub fn from_code(code: &str) -> Option<TypeMode> {
        match code {
            "I" => Some(TypeMode::Image),
            "A" => Some(TypeMode::Ascii),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TypeMode::Image => "binary",
            TypeMode::Ascii => "ascii",
        }
    }
}

/// File structure selected with STRU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructureMode {
    File,
    Record,
}

impl StructureMode {
    pub fn from_code(code: &str) -> Option<StructureMode> {
        match code {
            "F" => Some(StructureMode::File),
            "R" => Some(StructureMode::Record),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StructureMode::File => "F",
            StructureMode::Record => "R",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StructureMode::File => "File",
            StructureMode::Record => "Mode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_splits_arguments() {
        let command = Command::decode("RNFR arg1 arg2 arg3").unwrap();
        assert_eq!(command.verb, FtpCommand::RNFR);
        assert_eq!(command.args, vec!["arg1", "arg2", "arg3"]);
        assert_eq!(command.arg(), "arg1");
    }

    #[test]
    fn test_decode_trims_line_endings() {
        let command = Command::decode("CWD /folder1\r\n").unwrap();
        assert_eq!(command.verb, FtpCommand::CWD);
        assert_eq!(command.args, vec!["/folder1"]);

        let command = Command::decode("PWD\r\n").unwrap();
        assert_eq!(command.verb, FtpCommand::PWD);
        assert!(command.args.is_empty());
        assert_eq!(command.arg(), "");
    }

    #[test]
    fn test_decode_rejects_unknown_verbs() {
        assert_eq!(Command::decode("FUBR arg1"), None);
        assert_eq!(Command::decode("BLBLBL IATe"), None);
        assert_eq!(Command::decode(""), None);
        assert_eq!(Command::decode("user test"), None);
    }

    #[test]
    fn test_decode_only_reads_four_characters() {
        // "LISTX" still decodes as LIST, the tail is not an argument
        let command = Command::decode("LISTX").unwrap();
        assert_eq!(command.verb, FtpCommand::LIST);
        assert!(command.args.is_empty());
    }

    #[test]
    fn test_verb_round_trip() {
        for verb in ["USER", "CDUP", "RMD", "NLST", "EPSV", "NOOP"] {
            assert_eq!(FtpCommand::from_verb(verb).unwrap().as_str(), verb);
        }
    }

    #[test]
    fn test_modes() {
        assert_eq!(TypeMode::from_code("I"), Some(TypeMode::Image));
        assert_eq!(TypeMode::from_code("A").unwrap().display_name(), "ascii");
        assert_eq!(TypeMode::from_code("E"), None);
        assert_eq!(StructureMode::from_code("R").unwrap().display_name(), "Mode");
        assert_eq!(StructureMode::from_code("F").unwrap().code(), "F");
        assert_eq!(StructureMode::from_code("P"), None);
    }
}
