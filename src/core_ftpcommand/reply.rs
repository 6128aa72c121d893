use std::fmt;

/// Reply code families, named after the first digit of the code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyCategory {
    PositivePreliminary,
    PositiveCompletion,
    PositiveIntermediate,
    TransientNegative,
    PermanentNegative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum ReplyCode {
    RestartMarker = 110,
    ServiceReadyInMinutes = 120,
    DataConnectionAlreadyOpen = 125,
    FileStatusOk = 150,

    CommandOk = 200,
    CommandSuperfluous = 202,
    SystemStatus = 211,
    DirectoryStatus = 212,
    FileStatus = 213,
    HelpMessage = 214,
    SystemType = 215,
    ServiceReady = 220,
    ClosingControl = 221,
    DataConnectionOpen = 225,
    ClosingDataConnection = 226,
    EnteringPassiveMode = 227,
    EnteringExtendedPassiveMode = 229,
    LoggedIn = 230,
    FileActionOk = 250,
    PathCreated = 257,

    NeedPassword = 331,
    NeedAccount = 332,
    PendingFurtherInformation = 350,

    ServiceNotAvailable = 421,
    CantOpenDataConnection = 425,
    ConnectionClosed = 426,
    FileBusy = 450,
    LocalError = 451,
    ActionNotTaken = 452,

    UnknownCommand = 500,
    SyntaxError = 501,
    NotImplemented = 502,
    BadSequence = 503,
    NotImplementedForParameter = 504,
    NotLoggedIn = 530,
    NeedAccountForStoring = 532,
    FileUnavailable = 550,
    PageTypeUnknown = 551,
    ExceededStorage = 552,
    FileNameNotAllowed = 553,
}

impl ReplyCode {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn category(self) -> ReplyCategory {
        match self.code() / 100 {
            1 => ReplyCategory::PositivePreliminary,
            2 => ReplyCategory::PositiveCompletion,
            3 => ReplyCategory::PositiveIntermediate,
            4 => ReplyCategory::TransientNegative,
            _ => ReplyCategory::PermanentNegative,
        }
    }
}

/// One reply on the control connection.
///
/// Renders as `<code> <message>\n`, except for the system status reply
/// which opens a multi-line block: `211-FTP server status:\n<message>\n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub code: ReplyCode,
    pub message: String,
}

impl Reply {
    pub fn new(code: ReplyCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            ReplyCode::SystemStatus => write!(
                f,
                "{}-FTP server status:\n{}\n",
                self.code.code(),
                self.message
            ),
            code => writeln!(f, "{} {}", code.code(), self.message),
        }
    }
}
