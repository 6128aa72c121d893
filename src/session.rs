use crate::config::FtpConfiguration;
use crate::core_ftpcommand::ftpcommand::{Command, FtpCommand, StructureMode, TypeMode};
use crate::core_ftpcommand::handlers::process_command;
use crate::core_ftpcommand::quit::handle_quit_command;
use crate::core_ftpcommand::reply::ReplyCode;
use crate::core_mockfs::{MockFs, NodeId};
use crate::core_network::control::ControlChannel;
use crate::core_network::pasv::PassiveListener;
use crate::core_network::port::ActiveTarget;
use log::{debug, warn};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FtpState {
    /// Any command is dispatched.
    AwaitAny,
    /// Only `expected_next` is dispatched, anything else gets a 503.
    AwaitSpecific,
    /// Terminal.
    Closed,
}

/// Per-connection protocol state.
#[derive(Debug)]
pub struct Session {
    pub state: FtpState,
    pub allowed: bool,
    pub current_dir: NodeId,
    /// Shared with the transfer tasks spawned by RETR and STOR.
    pub transfer_pending: Arc<AtomicBool>,
    pub expected_next: Option<FtpCommand>,
    pub active_target: Option<ActiveTarget>,
    pub passive: Option<PassiveListener>,
    pub rename_from: Option<String>,
    pub type_mode: TypeMode,
    pub structure_mode: StructureMode,
}

impl Session {
    /// Fresh state at `root`.
    ///
    /// A session that has to log in starts waiting for USER; an anonymous one
    /// is allowed from the start.
    pub fn new(config: &FtpConfiguration, root: NodeId) -> Self {
        let login_required = config.login_required();
        Self {
            state: if login_required {
                FtpState::AwaitSpecific
            } else {
                FtpState::AwaitAny
            },
            allowed: !login_required,
            current_dir: root,
            transfer_pending: Arc::new(AtomicBool::new(false)),
            expected_next: login_required.then_some(FtpCommand::USER),
            active_target: None,
            passive: None,
            rename_from: None,
            type_mode: TypeMode::Ascii,
            structure_mode: StructureMode::File,
        }
    }

    /// Resets to the initial state, as REIN does.
    pub fn reinitialize(&mut self, config: &FtpConfiguration, root: NodeId) {
        self.close_passive();
        *self = Session::new(config, root);
    }

    /// Working directory, falling back to the root once it has been removed.
    pub fn cwd(&self, fs: &MockFs) -> NodeId {
        if fs.contains(self.current_dir) {
            self.current_dir
        } else {
            fs.root()
        }
    }

    pub fn is_transfer_pending(&self) -> bool {
        self.transfer_pending.load(Ordering::SeqCst)
    }

    pub fn close_passive(&mut self) {
        if self.passive.take().is_some() {
            debug!("Passive listener closed");
        }
    }

    /// Decodes and dispatches one inbound control line.
    pub async fn handle_line(
        &mut self,
        raw: &str,
        control: &ControlChannel,
        config: &FtpConfiguration,
    ) -> io::Result<()> {
        debug!("Received command: {}", raw.trim_end());

        let command = match Command::decode(raw) {
            Some(command) => command,
            None => {
                warn!("Could not decode command: {:?}", raw.trim_end());
                return control.reply(ReplyCode::CommandOk, "").await;
            }
        };

        if command.verb == FtpCommand::QUIT {
            return handle_quit_command(control, self).await;
        }

        match self.state {
            FtpState::AwaitAny => process_command(&command, control, config, self).await,
            FtpState::AwaitSpecific if self.expected_next == Some(command.verb) => {
                process_command(&command, control, config, self).await
            }
            FtpState::AwaitSpecific => {
                let expected = self.expected_next.map(|verb| verb.as_str()).unwrap_or("");
                control
                    .reply(
                        ReplyCode::BadSequence,
                        format!("Expected {} command", expected),
                    )
                    .await
            }
            FtpState::Closed => {
                self.close_passive();
                Ok(())
            }
        }
    }
}
