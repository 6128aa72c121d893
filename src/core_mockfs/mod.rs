// The in-memory filesystem served by the FTP commands
pub mod description;
pub mod error;
pub mod listing;
pub mod node;
pub mod tree;

use std::sync::Arc;
use tokio::sync::Mutex;

pub use description::create;
pub use error::{FsError, FsResult};
pub use node::{FileSource, FsNode, NodeId, NodeKind};
pub use tree::{CopyOutcome, MockFs};

/// One tree for the whole process, shared by every session.
pub type SharedFs = Arc<Mutex<MockFs>>;

pub fn shared(fs: MockFs) -> SharedFs {
    Arc::new(Mutex::new(fs))
}
