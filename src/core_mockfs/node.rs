use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Default permission mode of every node, read digit by digit as owner/group/other.
pub const DEFAULT_MODE: u32 = 777;

/// Handle of a node inside the [`MockFs`](super::MockFs) arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

/// Where the bytes of a file node come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileSource {
    /// In-memory buffer.
    Contents(Vec<u8>),
    /// Path of a real file, read lazily on download.
    Target(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Directory { children: Vec<NodeId> },
    File { source: Option<FileSource> },
}

/// A file or directory of the mock tree.
#[derive(Clone, Debug)]
pub struct FsNode {
    pub mode: u32,
    pub user: String,
    pub created_at: DateTime<Local>,
    pub modified_at: DateTime<Local>,
    pub name: String,
    pub kind: NodeKind,
    /// Non-owning back reference, `None` only for the root.
    pub parent: Option<NodeId>,
}

impl FsNode {
    pub fn directory(name: &str, user: &str, mode: u32, stamp: DateTime<Local>) -> Self {
        Self {
            mode,
            user: user.to_string(),
            created_at: stamp,
            modified_at: stamp,
            name: name.to_string(),
            kind: NodeKind::Directory {
                children: Vec::new(),
            },
            parent: None,
        }
    }

    pub fn file(
        name: &str,
        user: &str,
        mode: u32,
        stamp: DateTime<Local>,
        source: Option<FileSource>,
    ) -> Self {
        Self {
            mode,
            user: user.to_string(),
            created_at: stamp,
            modified_at: stamp,
            name: name.to_string(),
            kind: NodeKind::File { source },
            parent: None,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    pub fn source(&self) -> Option<&FileSource> {
        match &self.kind {
            NodeKind::File { source } => source.as_ref(),
            NodeKind::Directory { .. } => None,
        }
    }

    pub fn contents(&self) -> Option<&[u8]> {
        match self.source() {
            Some(FileSource::Contents(bytes)) => Some(bytes),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<&PathBuf> {
        match self.source() {
            Some(FileSource::Target(path)) => Some(path),
            _ => None,
        }
    }
}
