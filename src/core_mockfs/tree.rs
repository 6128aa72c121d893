use crate::core_mockfs::error::{FsError, FsResult};
use crate::core_mockfs::node::{FileSource, FsNode, NodeId, NodeKind, DEFAULT_MODE};
use chrono::{DateTime, Local};
use log::{debug, info};
use std::borrow::Cow;
use std::collections::HashMap;

/// What `copy` changed, kept so `move_node` can undo it.
#[derive(Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    /// A fresh copy was appended as a new child.
    Appended(NodeId),
    /// An existing file took over the source bytes; `previous` is what it held before.
    Overwritten {
        node: NodeId,
        previous: Option<FileSource>,
    },
}

/// The in-memory tree shared by every session of the server.
///
/// Nodes live in an arena keyed by [`NodeId`]; a directory owns the ordered
/// ids of its children and every node keeps a plain id back to its parent.
#[derive(Debug)]
pub struct MockFs {
    nodes: HashMap<NodeId, FsNode>,
    root: NodeId,
    next_id: u64,
}

impl MockFs {
    /// Creates a tree holding only an empty root directory.
    pub fn new(user: &str, stamp: DateTime<Local>) -> Self {
        let mut fs = Self {
            nodes: HashMap::new(),
            root: NodeId(0),
            next_id: 0,
        };
        fs.root = fs.insert(FsNode::directory("", user, DEFAULT_MODE, stamp), None);
        fs
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&FsNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocates `node` and links it at the end of `parent`'s children.
    pub(crate) fn insert(&mut self, mut node: FsNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        node.parent = parent;
        self.nodes.insert(id, node);

        if let Some(parent) = parent {
            if let Some(NodeKind::Directory { children }) =
                self.nodes.get_mut(&parent).map(|p| &mut p.kind)
            {
                children.push(id);
            }
        }

        id
    }

    /// Walks the parent chain up to the root.
    pub fn go_to_root(&self, from: NodeId) -> NodeId {
        let mut current = from;
        while let Some(parent) = self.nodes.get(&current).and_then(|n| n.parent) {
            current = parent;
        }
        current
    }

    /// Resolves `path` against `from`.
    ///
    /// Every segment has to restate the name of the node it lands on, which
    /// is why the root (named `""`) is only reachable through a leading `/`
    /// or `./`. Bare relative paths are prefixed with `./` first.
    pub fn get(&self, from: NodeId, path: &str) -> Option<NodeId> {
        self.walk(from, &relative_to_base(path))
    }

    fn walk(&self, from: NodeId, path: &str) -> Option<NodeId> {
        let path = if path.is_empty() { "/" } else { path };
        let segments = split_path(path);

        let mut current = from;
        if segments.first() == Some(&"") {
            current = self.go_to_root(current);
        }

        let node = self.nodes.get(&current)?;
        let first = *segments.first()?;

        match first {
            "." => self.redescend_same(current, node, &segments[1..]),
            ".." => self.redescend_parent(node, &segments[1..]),
            name if name == node.name => {
                if segments.len() == 1 {
                    return Some(current);
                }

                match segments[1] {
                    "." => self.redescend_same(current, node, &segments[2..]),
                    ".." => self.redescend_parent(node, &segments[2..]),
                    _ => {
                        let rest = segments[1..].join("/");
                        node.children()
                            .iter()
                            .find_map(|child| self.walk(*child, &rest))
                    }
                }
            }
            _ => None,
        }
    }

    fn redescend_same(&self, id: NodeId, node: &FsNode, rest: &[&str]) -> Option<NodeId> {
        if !node.is_directory() {
            return None;
        }
        self.walk(id, &restate(&node.name, rest))
    }

    fn redescend_parent(&self, node: &FsNode, rest: &[&str]) -> Option<NodeId> {
        let parent_id = node.parent?;
        let parent = self.nodes.get(&parent_id)?;
        self.walk(parent_id, &restate(&parent.name, rest))
    }

    pub fn path_exists(&self, from: NodeId, path: &str) -> bool {
        self.get(from, path).is_some()
    }

    /// Like [`get`](Self::get) but only succeeds on directories.
    pub fn change_directory(&self, from: NodeId, path: &str) -> Option<NodeId> {
        self.get(from, path)
            .filter(|id| self.nodes.get(id).is_some_and(FsNode::is_directory))
    }

    /// Copies `src` to `dest`, both resolved against `base`.
    ///
    /// An existing directory at `dest` receives the copy as a new child, an
    /// existing file at `dest` takes over the source bytes, otherwise the copy
    /// is created under `dest`'s parent with `dest`'s last segment as name.
    pub fn copy(&mut self, src: &str, dest: &str, base: NodeId) -> FsResult<CopyOutcome> {
        let source_id = self
            .get(base, src)
            .ok_or_else(|| FsError::NotFound(src.to_string()))?;
        let source_is_dir = self.is_directory(source_id);

        if let Some(dest_id) = self.get(base, dest) {
            let dest_is_dir = self.is_directory(dest_id);

            if source_is_dir && !dest_is_dir {
                return Err(FsError::IsADirectory(src.to_string()));
            }

            if dest_is_dir {
                let copy = self.clone_subtree(source_id, dest_id);
                self.link_child(dest_id, copy);
                debug!("Copied {} into directory {}", src, dest);
                return Ok(CopyOutcome::Appended(copy));
            }

            let incoming = self.nodes.get(&source_id).and_then(|n| n.source().cloned());
            let previous = match (incoming, self.nodes.get_mut(&dest_id).map(|n| &mut n.kind)) {
                (Some(incoming), Some(NodeKind::File { source })) => source.replace(incoming),
                (None, Some(NodeKind::File { source })) => source.clone(),
                _ => None,
            };
            debug!("Copied {} over file {}", src, dest);
            return Ok(CopyOutcome::Overwritten {
                node: dest_id,
                previous,
            });
        }

        let base_has_parent = self.nodes.get(&base).is_some_and(|n| n.parent.is_some());
        if (dest == ".." || dest == "../") && !base_has_parent {
            return Err(FsError::NotFound(dest.to_string()));
        }

        let normalized = relative_to_base(dest);
        let segments = split_path(&normalized);
        let (name, parent_segments) = segments
            .split_last()
            .ok_or_else(|| FsError::NotFound(dest.to_string()))?;
        let parent_path = parent_segments.join("/");
        let parent_id = self
            .get(base, &parent_path)
            .ok_or_else(|| FsError::NotFound(parent_path.clone()))?;

        if !self.is_directory(parent_id) {
            return Err(FsError::NotADirectory(parent_path));
        }

        let copy = self.clone_subtree(source_id, parent_id);
        if let Some(node) = self.nodes.get_mut(&copy) {
            node.name = name.to_string();
        }
        self.link_child(parent_id, copy);
        debug!("Copied {} to new entry {}", src, dest);

        Ok(CopyOutcome::Appended(copy))
    }

    /// Unlinks the node at `path` from its parent and frees its subtree.
    pub fn remove(&mut self, base: NodeId, path: &str) -> FsResult<()> {
        let id = self
            .get(base, path)
            .ok_or_else(|| FsError::NotFound(path.to_string()))?;
        let node = self
            .nodes
            .get(&id)
            .ok_or_else(|| FsError::NotFound(path.to_string()))?;
        let parent_id = node.parent.ok_or(FsError::RootRemoval)?;
        let name = node.name.clone();

        // Siblings are matched by name, first one wins.
        let index = self
            .nodes
            .get(&parent_id)
            .and_then(|parent| {
                parent
                    .children()
                    .iter()
                    .position(|child| self.nodes.get(child).is_some_and(|c| c.name == name))
            })
            .ok_or_else(|| FsError::NotFound(path.to_string()))?;

        let removed = match self.nodes.get_mut(&parent_id).map(|p| &mut p.kind) {
            Some(NodeKind::Directory { children }) => children.remove(index),
            _ => return Err(FsError::NotADirectory(path.to_string())),
        };
        self.free_subtree(removed);
        info!("Removed {}", path);

        Ok(())
    }

    /// `copy` followed by `remove(src)`. A failed removal undoes the copy so
    /// the tree never holds both the original and the duplicate.
    pub fn move_node(&mut self, src: &str, dest: &str, base: NodeId) -> FsResult<()> {
        let outcome = self.copy(src, dest, base)?;

        if let Err(e) = self.remove(base, src) {
            debug!("Rolling back move of {} to {}: {}", src, dest, e);
            match outcome {
                CopyOutcome::Appended(copy) => self.detach(copy),
                CopyOutcome::Overwritten { node, previous } => {
                    if let Some(NodeKind::File { source }) =
                        self.nodes.get_mut(&node).map(|n| &mut n.kind)
                    {
                        *source = previous;
                    }
                }
            }
            return Err(e);
        }

        Ok(())
    }

    /// Creates an empty directory at `path`.
    pub fn mkdir(
        &mut self,
        base: NodeId,
        path: &str,
        stamp: DateTime<Local>,
        user: &str,
        mode: u32,
    ) -> FsResult<NodeId> {
        let (parent_id, name) = self.creation_parent(base, path)?;
        let id = self.insert(FsNode::directory(name, user, mode, stamp), Some(parent_id));
        info!("Created directory {}", path);
        Ok(id)
    }

    /// Creates a file without contents at `path`.
    pub fn touch(
        &mut self,
        base: NodeId,
        path: &str,
        stamp: DateTime<Local>,
        user: &str,
        mode: u32,
    ) -> FsResult<NodeId> {
        let (parent_id, name) = self.creation_parent(base, path)?;
        let id = self.insert(FsNode::file(name, user, mode, stamp, None), Some(parent_id));
        info!("Created file {}", path);
        Ok(id)
    }

    /// Returns the file at `path`, creating it when only its parent exists.
    pub fn ensure_file(
        &mut self,
        base: NodeId,
        path: &str,
        stamp: DateTime<Local>,
        user: &str,
    ) -> FsResult<NodeId> {
        match self.get(base, path) {
            Some(id) if self.is_directory(id) => Err(FsError::IsADirectory(path.to_string())),
            Some(id) => Ok(id),
            None => self.touch(base, path, stamp, user, DEFAULT_MODE),
        }
    }

    /// Swaps a file's source for an in-memory copy of `bytes`.
    ///
    /// Uploads into a file backed by a real path go through this first, so the
    /// real file is only ever read.
    pub fn load_contents(&mut self, id: NodeId, bytes: Vec<u8>) -> FsResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| FsError::NotFound(format!("node {}", id.0)))?;

        match &mut node.kind {
            NodeKind::File { source } => {
                *source = Some(FileSource::Contents(bytes));
                Ok(())
            }
            NodeKind::Directory { .. } => Err(FsError::IsADirectory(node.name.clone())),
        }
    }

    /// Appends an uploaded chunk to a file and bumps its modification time.
    ///
    /// A file still backed by a real path has to be loaded with
    /// [`MockFs::load_contents`] first.
    pub fn append_contents(
        &mut self,
        id: NodeId,
        chunk: &[u8],
        stamp: DateTime<Local>,
    ) -> FsResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| FsError::NotFound(format!("node {}", id.0)))?;
        let name = node.name.clone();
        node.modified_at = stamp;

        let NodeKind::File { source } = &mut node.kind else {
            return Err(FsError::IsADirectory(name));
        };

        match source {
            Some(FileSource::Contents(buffer)) => buffer.extend_from_slice(chunk),
            Some(FileSource::Target(target)) => {
                return Err(FsError::NotLoaded(target.display().to_string()));
            }
            None => *source = Some(FileSource::Contents(chunk.to_vec())),
        }

        Ok(())
    }

    /// Renders the absolute path of a node, `/` for the root.
    pub fn absolute_path(&self, id: NodeId) -> String {
        let Some(mut current) = self.nodes.get(&id) else {
            return String::from("/");
        };
        let mut path = current.name.clone();

        while let Some(parent) = current.parent.and_then(|p| self.nodes.get(&p)) {
            path = format!("{}/{}", parent.name, path);
            current = parent;
        }

        if path.is_empty() {
            String::from("/")
        } else {
            path
        }
    }

    fn is_directory(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(FsNode::is_directory)
    }

    fn creation_parent<'a>(&self, base: NodeId, path: &'a str) -> FsResult<(NodeId, &'a str)> {
        let (parent_path, name) = split_parent(path);
        let parent_id = self
            .get(base, parent_path)
            .ok_or_else(|| FsError::NotFound(parent_path.to_string()))?;

        if !self.is_directory(parent_id) {
            return Err(FsError::NotADirectory(parent_path.to_string()));
        }

        Ok((parent_id, name))
    }

    fn link_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(NodeKind::Directory { children }) =
            self.nodes.get_mut(&parent).map(|p| &mut p.kind)
        {
            children.push(child);
        }
    }

    /// Duplicates `id` and everything below it, parenting the copy under `parent`
    /// without linking it there yet.
    fn clone_subtree(&mut self, id: NodeId, parent: NodeId) -> NodeId {
        let Some(original) = self.nodes.get(&id).cloned() else {
            return id;
        };
        let children = original.children().to_vec();

        let mut copy = original;
        if let NodeKind::Directory { children } = &mut copy.kind {
            children.clear();
        }

        let copy_id = NodeId(self.next_id);
        self.next_id += 1;
        copy.parent = Some(parent);
        self.nodes.insert(copy_id, copy);

        for child in children {
            let child_copy = self.clone_subtree(child, copy_id);
            self.link_child(copy_id, child_copy);
        }

        copy_id
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes.get(&id).and_then(|n| n.parent) {
            if let Some(NodeKind::Directory { children }) =
                self.nodes.get_mut(&parent).map(|p| &mut p.kind)
            {
                children.retain(|child| *child != id);
            }
        }
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children() {
                self.free_subtree(*child);
            }
        }
    }
}

/// Splits on `/` and drops a single trailing empty segment.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.last() == Some(&"") {
        segments.pop();
    }
    segments
}

/// Splits off the last segment. A bare name lives in the base directory.
pub fn split_parent(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(index) => (&path[..index], &path[index + 1..]),
        None => (".", path),
    }
}

fn relative_to_base(path: &str) -> Cow<'_, str> {
    if path.is_empty() || path.starts_with('.') || path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("./{}", path))
    }
}

fn restate(name: &str, rest: &[&str]) -> String {
    let mut segments = Vec::with_capacity(rest.len() + 1);
    segments.push(name);
    segments.extend_from_slice(rest);
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_mockfs::description::create;

    fn sample(now: DateTime<Local>) -> MockFs {
        let description: toml::Table = r#"
            [folder1.folder3.foo]
            ___contents = "bar"

            [folder2.foo]
            ___contents = "bar"

            [folder2.bar]
            ___contents = "baz"
        "#
        .parse()
        .unwrap();
        create(&description, "root", now).unwrap()
    }

    fn names(fs: &MockFs, id: NodeId) -> Vec<String> {
        fs.node(id)
            .unwrap()
            .children()
            .iter()
            .map(|c| fs.node(*c).unwrap().name.clone())
            .collect()
    }

    fn path_of(fs: &MockFs, path: &str) -> Option<String> {
        fs.get(fs.root(), path).map(|id| fs.absolute_path(id))
    }

    #[test]
    fn test_get_absolute_and_relative_paths() {
        let fs = sample(Local::now());

        assert_eq!(path_of(&fs, "/folder1").as_deref(), Some("/folder1"));
        assert_eq!(path_of(&fs, "/folder1/folder3").as_deref(), Some("/folder1/folder3"));
        assert_eq!(path_of(&fs, "/folder1/folder3/foo").as_deref(), Some("/folder1/folder3/foo"));
        assert_eq!(path_of(&fs, "./folder1").as_deref(), Some("/folder1"));
        assert_eq!(path_of(&fs, "/folder2/../folder2").as_deref(), Some("/folder2"));
        assert_eq!(path_of(&fs, "/folder1/./folder3").as_deref(), Some("/folder1/folder3"));
        assert_eq!(
            path_of(&fs, "./folder1/./folder3/../folder3/foo").as_deref(),
            Some("/folder1/folder3/foo")
        );
        assert_eq!(path_of(&fs, "/folder2/./bar").as_deref(), Some("/folder2/bar"));
        assert_eq!(path_of(&fs, "folder2/bar").as_deref(), Some("/folder2/bar"));
        assert_eq!(fs.get(fs.root(), "/"), Some(fs.root()));
        assert_eq!(fs.get(fs.root(), "./"), Some(fs.root()));
        assert_eq!(fs.get(fs.root(), ""), Some(fs.root()));
    }

    #[test]
    fn test_get_missing_paths() {
        let fs = sample(Local::now());

        for path in [
            "/folder2/boo",
            "/folder2/folder3/",
            "./folder2/boo",
            "/folder1/../folder3/",
            "../",
            "/folder2/foo/bar",
        ] {
            assert_eq!(fs.get(fs.root(), path), None, "{} should not resolve", path);
        }
    }

    #[test]
    fn test_get_relative_to_subdirectory() {
        let fs = sample(Local::now());
        let folder1 = fs.get(fs.root(), "/folder1").unwrap();

        assert_eq!(fs.absolute_path(fs.get(folder1, "folder3").unwrap()), "/folder1/folder3");
        assert_eq!(fs.absolute_path(fs.get(folder1, "..").unwrap()), "/");
        assert_eq!(fs.absolute_path(fs.get(folder1, "../folder2/bar").unwrap()), "/folder2/bar");
        assert_eq!(fs.get(folder1, "/folder2"), fs.get(fs.root(), "/folder2"));
    }

    #[test]
    fn test_absolute_path_resolves_back_to_the_same_node() {
        let fs = sample(Local::now());
        for path in ["/", "/folder1", "/folder1/folder3/foo", "./folder2/../folder2/bar"] {
            let id = fs.get(fs.root(), path).unwrap();
            let absolute = fs.absolute_path(id);
            assert_eq!(fs.get(fs.root(), &absolute), Some(id));
        }
    }

    #[test]
    fn test_change_directory_rejects_files() {
        let fs = sample(Local::now());

        let dir = fs.change_directory(fs.root(), "./folder1/../folder2").unwrap();
        assert_eq!(fs.node(dir).unwrap().name, "folder2");
        assert_eq!(fs.node(dir).unwrap().children().len(), 2);
        assert_eq!(fs.change_directory(fs.root(), "/folder1/folder3/foo"), None);
        assert_eq!(fs.change_directory(fs.root(), "/folder2/./foo"), None);
        assert_eq!(fs.change_directory(fs.root(), "/folder1/./folder4"), None);
        assert!(fs.path_exists(fs.root(), "/folder2/./foo"));
    }

    #[test]
    fn test_copy_into_directory_and_over_file() {
        let mut fs = sample(Local::now());
        let root = fs.root();

        let outcome = fs.copy("/folder1/folder3/foo", "/folder2/", root).unwrap();
        assert!(matches!(outcome, CopyOutcome::Appended(_)));
        let folder2 = fs.get(root, "/folder2").unwrap();
        assert_eq!(names(&fs, folder2), vec!["foo", "bar", "foo"]);

        fs.copy("./folder2/bar", "./folder1/../folder1/folder3/foo", root).unwrap();
        let foo = fs.get(root, "/folder1/folder3/foo").unwrap();
        assert_eq!(fs.node(foo).unwrap().contents(), Some(&b"baz"[..]));
        // the source keeps its bytes
        let bar = fs.get(root, "/folder2/bar").unwrap();
        assert_eq!(fs.node(bar).unwrap().contents(), Some(&b"baz"[..]));
    }

    #[test]
    fn test_copy_failures_leave_tree_untouched() {
        let mut fs = sample(Local::now());
        let root = fs.root();
        let before = fs.len();

        assert_eq!(
            fs.copy("/folder1", "/folder2/bar", root),
            Err(FsError::IsADirectory("/folder1".to_string()))
        );
        assert!(fs.copy("/folder2/bar", "/folder42/bazou", root).is_err());
        assert!(fs.copy("/folder42", "/folder2", root).is_err());
        assert!(fs.copy("/folder1", "../", root).is_err());
        assert_eq!(fs.len(), before);
    }

    #[test]
    fn test_copy_directory_is_deep_and_independent() {
        let mut fs = sample(Local::now());
        let root = fs.root();

        fs.copy("/folder1", "/folder2/folder1", root).unwrap();
        fs.remove(root, "/folder2/folder1/folder3/foo").unwrap();

        assert!(fs.path_exists(root, "/folder1/folder3/foo"));
        assert!(!fs.path_exists(root, "/folder2/folder1/folder3/foo"));
        let copy = fs.get(root, "/folder2/folder1/folder3").unwrap();
        assert_eq!(fs.absolute_path(copy), "/folder2/folder1/folder3");
    }

    #[test]
    fn test_copy_directory_into_itself() {
        let mut fs = sample(Local::now());
        let root = fs.root();

        fs.copy("/folder1", "/folder1", root).unwrap();
        let folder1 = fs.get(root, "/folder1").unwrap();
        assert_eq!(names(&fs, folder1), vec!["folder3", "folder1"]);
        assert!(fs.path_exists(root, "/folder1/folder1/folder3/foo"));
    }

    #[test]
    fn test_remove() {
        let mut fs = sample(Local::now());
        let root = fs.root();

        fs.remove(root, "./folder2/../folder2/bar").unwrap();
        let folder2 = fs.get(root, "/folder2").unwrap();
        assert_eq!(names(&fs, folder2), vec!["foo"]);

        fs.remove(root, "/folder1").unwrap();
        assert_eq!(names(&fs, root), vec!["folder2"]);
        assert_eq!(fs.remove(root, "/"), Err(FsError::RootRemoval));
        assert!(matches!(fs.remove(root, "./folder1/folder42"), Err(FsError::NotFound(_))));
        // root + folder2 + foo
        assert_eq!(fs.len(), 3);
    }

    #[test]
    fn test_move_file_into_folder_and_file() {
        let mut fs = sample(Local::now());
        let root = fs.root();

        fs.move_node("/folder2/bar", "/folder1", root).unwrap();
        let folder1 = fs.get(root, "/folder1").unwrap();
        assert_eq!(names(&fs, folder1), vec!["folder3", "bar"]);
        assert!(!fs.path_exists(root, "/folder2/bar"));

        fs.move_node("./folder1/./bar", "./folder2/../folder2/foo", root).unwrap();
        let foo = fs.get(root, "/folder2/foo").unwrap();
        assert_eq!(fs.node(foo).unwrap().contents(), Some(&b"baz"[..]));
        assert_eq!(names(&fs, folder1), vec!["folder3"]);
    }

    #[test]
    fn test_move_renames_under_new_parent() {
        let mut fs = sample(Local::now());
        let root = fs.root();

        fs.move_node("/folder1/folder3/foo", "/folder1/folder3/newFoo", root).unwrap();
        let folder3 = fs.get(root, "/folder1/folder3").unwrap();
        assert_eq!(names(&fs, folder3), vec!["newFoo"]);
    }

    #[test]
    fn test_move_failures_leave_tree_untouched() {
        let mut fs = sample(Local::now());
        let root = fs.root();
        let before = names(&fs, root);

        assert!(fs.move_node("/folder1/folder3/foo", "/folder42/fubar", root).is_err());
        assert!(fs.move_node("./folder2", "../", root).is_err());
        assert!(fs.move_node("./folder42", "/folder1", root).is_err());
        assert!(fs.move_node("/folder1", "./folder2/bar", root).is_err());
        assert_eq!(names(&fs, root), before);
        assert_eq!(fs.len(), 7);
    }

    #[test]
    fn test_move_root_is_rolled_back() {
        let mut fs = sample(Local::now());
        let root = fs.root();

        assert_eq!(fs.move_node("/", "/folder2", root), Err(FsError::RootRemoval));
        let folder2 = fs.get(root, "/folder2").unwrap();
        assert_eq!(names(&fs, folder2), vec!["foo", "bar"]);
        assert_eq!(fs.len(), 7);
    }

    #[test]
    fn test_mkdir_and_touch() {
        let now = Local::now();
        let mut fs = sample(now);
        let root = fs.root();

        let dir = fs.mkdir(root, "./folder1/../folder1/folder4", now, "test", 755).unwrap();
        assert_eq!(fs.absolute_path(dir), "/folder1/folder4");
        assert_eq!(fs.node(dir).unwrap().mode, 755);
        assert_eq!(fs.node(dir).unwrap().user, "test");

        let file = fs.touch(root, "/folder1/folder4/empty", now, "test", 644).unwrap();
        assert!(!fs.node(file).unwrap().is_directory());
        assert_eq!(fs.node(file).unwrap().source(), None);

        assert!(matches!(
            fs.mkdir(root, "/folder2/foo/folder5", now, "test", 777),
            Err(FsError::NotADirectory(_))
        ));
        assert!(fs.mkdir(root, "../", now, "test", 777).is_err());
        assert!(fs.touch(root, "/nowhere/file", now, "test", 777).is_err());
    }

    #[test]
    fn test_bare_names_are_created_in_base_directory() {
        let now = Local::now();
        let mut fs = sample(now);
        let folder1 = fs.get(fs.root(), "/folder1").unwrap();

        let dir = fs.mkdir(folder1, "fresh", now, "test", 777).unwrap();
        assert_eq!(fs.absolute_path(dir), "/folder1/fresh");

        fs.move_node("fresh", "renamed", folder1).unwrap();
        assert!(fs.path_exists(fs.root(), "/folder1/renamed"));
        assert!(!fs.path_exists(fs.root(), "/renamed"));

        let root_dir = fs.mkdir(folder1, "/top", now, "test", 777).unwrap();
        assert_eq!(fs.absolute_path(root_dir), "/top");
    }

    #[test]
    fn test_split_parent() {
        assert_eq!(split_parent("/folder1/foo"), ("/folder1", "foo"));
        assert_eq!(split_parent("/foo"), ("", "foo"));
        assert_eq!(split_parent("foo"), (".", "foo"));
        assert_eq!(split_parent("../"), ("..", ""));
    }

    #[test]
    fn test_append_contents() {
        let now = Local::now();
        let mut fs = sample(now);
        let root = fs.root();

        let file = fs.ensure_file(root, "/folder2/new.txt", now, "test").unwrap();
        fs.append_contents(file, b"hello ", now).unwrap();
        fs.append_contents(file, b"world", now).unwrap();
        assert_eq!(fs.node(file).unwrap().contents(), Some(&b"hello world"[..]));

        assert_eq!(fs.ensure_file(root, "/folder2/new.txt", now, "test"), Ok(file));
        assert!(fs.ensure_file(root, "/folder2", now, "test").is_err());
        assert!(fs.ensure_file(root, "/folder42/ababa.txt", now, "test").is_err());
    }

    #[test]
    fn test_append_needs_loaded_target() {
        let now = Local::now();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"on disk;").unwrap();

        let mut fs = MockFs::new("root", now);
        let root = fs.root();
        let id = fs.touch(root, "/real", now, "root", 777).unwrap();
        if let Some(NodeKind::File { source }) = fs.nodes.get_mut(&id).map(|n| &mut n.kind) {
            *source = Some(FileSource::Target(file.path().to_path_buf()));
        }

        assert!(matches!(
            fs.append_contents(id, b"appended", now),
            Err(FsError::NotLoaded(_))
        ));
        assert_eq!(fs.node(id).unwrap().target(), Some(&file.path().to_path_buf()));

        fs.load_contents(id, std::fs::read(file.path()).unwrap()).unwrap();
        fs.append_contents(id, b"appended", now).unwrap();
        assert_eq!(fs.node(id).unwrap().contents(), Some(&b"on disk;appended"[..]));
        assert_eq!(fs.node(id).unwrap().target(), None);
    }

    #[test]
    fn test_absolute_path() {
        let fs = sample(Local::now());
        let foo = fs.get(fs.root(), "/folder1/folder3/foo").unwrap();

        assert_eq!(fs.absolute_path(foo), "/folder1/folder3/foo");
        assert_eq!(fs.absolute_path(fs.root()), "/");
    }
}
