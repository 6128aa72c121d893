use crate::constants::{CONTENTS_KEY, MODE_KEY, TARGET_KEY};
use crate::core_mockfs::error::{FsError, FsResult};
use crate::core_mockfs::node::{FileSource, FsNode, NodeId, DEFAULT_MODE};
use crate::core_mockfs::tree::MockFs;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use toml::{Table, Value};

/// Builds a tree from a nested description.
///
/// Every key of `description` becomes a child of the root. A table holding
/// `___contents` (string or byte array) or `___target` (real file path) is a
/// file, any other table is a directory whose keys are its children.
/// `___mode` overrides the default 777 of a node.
pub fn create(description: &Table, user: &str, stamp: DateTime<Local>) -> FsResult<MockFs> {
    let mut fs = MockFs::new(user, stamp);
    let root = fs.root();

    for (key, value) in description {
        build_entry(&mut fs, key, value, root, user, stamp)?;
    }

    Ok(fs)
}

fn build_entry(
    fs: &mut MockFs,
    key: &str,
    value: &Value,
    parent: NodeId,
    user: &str,
    stamp: DateTime<Local>,
) -> FsResult<NodeId> {
    let table = value.as_table().ok_or_else(|| invalid(key, "expected a table"))?;
    let mode = match table.get(MODE_KEY) {
        Some(mode) => mode
            .as_integer()
            .and_then(|m| u32::try_from(m).ok())
            .ok_or_else(|| invalid(key, "___mode must be a positive integer"))?,
        None => DEFAULT_MODE,
    };

    if let Some(contents) = table.get(CONTENTS_KEY) {
        let bytes = contents_bytes(key, contents)?;
        let node = FsNode::file(key, user, mode, stamp, Some(FileSource::Contents(bytes)));
        return Ok(fs.insert(node, Some(parent)));
    }

    if let Some(target) = table.get(TARGET_KEY) {
        let target = target
            .as_str()
            .ok_or_else(|| invalid(key, "___target must be a string"))?;
        let node = FsNode::file(
            key,
            user,
            mode,
            stamp,
            Some(FileSource::Target(PathBuf::from(target))),
        );
        return Ok(fs.insert(node, Some(parent)));
    }

    let directory = fs.insert(FsNode::directory(key, user, mode, stamp), Some(parent));
    for (child_key, child_value) in table {
        if child_key == MODE_KEY {
            continue;
        }
        build_entry(fs, child_key, child_value, directory, user, stamp)?;
    }

    Ok(directory)
}

fn contents_bytes(key: &str, contents: &Value) -> FsResult<Vec<u8>> {
    match contents {
        Value::String(text) => Ok(text.as_bytes().to_vec()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_integer()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| invalid(key, "___contents bytes must be within 0..=255"))
            })
            .collect(),
        _ => Err(invalid(key, "___contents must be a string or a byte array")),
    }
}

fn invalid(key: &str, reason: &str) -> FsError {
    FsError::InvalidDescription {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
