use crate::core_mockfs::node::{FileSource, FsNode, NodeId};
use crate::core_mockfs::tree::MockFs;

/// Turns a decimal mode such as 755 into `rwxr-xr-x`.
///
/// Only the first three digits are read; missing ones render as `---`.
pub fn mode_to_string(mode: u32) -> String {
    let digits: Vec<u32> = mode.to_string().chars().filter_map(|c| c.to_digit(10)).collect();

    (0..3)
        .map(|i| {
            let digit = digits.get(i).copied().unwrap_or(0);
            format!(
                "{}{}{}",
                if digit & 0x04 != 0 { 'r' } else { '-' },
                if digit & 0x02 != 0 { 'w' } else { '-' },
                if digit & 0x01 != 0 { 'x' } else { '-' },
            )
        })
        .collect()
}

fn node_size(node: &FsNode) -> u64 {
    if node.is_directory() {
        return node.children().len() as u64 + 6;
    }

    match node.source() {
        Some(FileSource::Contents(bytes)) => bytes.len() as u64,
        Some(FileSource::Target(path)) => std::fs::metadata(path).map(|m| m.len()).unwrap_or(0),
        None => 0,
    }
}

impl MockFs {
    /// One `ls -l` style line for the node.
    pub fn line_state(&self, id: NodeId) -> Option<String> {
        let node = self.node(id)?;
        let kind = if node.is_directory() { 'd' } else { '-' };

        Some(format!(
            "{}{} 1 1000 1000 {}  {}  {}",
            kind,
            mode_to_string(node.mode),
            node_size(node),
            node.modified_at.format("%b %d %H:%M"),
            node.name
        ))
    }
}
