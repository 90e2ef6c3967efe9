//! Data model for a scanned source tree — format-agnostic.

use std::cmp::Ordering;

/// One directory of the source tree.
///
/// Children are stored in render order: case-insensitive by name, ties broken
/// by the exact name. Empty subdirectories are pruned during the scan, so every
/// entry of `dirs` has content somewhere below it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DirNode {
    /// Base name of the directory
    pub name: String,
    /// Matching source files directly inside this directory
    pub files: Vec<String>,
    /// Non-empty subdirectories
    pub dirs: Vec<DirNode>,
}

impl DirNode {
    /// True when neither this directory nor any descendant holds a source file.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.iter().all(DirNode::is_empty)
    }

    /// Total number of directories that will produce a directive block.
    pub fn module_count(&self) -> usize {
        let own = usize::from(!self.files.is_empty());
        own + self.dirs.iter().map(DirNode::module_count).sum::<usize>()
    }
}

/// Ordering shared by files and directories: case-insensitive, then exact.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| compare_names(a, b));
}
