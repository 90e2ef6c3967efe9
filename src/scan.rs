//! Source tree discovery.
//!
//! Walks a directory depth-first and builds a [`DirNode`] tree. Immediate
//! children are partitioned into source files (names ending in `.<ext>`) and
//! subdirectories; everything else is ignored. Subdirectories are always
//! visited and dropped afterwards if nothing below them matched.

use crate::model::{compare_names, sort_names, DirNode};
use anyhow::{bail, Context, Result};
use glob::Pattern;
use log::{debug, warn};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Scan configuration for [`scan`].
#[derive(Debug)]
pub struct ScanOptions {
    /// Source file suffix including the dot, e.g. `.m`
    suffix: String,
    /// Entries whose base name matches any of these are skipped entirely
    excludes: Vec<Pattern>,
}

impl ScanOptions {
    pub fn new(extension: &str, excludes: Vec<Pattern>) -> Self {
        Self {
            suffix: format!(".{}", extension.trim_start_matches('.')),
            excludes,
        }
    }

    /// Parse `--exclude` arguments into glob patterns.
    pub fn parse_excludes(patterns: &[String]) -> Result<Vec<Pattern>> {
        patterns
            .iter()
            .map(|p| {
                Pattern::new(p).with_context(|| format!("invalid exclude pattern: {}", p))
            })
            .collect()
    }

    fn is_source(&self, name: &str) -> bool {
        name.ends_with(&self.suffix)
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excludes.iter().any(|p| p.matches(name))
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new("m", Vec::new())
    }
}

/// Scan `root` into a tree. The root node is kept even when empty.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<DirNode> {
    if !root.exists() {
        bail!("source directory not found: {}", root.display());
    }
    if !root.is_dir() {
        bail!("source path is not a directory: {}", root.display());
    }
    let name = match root.file_name() {
        Some(n) => lossy_name(n),
        None => root.display().to_string(),
    };
    let mut walker = Walker {
        options,
        ancestors: Vec::new(),
    };
    walker.scan_dir(root, name, 0)
}

/// Depth-first walk state.
struct Walker<'a> {
    options: &'a ScanOptions,
    /// Resolved paths of the directories currently being scanned
    ancestors: Vec<PathBuf>,
}

impl Walker<'_> {
    fn scan_dir(&mut self, path: &Path, name: String, depth: usize) -> Result<DirNode> {
        debug!("Scanning {} (depth {})", path.display(), depth);

        // Symlinked directories are followed; one pointing at an ancestor is a cycle
        let resolved = fs::canonicalize(path)
            .with_context(|| format!("failed to resolve directory: {}", path.display()))?;
        if let Some(ancestor) = self.ancestors.iter().find(|a| **a == resolved) {
            bail!(
                "directory cycle: {} leads back to {}",
                path.display(),
                ancestor.display()
            );
        }

        let entries = fs::read_dir(path)
            .with_context(|| format!("failed to read directory: {}", path.display()))?;

        let mut files = Vec::new();
        let mut subdirs: Vec<(String, PathBuf)> = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("failed to read entry in {}", path.display()))?;
            let entry_name = lossy_name(&entry.file_name());
            if self.options.is_excluded(&entry_name) {
                debug!("Excluded: {}", entry.path().display());
                continue;
            }
            let entry_path = entry.path();
            // is_dir follows symlinks
            if entry_path.is_dir() {
                subdirs.push((entry_name, entry_path));
            } else if self.options.is_source(&entry_name) {
                files.push(entry_name);
            }
        }

        sort_names(&mut files);
        subdirs.sort_by(|a, b| compare_names(&a.0, &b.0));

        let mut node = DirNode {
            name,
            files,
            dirs: Vec::with_capacity(subdirs.len()),
        };
        self.ancestors.push(resolved);
        for (sub_name, sub_path) in subdirs {
            let child = self.scan_dir(&sub_path, sub_name, depth + 1)?;
            if !child.is_empty() {
                node.dirs.push(child);
            }
        }
        self.ancestors.pop();
        Ok(node)
    }
}

fn lossy_name(name: &OsStr) -> String {
    match name.to_str() {
        Some(s) => s.to_string(),
        None => {
            let lossy = name.to_string_lossy().to_string();
            warn!("non UTF-8 name rendered as {:?}", lossy);
            lossy
        }
    }
}
