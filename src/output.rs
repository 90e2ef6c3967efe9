//! Writing the generated document.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Where the document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination<'a> {
    Stdout,
    File(&'a Path),
}

impl<'a> Destination<'a> {
    /// `-` selects stdout, anything else is a file path.
    pub fn from_arg(arg: &'a Path) -> Self {
        if arg.as_os_str() == "-" {
            Destination::Stdout
        } else {
            Destination::File(arg)
        }
    }
}

pub fn emit(dest: &Destination, content: &str) -> Result<()> {
    match dest {
        Destination::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
        Destination::File(path) => write_atomic(path, content),
    }
}

/// Replace `path` with `content` in one rename.
///
/// The temporary file lives next to the target so the rename never crosses
/// file systems. On error the previous file, if any, is left as it was.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
