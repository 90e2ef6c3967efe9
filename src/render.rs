//! reStructuredText renderer.
//!
//! Section titles mirror the directory hierarchy; every directory that holds
//! source files directly gets one `automodule` directive.

use crate::model::DirNode;

/// Underline characters by nesting level. The last one is reused below level 3.
const TITLE_CHARS: [char; 4] = ['=', '-', '^', '~'];

/// Directive options emitted under every `automodule`.
const AUTOMODULE_FLAGS: [&str; 3] = [":members:", ":undoc-members:", ":show-inheritance:"];

const MIN_UNDERLINE: usize = 3;

/// Render configuration for [`render_document`].
#[derive(Debug)]
pub struct RenderOptions {
    /// Top-level document title
    pub title: String,
    /// Leading module-path segment stripped from directives
    pub sentinel: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            sentinel: "src".to_string(),
        }
    }
}

/// Render the whole document: the top-level title followed by the tree.
pub fn render_document(root: &DirNode, options: &RenderOptions) -> String {
    let mut output = underline_title(&options.title, 0);
    render_dir(root, 0, "", options, &mut output);
    output
}

fn render_dir(
    node: &DirNode,
    level: usize,
    parent: &str,
    options: &RenderOptions,
    out: &mut String,
) {
    if node.is_empty() {
        return;
    }
    out.push_str(&underline_title(&node.name, level));

    let path = if parent.is_empty() {
        node.name.clone()
    } else {
        format!("{}.{}", parent, node.name)
    };

    if !node.files.is_empty() {
        out.push_str(&automodule(strip_sentinel(&path, &options.sentinel)));
    }

    for child in &node.dirs {
        render_dir(child, level + 1, &path, options, out);
    }
}

/// Section title with an underline picked by `level`, at least three wide.
pub fn underline_title(title: &str, level: usize) -> String {
    let ch = TITLE_CHARS[level.min(TITLE_CHARS.len() - 1)];
    let width = title.chars().count().max(MIN_UNDERLINE);
    let underline: String = std::iter::repeat(ch).take(width).collect();
    format!("{}\n{}\n\n", title, underline)
}

/// Remove a leading `<sentinel>.` from a module path.
pub fn strip_sentinel<'a>(path: &'a str, sentinel: &str) -> &'a str {
    if sentinel.is_empty() {
        return path;
    }
    path.strip_prefix(sentinel)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(path)
}

fn automodule(module_path: &str) -> String {
    let mut block = format!(".. automodule:: {}\n", module_path);
    for flag in AUTOMODULE_FLAGS {
        block.push_str("    ");
        block.push_str(flag);
        block.push('\n');
    }
    block.push('\n');
    block
}
