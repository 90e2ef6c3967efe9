//! apidoc-rst — generate a reStructuredText API stub from a MATLAB source tree.
//!
//! Every directory holding `.m` files becomes a section with an
//! `.. automodule::` directive; section nesting follows the directory nesting.
//! The result is meant to be picked up by Sphinx with a MATLAB domain:
//!
//! `apidoc-rst -s ../src -o rst/3_api.rst -x mex`

mod model;
mod output;
mod render;
mod scan;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::{Component, Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "apidoc-rst",
    about = "Generate a reStructuredText API stub from a source directory tree"
)]
struct Cli {
    /// Source root to scan
    #[arg(short = 's', long, default_value = "../src")]
    src: PathBuf,

    /// Output .rst file, or - for stdout
    #[arg(short = 'o', long, default_value = "rst/3_api.rst")]
    output: PathBuf,

    /// Extension of source files treated as modules (without the dot)
    #[arg(short = 'e', long, default_value = "m")]
    ext: String,

    /// Leading module-path segment to strip from directives
    #[arg(long, default_value = "src")]
    sentinel: String,

    /// Top-level document title
    #[arg(short = 't', long, default_value = "API")]
    title: String,

    /// Skip files and directories whose name matches this glob.
    /// Can be specified multiple times. E.g. --exclude mex
    #[arg(short = 'x', long)]
    exclude: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let excludes = scan::ScanOptions::parse_excludes(&cli.exclude)?;
    let scan_options = scan::ScanOptions::new(&cli.ext, excludes);
    let render_options = render::RenderOptions {
        title: cli.title.clone(),
        sentinel: cli.sentinel.clone(),
    };
    let dest = output::Destination::from_arg(&cli.output);

    let src_dir = resolve_src(&cli.src)?;
    match &dest {
        output::Destination::File(path) => info!(
            "Source: {}, output: {}",
            src_dir.display(),
            display_absolute(path)
        ),
        output::Destination::Stdout => info!("Source: {}, output: <stdout>", src_dir.display()),
    }

    let tree = scan::scan(&src_dir, &scan_options)?;
    let document = render::render_document(&tree, &render_options);
    output::emit(&dest, &document)?;

    if let output::Destination::File(path) = &dest {
        info!(
            "Generated RST file: {} ({} modules)",
            display_absolute(path),
            tree.module_count()
        );
    }
    Ok(())
}

/// Absolute form of the source root. Its base name becomes the root title, so
/// symlinks are left as named and only `.`/`..` are folded.
fn resolve_src(src: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(src)
        .with_context(|| format!("failed to resolve {}", src.display()))?;
    Ok(normalize(&absolute))
}

/// Lexically drop `.` and apply `..` to the preceding component.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

fn display_absolute(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
