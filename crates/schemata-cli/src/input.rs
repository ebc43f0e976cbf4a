//! Resolution of schema and document arguments.
//!
//! An argument is either inline text or `@path`, naming a file whose
//! contents are used instead. A missing document argument, or a literal
//! `-`, means stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Resolve an inline-or-`@path` argument to its text.
pub fn resolve_text(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => read_file(Path::new(path)),
        None => Ok(arg.to_string()),
    }
}

/// Resolve a document argument, reading `stdin` when it is absent or `-`.
pub fn resolve_document(arg: Option<&str>, stdin: impl Read) -> Result<String> {
    match arg {
        None | Some("-") => read_stdin(stdin),
        Some(arg) => resolve_text(arg),
    }
}

fn read_file(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "reading input file");
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_stdin(mut stdin: impl Read) -> Result<String> {
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("failed to read document from stdin")?;
    Ok(text)
}
