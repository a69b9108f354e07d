//! Input handling for metadata documents from files or stdin.

use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;

/// A metadata document read from disk or stdin.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    /// Display name (`<stdin>` or the path)
    pub name: String,
    /// Label fallback taken from the file stem
    pub stem: Option<String>,
    pub content: String,
}

/// Read a metadata document from `path`, or from stdin if no path is given.
pub fn read_input(path: Option<&Path>) -> Result<DocumentSource> {
    match path {
        Some(path) => read_from_file(path),
        None => read_from_stdin(),
    }
}

/// Read the document from stdin
fn read_from_stdin() -> Result<DocumentSource> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;

    Ok(DocumentSource {
        name: "<stdin>".to_string(),
        stem: None,
        content,
    })
}

/// Read the document from a file
fn read_from_file(path: &Path) -> Result<DocumentSource> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(DocumentSource {
        name: path.display().to_string(),
        stem: path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned()),
        content,
    })
}
