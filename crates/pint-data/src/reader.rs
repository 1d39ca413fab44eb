//! Chat export discovery and loading.
//!
//! An export is either a single `.txt` file or a directory (an unzipped
//! export, possibly with attachments next to it) holding one or more `.txt`
//! chat files.

use std::path::{Path, PathBuf};

use pint_core::error::{ChatError, Result};
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.txt` files recursively under `dir`, sorted by path.
pub fn find_chat_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Chat path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("txt"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load the full text of a chat export.
///
/// A file is read as-is. For a directory, every chat file found by
/// [`find_chat_files`] is read and joined with newlines.
pub fn load_chat_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ChatError::ChatPathNotFound(path.to_path_buf()));
    }

    if path.is_file() {
        let text = read_file(path)?;
        debug!("Loaded {} bytes from {}", text.len(), path.display());
        return Ok(text);
    }

    let files = find_chat_files(path);
    if files.is_empty() {
        return Err(ChatError::NoChatFiles(path.to_path_buf()));
    }

    let mut parts = Vec::with_capacity(files.len());
    for file in &files {
        parts.push(read_file(file)?);
    }
    let text = parts.join("\n");

    debug!(
        "Loaded {} bytes from {} chat files under {}",
        text.len(),
        files.len(),
        path.display()
    );
    Ok(text)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Read a file to a string. Invalid UTF-8 sequences are replaced rather than
/// failing the whole export.
fn read_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| ChatError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(
                "Chat file {} is not valid UTF-8; replacing invalid bytes",
                path.display()
            );
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
