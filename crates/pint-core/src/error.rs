use std::path::PathBuf;
use thiserror::Error;

/// All errors produced outside the pure parse/analyze core.
#[derive(Error, Debug)]
pub enum ChatError {
    /// A chat export could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested export file or directory does not exist.
    #[error("Chat path not found: {0}")]
    ChatPathNotFound(PathBuf),

    /// A directory was given but contains no `.txt` chat exports.
    #[error("No chat files found in {0}")]
    NoChatFiles(PathBuf),

    /// A timezone name is not a recognised IANA identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The `--now` override did not match any accepted format.
    #[error("Invalid reference time: {0}")]
    InvalidReferenceTime(String),

    /// An analysis result could not be serialised.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the pint crates.
pub type Result<T> = std::result::Result<T, ChatError>;
