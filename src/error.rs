//! Error types for codepad

use thiserror::Error;

/// Result type alias for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
///
/// Only the surrounding application can fail: file and terminal I/O,
/// configuration, logging setup. Highlighting and indentation never do.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Buffer has no file name")]
    NoFileName,

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Cannot write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Logging unavailable: {0}")]
    Logging(String),
}
