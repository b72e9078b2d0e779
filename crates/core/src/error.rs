use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sidetrack-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for sidetrack
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Transcript file errors
    #[error("transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Parse/serialization errors
    #[error("parse error: {0}")]
    Parse(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Errors raised while loading a transcript file
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// Transcript file does not exist
    #[error("transcript file not found: {0}")]
    NotFound(PathBuf),

    /// Transcript JSON could not be decoded
    #[error("invalid transcript at {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    /// Transcript contained no messages
    #[error("transcript is empty: {0}")]
    Empty(PathBuf),
}
