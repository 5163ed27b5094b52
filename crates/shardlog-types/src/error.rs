//! Error types for shardlog-types

use thiserror::Error;

/// Errors that can occur while constructing or parsing shardlog types
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid encoding (hex, base64, wrong digest length)
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Invalid checkpoint text
    #[error("Invalid checkpoint: {0}")]
    InvalidCheckpoint(String),

    /// Structural invariant violated
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for shardlog-types operations
pub type Result<T> = std::result::Result<T, Error>;
