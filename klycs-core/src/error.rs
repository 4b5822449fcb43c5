//! Error types for the klycs crates.

use thiserror::Error;

/// Errors that can occur in klycs operations.
#[derive(Error, Debug)]
pub enum KlycsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Event store error: {0}")]
    Store(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for klycs operations.
pub type KlycsResult<T> = Result<T, KlycsError>;
