//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted {kind} record {id}: {reason}")]
    CorruptedData {
        kind: &'static str,
        id: u32,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
