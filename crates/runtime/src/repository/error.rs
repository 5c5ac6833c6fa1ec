//! Failures while saving or restoring a game snapshot.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A writer panicked while holding the in-memory slot.
    #[error("in-memory snapshot slot was poisoned")]
    LockPoisoned,

    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not write snapshot to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode snapshot: {0}")]
    Encode(String),

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file exists but does not decode to a game.
    #[error("snapshot is corrupted: {0}")]
    CorruptedData(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
