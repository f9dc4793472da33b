//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The store contents are corrupted.
    #[error("storage corrupted: {0}")]
    Corrupted(String),

    /// A log record failed its checksum.
    #[error("checksum mismatch at offset {offset}: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch {
        /// Offset of the record in the log.
        offset: u64,
        /// Checksum stored in the record.
        expected: u32,
        /// Checksum computed over the record.
        actual: u32,
    },

    /// Another process holds the store lock.
    #[error("store locked: another process has exclusive access")]
    Locked,

    /// The store directory does not exist and creation was not requested.
    #[error("store does not exist: {}", path.display())]
    Missing {
        /// Directory that was expected to hold the store.
        path: PathBuf,
    },

    /// The store already holds data and `error_if_exists` was requested.
    #[error("store already exists: {}", path.display())]
    AlreadyExists {
        /// Directory holding the existing store.
        path: PathBuf,
    },
}

impl StorageError {
    /// Creates a corruption error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted(message.into())
    }
}
