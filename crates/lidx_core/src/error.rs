//! Error types for lidx core.

use thiserror::Error;

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Coarse classification of an [`IndexError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The store failed or returned data that does not decode.
    StoreFailure,
    /// Text could not be normalized into a searchable word.
    NormalizationFailure,
}

/// Errors that can occur in index operations.
///
/// A missing key is never an error; reads return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] lidx_storage::StorageError),

    /// A stored value failed to decode.
    #[error("codec error: {0}")]
    Codec(#[from] lidx_codec::CodecError),

    /// A query token or text segment has no normalized form.
    #[error("cannot normalize {input:?}")]
    Normalization {
        /// The offending input.
        input: String,
    },

    /// Stored entries contradict the key schema.
    #[error("index corrupted: {message}")]
    Corrupted {
        /// Description of the inconsistency.
        message: String,
    },
}

impl IndexError {
    /// Creates a normalization error.
    pub fn normalization(input: impl Into<String>) -> Self {
        Self::Normalization {
            input: input.into(),
        }
    }

    /// Creates a corruption error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted {
            message: message.into(),
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Normalization { .. } => ErrorKind::NormalizationFailure,
            Self::Storage(_) | Self::Codec(_) | Self::Corrupted { .. } => ErrorKind::StoreFailure,
        }
    }
}
