//! Error types for cryptkit.
//!
//! The taxonomy follows the order in which failures can occur during an
//! operation: input validation (before any cryptographic work), key
//! derivation and cipher failures, structural corruption of a container, and
//! the opt-in strict integrity check.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("input cannot be empty")]
    EmptyInput,

    #[error("input is too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("source holds more than its declared {declared} bytes")]
    SourceSizeMismatch { declared: u64 },

    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("length must be greater than zero")]
    InvalidLength,

    #[error("file type is not supported: {0}")]
    BlockedFileType(String),

    #[error("key derivation failed: {0}")]
    Derivation(String),

    #[error("encryption failed")]
    Encryption,

    /// Wrong password and tampered data are indistinguishable at this layer.
    #[error("decryption failed, check password")]
    Decryption,

    #[error("random number generator failed: {0}")]
    Random(#[from] rand::Error),

    #[error("corrupted container: {0}")]
    Corrupted(String),

    #[error("invalid metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("integrity check failed: decrypted data does not match the recorded hash")]
    IntegrityMismatch,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn corrupted(reason: impl Into<String>) -> Self {
        Self::Corrupted(reason.into())
    }
}
