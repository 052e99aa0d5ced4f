//! # Record Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Record storage errors
///
/// Routine outcomes (missing record, refused overwrite) are not errors:
/// the operations report them through their return values.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    // Bucket errors
    #[error("Bucket already exists: {0}")]
    BucketAlreadyExists(String),

    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    // Identifier errors
    #[error("Invalid id: {0}")]
    InvalidId(String),

    // Record file errors
    #[error("Failed to encode record: {0}")]
    EncodeError(String),

    #[error("Failed to decode record: {0}")]
    DecodeError(String),

    // I/O errors
    #[error("I/O error: {0}")]
    IoError(String),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorageError {
    pub(crate) fn io(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        StorageError::IoError(format!("{}: {}", context, err))
    }

    /// Whether this error came from the environment rather than the caller
    pub fn is_environmental(&self) -> bool {
        matches!(
            self,
            StorageError::IoError(_) | StorageError::DecodeError(_) | StorageError::EncodeError(_)
        )
    }
}
