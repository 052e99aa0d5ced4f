//! Errors surfaced by the `gator-store` binary
//!
//! Every failure is reported as a stable code plus a human message, e.g.
//! `GATOR_CLI_STORAGE_ERROR: Bucket not found: fall2022`.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    ConfigError,
    /// stdin or stdout failed
    IoError,
    /// Missing or malformed JSON document on stdin
    InvalidInput,
    StorageError,
}

impl CliErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigError => "GATOR_CLI_CONFIG_ERROR",
            Self::IoError => "GATOR_CLI_IO_ERROR",
            Self::InvalidInput => "GATOR_CLI_INVALID_INPUT",
            Self::StorageError => "GATOR_CLI_STORAGE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{}: {message}", .code.as_str())]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::io_error(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_input(format!("JSON error: {}", err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::config_error(err.to_string())
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        Self::new(CliErrorCode::StorageError, err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::invalid_input("record must be a JSON object");
        assert_eq!(
            err.to_string(),
            "GATOR_CLI_INVALID_INPUT: record must be a JSON object"
        );
        assert_eq!(err.message(), "record must be a JSON object");
    }

    #[test]
    fn test_from_storage_error() {
        let err = CliError::from(StorageError::BucketNotFound("b".into()));
        assert_eq!(err.code(), &CliErrorCode::StorageError);
        assert!(err.message().contains("Bucket not found: b"));
    }
}
