//! Storage configuration
//!
//! Loaded from a JSON file. Every field is optional:
//!
//! ```json
//! {
//!   "backend": "file",
//!   "root_dir": "./records",
//!   "id_encoding": "sanitize",
//!   "create_root": true,
//!   "log_level": "info",
//!   "log_format": "text"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::IdEncoding;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Which backend holds the records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    #[default]
    File,
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Record storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend kind (default: file)
    #[serde(default)]
    pub backend: BackendKind,

    /// Root directory for the file backend (default: ./records)
    #[serde(default = "default_root_dir")]
    pub root_dir: String,

    /// Id to path segment mapping for the file backend (default: sanitize)
    #[serde(default)]
    pub id_encoding: IdEncoding,

    /// Create the root directory on open if missing (default: true)
    #[serde(default = "default_create_root")]
    pub create_root: bool,

    /// Log filter used when RUST_LOG is unset (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_root_dir() -> String {
    "./records".to_string()
}
fn default_create_root() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            root_dir: default_root_dir(),
            id_encoding: IdEncoding::default(),
            create_root: default_create_root(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl StorageConfig {
    /// In-memory storage, everything else default
    pub fn memory() -> Self {
        Self {
            backend: BackendKind::Memory,
            ..Self::default()
        }
    }

    /// File storage rooted at `root_dir`, everything else default
    pub fn file(root_dir: impl Into<String>) -> Self {
        Self {
            backend: BackendKind::File,
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Load configuration from file, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: StorageConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate field combinations
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == BackendKind::File && self.root_dir.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "root_dir must be set for the file backend".into(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log_level: '{}'. Expected one of {}.",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StorageConfig::from_json("{}").unwrap();
        assert_eq!(config, StorageConfig::default());
        assert_eq!(config.backend, BackendKind::File);
        assert_eq!(config.root_dir, "./records");
        assert_eq!(config.id_encoding, IdEncoding::Sanitize);
        assert!(config.create_root);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_full_config() {
        let config = StorageConfig::from_json(
            r#"{
                "backend": "memory",
                "root_dir": "/var/lib/gator",
                "id_encoding": "hex",
                "create_root": false,
                "log_level": "debug",
                "log_format": "json"
            }"#,
        )
        .unwrap();

        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.root_path(), PathBuf::from("/var/lib/gator"));
        assert_eq!(config.id_encoding, IdEncoding::Hex);
        assert!(!config.create_root);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_rejects_empty_root_for_file_backend() {
        let err = StorageConfig::from_json(r#"{"root_dir": " "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        // Irrelevant for the memory backend
        assert!(StorageConfig::from_json(r#"{"backend": "memory", "root_dir": ""}"#).is_ok());
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(matches!(
            StorageConfig::from_json(r#"{"log_level": "loud"}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            StorageConfig::from_json(r#"{"backend": "s3"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gator-store.json");

        assert_eq!(
            StorageConfig::load_or_default(&path).unwrap(),
            StorageConfig::default()
        );

        fs::write(&path, r#"{"backend": "memory"}"#).unwrap();
        assert_eq!(
            StorageConfig::load_or_default(&path).unwrap().backend,
            BackendKind::Memory
        );
        assert!(matches!(
            StorageConfig::load(&temp.path().join("absent.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
