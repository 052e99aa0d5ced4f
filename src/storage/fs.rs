//! # Filesystem Backend
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/<bucket segment>/<record segment>
//! ```
//!
//! One directory per bucket, one MessagePack file per record, no file
//! extension. Segments come from the configured [`IdEncoding`].
//!
//! There is no locking. Two writers touching the same bucket, whether
//! threads or processes, can lose or corrupt records; keep to one writer
//! at a time.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::backend::RecordBackend;
use super::codec::{decode_record, encode_record};
use super::errors::{StorageError, StorageResult};
use super::naming::IdEncoding;
use crate::record::Record;

/// Filesystem storage backend
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
    encoding: IdEncoding,
}

impl FileBackend {
    /// Create a backend rooted at `root` using lossy id sanitization.
    ///
    /// The root is not touched until the first operation.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_encoding(root, IdEncoding::Sanitize)
    }

    /// Create a backend with an explicit id encoding
    pub fn with_encoding(root: impl Into<PathBuf>, encoding: IdEncoding) -> Self {
        Self {
            root: root.into(),
            encoding,
        }
    }

    /// Open a backend, checking (or creating) the root directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::IoError`] if the root is missing and
    /// `create_root` is off, is not a directory, or cannot be created.
    pub fn open(
        root: impl Into<PathBuf>,
        encoding: IdEncoding,
        create_root: bool,
    ) -> StorageResult<Self> {
        let backend = Self::with_encoding(root, encoding);

        if create_root {
            fs::create_dir_all(&backend.root)
                .map_err(|e| StorageError::io(backend.root.display(), e))?;
        } else if !backend.root.is_dir() {
            return Err(StorageError::IoError(format!(
                "{}: root directory does not exist",
                backend.root.display()
            )));
        }

        Ok(backend)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn encoding(&self) -> IdEncoding {
        self.encoding
    }

    fn bucket_dir(&self, bucket_id: &str) -> StorageResult<PathBuf> {
        Ok(self.root.join(self.encoding.encode(bucket_id)?))
    }

    fn record_path(&self, bucket_id: &str, record_id: &str) -> StorageResult<PathBuf> {
        Ok(self
            .bucket_dir(bucket_id)?
            .join(self.encoding.encode(record_id)?))
    }

    /// Entries of `dir` that are files, as (id, path) pairs
    fn record_files(&self, dir: &Path) -> StorageResult<Vec<(String, PathBuf)>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(dir).map_err(|e| StorageError::io(dir.display(), e))? {
            let entry = entry.map_err(|e| StorageError::io(dir.display(), e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| self.encoding.decode(name))
            else {
                tracing::debug!(path = %path.display(), "skipping unrecognised record file");
                continue;
            };
            files.push((id, path));
        }

        Ok(files)
    }

    fn read_file(path: &Path) -> StorageResult<Record> {
        let bytes = fs::read(path).map_err(|e| StorageError::io(path.display(), e))?;
        decode_record(&bytes)
    }
}

impl RecordBackend for FileBackend {
    // An id with no valid segment cannot name anything on disk
    fn bucket_exists(&self, bucket_id: &str) -> StorageResult<bool> {
        Ok(self.bucket_dir(bucket_id).is_ok_and(|dir| dir.is_dir()))
    }

    fn record_exists(&self, bucket_id: &str, record_id: &str) -> StorageResult<bool> {
        Ok(self
            .record_path(bucket_id, record_id)
            .is_ok_and(|path| path.is_file()))
    }

    fn list_buckets(&self) -> StorageResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(self.root.display(), e)),
        };

        let mut buckets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(self.root.display(), e))?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| self.encoding.decode(name))
            {
                buckets.push(id);
            }
        }

        Ok(buckets)
    }

    fn create_bucket(&mut self, bucket_id: &str) -> StorageResult<()> {
        let dir = self.bucket_dir(bucket_id)?;
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(dir.display(), e))
    }

    fn remove_bucket(&mut self, bucket_id: &str) -> StorageResult<bool> {
        let dir = self.bucket_dir(bucket_id)?;
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "failed to remove bucket directory");
                Ok(false)
            }
        }
    }

    fn clear_bucket(&mut self, bucket_id: &str) -> StorageResult<()> {
        let dir = self.bucket_dir(bucket_id)?;
        for (_, path) in self.record_files(&dir)? {
            fs::remove_file(&path).map_err(|e| StorageError::io(path.display(), e))?;
        }
        Ok(())
    }

    fn read_record(&self, bucket_id: &str, record_id: &str) -> StorageResult<Record> {
        Self::read_file(&self.record_path(bucket_id, record_id)?)
    }

    fn read_bucket(&self, bucket_id: &str) -> StorageResult<BTreeMap<String, Record>> {
        let dir = self.bucket_dir(bucket_id)?;
        let mut records = BTreeMap::new();
        for (id, path) in self.record_files(&dir)? {
            records.insert(id, Self::read_file(&path)?);
        }
        Ok(records)
    }

    fn write_record(
        &mut self,
        bucket_id: &str,
        record_id: &str,
        record: Record,
    ) -> StorageResult<()> {
        let path = self.record_path(bucket_id, record_id)?;
        let bytes = encode_record(&record)?;
        fs::write(&path, bytes).map_err(|e| StorageError::io(path.display(), e))
    }

    fn remove_record(&mut self, bucket_id: &str, record_id: &str) -> StorageResult<bool> {
        let path = self.record_path(bucket_id, record_id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::io(path.display(), e)),
        }
    }
}
