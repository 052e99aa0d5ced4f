//! # Record Storage
//!
//! [`RecordStorage`] is the public face of every backend. It owns the
//! policy shared by all of them:
//!
//! - existence checks gate every read and mutation
//! - `put` creates a missing bucket only when asked to
//! - `put` replaces an existing record only when asked to
//! - bucket deletion failures are reported as `false`, never raised
//! - an empty id names nothing: lookups on it report absence, while
//!   `make_bucket` and `put` reject it with [`StorageError::InvalidId`]
//!
//! The backend only performs the mechanical step once the checks pass.

use std::collections::BTreeMap;

use uuid::Uuid;

use super::backend::RecordBackend;
use super::errors::{StorageError, StorageResult};
use crate::record::Record;

/// Write policy for [`RecordStorage::put`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PutOptions {
    /// Replace the record if it already exists
    pub overwrite: bool,
    /// Create the bucket if it does not exist
    pub auto_create: bool,
}

impl PutOptions {
    /// Refuse to overwrite, refuse to create buckets
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    pub fn auto_create(mut self) -> Self {
        self.auto_create = true;
        self
    }
}

/// Bucket/record store over a backend
#[derive(Debug)]
pub struct RecordStorage<B: RecordBackend> {
    backend: B,
}

impl<B: RecordBackend> RecordStorage<B> {
    /// Wrap a backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Borrow the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create a bucket and return its id.
    ///
    /// When `bucket_id` is `None` a random id (32 hex chars) is generated.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BucketAlreadyExists`] if the bucket exists,
    /// [`StorageError::InvalidId`] if the given id is empty.
    pub fn make_bucket(&mut self, bucket_id: Option<&str>) -> StorageResult<String> {
        let bucket_id = match bucket_id {
            Some(id) => require_id(id)?.to_string(),
            None => generate_bucket_id(),
        };

        if self.backend.bucket_exists(&bucket_id)? {
            return Err(StorageError::BucketAlreadyExists(bucket_id));
        }

        self.backend.create_bucket(&bucket_id)?;
        tracing::debug!(bucket = %bucket_id, "bucket created");
        Ok(bucket_id)
    }

    /// Delete a bucket and all its records.
    ///
    /// Returns `false` if the bucket does not exist or could not be removed.
    /// Removal failures are logged, not returned.
    pub fn delete_bucket(&mut self, bucket_id: &str) -> bool {
        match self.try_delete_bucket(bucket_id) {
            Ok(deleted) => deleted,
            Err(e) if e.is_environmental() => {
                tracing::warn!(bucket = %bucket_id, error = %e, "bucket deletion failed");
                false
            }
            Err(e) => {
                tracing::debug!(bucket = %bucket_id, error = %e, "bucket deletion refused");
                false
            }
        }
    }

    fn try_delete_bucket(&mut self, bucket_id: &str) -> StorageResult<bool> {
        if !self.bucket_exists(bucket_id)? {
            return Ok(false);
        }

        let deleted = self.backend.remove_bucket(bucket_id)?;
        if deleted {
            tracing::debug!(bucket = %bucket_id, "bucket deleted");
        }
        Ok(deleted)
    }

    /// Ids of all existing buckets, in backend order
    pub fn get_buckets(&self) -> StorageResult<Vec<String>> {
        self.backend.list_buckets()
    }

    /// Delete every bucket that exists at call time
    pub fn delete_all_buckets(&mut self) -> StorageResult<()> {
        self.backend.remove_all_buckets()?;
        tracing::debug!("all buckets deleted");
        Ok(())
    }

    /// Remove every record from a bucket, keeping the bucket.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BucketNotFound`] if the bucket does not exist.
    pub fn clear(&mut self, bucket_id: &str) -> StorageResult<()> {
        if !self.bucket_exists(bucket_id)? {
            return Err(StorageError::BucketNotFound(bucket_id.to_string()));
        }

        self.backend.clear_bucket(bucket_id)?;
        tracing::debug!(bucket = %bucket_id, "bucket cleared");
        Ok(())
    }

    pub fn bucket_exists(&self, bucket_id: &str) -> StorageResult<bool> {
        if bucket_id.is_empty() {
            return Ok(false);
        }
        self.backend.bucket_exists(bucket_id)
    }

    /// `false` when either the bucket or the record is missing
    pub fn record_exists(&self, bucket_id: &str, record_id: &str) -> StorageResult<bool> {
        if bucket_id.is_empty() || record_id.is_empty() {
            return Ok(false);
        }
        self.backend.record_exists(bucket_id, record_id)
    }

    /// Fetch a record; `None` if it (or its bucket) does not exist
    pub fn get(&self, bucket_id: &str, record_id: &str) -> StorageResult<Option<Record>> {
        if !self.record_exists(bucket_id, record_id)? {
            return Ok(None);
        }

        self.backend.read_record(bucket_id, record_id).map(Some)
    }

    /// Fetch every record in a bucket, keyed by record id.
    ///
    /// `None` means the bucket does not exist; an empty map means it exists
    /// and holds nothing.
    pub fn get_all(&self, bucket_id: &str) -> StorageResult<Option<BTreeMap<String, Record>>> {
        if !self.bucket_exists(bucket_id)? {
            return Ok(None);
        }

        self.backend.read_bucket(bucket_id).map(Some)
    }

    /// Store a record, replacing it wholesale if permitted.
    ///
    /// Returns `false` without touching storage when the bucket is missing
    /// and `auto_create` is off, or the record exists and `overwrite` is off.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidId`] if either id is empty.
    pub fn put(
        &mut self,
        bucket_id: &str,
        record_id: &str,
        record: Record,
        options: PutOptions,
    ) -> StorageResult<bool> {
        require_id(bucket_id)?;
        require_id(record_id)?;

        if !self.backend.bucket_exists(bucket_id)? {
            if !options.auto_create {
                tracing::trace!(bucket = %bucket_id, record = %record_id, "put refused: no bucket");
                return Ok(false);
            }
            self.make_bucket(Some(bucket_id))?;
        } else if !options.overwrite && self.backend.record_exists(bucket_id, record_id)? {
            tracing::trace!(bucket = %bucket_id, record = %record_id, "put refused: record exists");
            return Ok(false);
        }

        self.backend.write_record(bucket_id, record_id, record)?;
        tracing::debug!(bucket = %bucket_id, record = %record_id, "record written");
        Ok(true)
    }

    /// Delete a record; `false` if it (or its bucket) does not exist
    pub fn delete(&mut self, bucket_id: &str, record_id: &str) -> StorageResult<bool> {
        if !self.record_exists(bucket_id, record_id)? {
            return Ok(false);
        }

        let deleted = self.backend.remove_record(bucket_id, record_id)?;
        if deleted {
            tracing::debug!(bucket = %bucket_id, record = %record_id, "record deleted");
        }
        Ok(deleted)
    }
}

fn require_id(id: &str) -> StorageResult<&str> {
    if id.is_empty() {
        return Err(StorageError::InvalidId("id must not be empty".into()));
    }
    Ok(id)
}

/// Fresh bucket id: a v4 UUID in simple (32 hex char) form
pub fn generate_bucket_id() -> String {
    Uuid::new_v4().simple().to_string()
}
