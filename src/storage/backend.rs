//! # Record Backend Trait
//!
//! The primitives a storage medium must supply. Every method may assume the
//! preconditions in its doc comment hold: [`RecordStorage`] checks existence
//! before calling in, so backends never repeat that policy.
//!
//! [`RecordStorage`]: super::RecordStorage

use std::collections::BTreeMap;

use super::errors::StorageResult;
use crate::record::Record;

/// Backend trait for record storage
pub trait RecordBackend: std::fmt::Debug {
    /// Check if a bucket exists
    fn bucket_exists(&self, bucket_id: &str) -> StorageResult<bool>;

    /// Check if a record exists. A missing bucket means a missing record.
    fn record_exists(&self, bucket_id: &str, record_id: &str) -> StorageResult<bool>;

    /// List the ids of all buckets, in no particular order
    fn list_buckets(&self) -> StorageResult<Vec<String>>;

    /// Create a bucket. Assumes it does not exist.
    fn create_bucket(&mut self, bucket_id: &str) -> StorageResult<()>;

    /// Remove a bucket and its records. Assumes it exists.
    ///
    /// Returns `Ok(false)` if the medium refused the removal.
    fn remove_bucket(&mut self, bucket_id: &str) -> StorageResult<bool>;

    /// Remove every bucket.
    ///
    /// The default walks [`list_buckets`](Self::list_buckets); backends with
    /// a cheaper bulk removal override it.
    fn remove_all_buckets(&mut self) -> StorageResult<()> {
        for bucket_id in self.list_buckets()? {
            self.remove_bucket(&bucket_id)?;
        }
        Ok(())
    }

    /// Remove all records from a bucket, keeping the bucket. Assumes it exists.
    fn clear_bucket(&mut self, bucket_id: &str) -> StorageResult<()>;

    /// Read one record. Assumes the record exists.
    fn read_record(&self, bucket_id: &str, record_id: &str) -> StorageResult<Record>;

    /// Read every record in a bucket, keyed by record id. Assumes the bucket exists.
    fn read_bucket(&self, bucket_id: &str) -> StorageResult<BTreeMap<String, Record>>;

    /// Write a record, replacing any existing one. Assumes the bucket exists
    /// and that replacement has already been authorised.
    fn write_record(&mut self, bucket_id: &str, record_id: &str, record: Record)
        -> StorageResult<()>;

    /// Remove one record. Assumes the record exists.
    fn remove_record(&mut self, bucket_id: &str, record_id: &str) -> StorageResult<bool>;
}
