//! # In-Memory Backend
//!
//! Buckets live in a two-level map for the lifetime of the process. Nothing
//! is persisted. Useful for tests and throwaway pipelines.

use std::collections::{BTreeMap, HashMap};

use super::backend::RecordBackend;
use super::errors::{StorageError, StorageResult};
use crate::record::Record;

/// In-memory storage backend
///
/// Reads hand out copies of the stored records, so a caller mutating what
/// it got back never changes what is stored.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    buckets: HashMap<String, HashMap<String, Record>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all buckets
    pub fn len(&self) -> usize {
        self.buckets.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket(&self, bucket_id: &str) -> StorageResult<&HashMap<String, Record>> {
        self.buckets
            .get(bucket_id)
            .ok_or_else(|| StorageError::BucketNotFound(bucket_id.to_string()))
    }

    fn bucket_mut(&mut self, bucket_id: &str) -> StorageResult<&mut HashMap<String, Record>> {
        self.buckets
            .get_mut(bucket_id)
            .ok_or_else(|| StorageError::BucketNotFound(bucket_id.to_string()))
    }
}

impl RecordBackend for MemoryBackend {
    fn bucket_exists(&self, bucket_id: &str) -> StorageResult<bool> {
        Ok(self.buckets.contains_key(bucket_id))
    }

    fn record_exists(&self, bucket_id: &str, record_id: &str) -> StorageResult<bool> {
        Ok(self
            .buckets
            .get(bucket_id)
            .is_some_and(|bucket| bucket.contains_key(record_id)))
    }

    fn list_buckets(&self) -> StorageResult<Vec<String>> {
        Ok(self.buckets.keys().cloned().collect())
    }

    fn create_bucket(&mut self, bucket_id: &str) -> StorageResult<()> {
        self.buckets.insert(bucket_id.to_string(), HashMap::new());
        Ok(())
    }

    fn remove_bucket(&mut self, bucket_id: &str) -> StorageResult<bool> {
        Ok(self.buckets.remove(bucket_id).is_some())
    }

    fn remove_all_buckets(&mut self) -> StorageResult<()> {
        self.buckets.clear();
        Ok(())
    }

    fn clear_bucket(&mut self, bucket_id: &str) -> StorageResult<()> {
        self.bucket_mut(bucket_id)?.clear();
        Ok(())
    }

    fn read_record(&self, bucket_id: &str, record_id: &str) -> StorageResult<Record> {
        self.bucket(bucket_id)?
            .get(record_id)
            .cloned()
            .ok_or_else(|| StorageError::Internal(format!("record vanished: {}", record_id)))
    }

    fn read_bucket(&self, bucket_id: &str) -> StorageResult<BTreeMap<String, Record>> {
        Ok(self
            .bucket(bucket_id)?
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect())
    }

    fn write_record(
        &mut self,
        bucket_id: &str,
        record_id: &str,
        record: Record,
    ) -> StorageResult<()> {
        self.bucket_mut(bucket_id)?.insert(record_id.to_string(), record);
        Ok(())
    }

    fn remove_record(&mut self, bucket_id: &str, record_id: &str) -> StorageResult<bool> {
        Ok(self.bucket_mut(bucket_id)?.remove(record_id).is_some())
    }
}
