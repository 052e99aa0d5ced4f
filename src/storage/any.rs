//! Backend chosen at runtime from configuration

use std::collections::BTreeMap;

use super::backend::RecordBackend;
use super::errors::StorageResult;
use super::fs::FileBackend;
use super::memory::MemoryBackend;
use super::store::RecordStorage;
use crate::config::{BackendKind, StorageConfig};
use crate::record::Record;

/// One of the built-in backends
#[derive(Debug)]
pub enum AnyBackend {
    Memory(MemoryBackend),
    File(FileBackend),
}

impl AnyBackend {
    /// Build the backend described by `config`
    pub fn from_config(config: &StorageConfig) -> StorageResult<Self> {
        match config.backend {
            BackendKind::Memory => Ok(AnyBackend::Memory(MemoryBackend::new())),
            BackendKind::File => Ok(AnyBackend::File(FileBackend::open(
                config.root_path(),
                config.id_encoding,
                config.create_root,
            )?)),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            AnyBackend::Memory(_) => BackendKind::Memory,
            AnyBackend::File(_) => BackendKind::File,
        }
    }

    fn inner(&self) -> &dyn RecordBackend {
        match self {
            AnyBackend::Memory(b) => b,
            AnyBackend::File(b) => b,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn RecordBackend {
        match self {
            AnyBackend::Memory(b) => b,
            AnyBackend::File(b) => b,
        }
    }
}

impl RecordBackend for AnyBackend {
    fn bucket_exists(&self, bucket_id: &str) -> StorageResult<bool> {
        self.inner().bucket_exists(bucket_id)
    }

    fn record_exists(&self, bucket_id: &str, record_id: &str) -> StorageResult<bool> {
        self.inner().record_exists(bucket_id, record_id)
    }

    fn list_buckets(&self) -> StorageResult<Vec<String>> {
        self.inner().list_buckets()
    }

    fn create_bucket(&mut self, bucket_id: &str) -> StorageResult<()> {
        self.inner_mut().create_bucket(bucket_id)
    }

    fn remove_bucket(&mut self, bucket_id: &str) -> StorageResult<bool> {
        self.inner_mut().remove_bucket(bucket_id)
    }

    fn remove_all_buckets(&mut self) -> StorageResult<()> {
        self.inner_mut().remove_all_buckets()
    }

    fn clear_bucket(&mut self, bucket_id: &str) -> StorageResult<()> {
        self.inner_mut().clear_bucket(bucket_id)
    }

    fn read_record(&self, bucket_id: &str, record_id: &str) -> StorageResult<Record> {
        self.inner().read_record(bucket_id, record_id)
    }

    fn read_bucket(&self, bucket_id: &str) -> StorageResult<BTreeMap<String, Record>> {
        self.inner().read_bucket(bucket_id)
    }

    fn write_record(
        &mut self,
        bucket_id: &str,
        record_id: &str,
        record: Record,
    ) -> StorageResult<()> {
        self.inner_mut().write_record(bucket_id, record_id, record)
    }

    fn remove_record(&mut self, bucket_id: &str, record_id: &str) -> StorageResult<bool> {
        self.inner_mut().remove_record(bucket_id, record_id)
    }
}

impl RecordStorage<AnyBackend> {
    /// Open the storage described by `config`
    pub fn open(config: &StorageConfig) -> StorageResult<Self> {
        let backend = AnyBackend::from_config(config)?;
        tracing::debug!(backend = ?backend.kind(), "record storage opened");
        Ok(Self::new(backend))
    }
}
