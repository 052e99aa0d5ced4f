//! gator-store - bucket/record storage for staged timetable records
//!
//! Raw scraped records are staged here before they are converted into typed
//! documents. The crate provides:
//!
//! - [`storage`]: bucket/record storage with in-memory and filesystem backends
//! - [`hash`]: order-insensitive content digests for change detection
//! - [`sync`]: create/update/skip syncing driven by those digests
//! - [`config`], [`logging`], [`cli`]: the `gator-store` binary's plumbing

pub mod cli;
pub mod config;
pub mod hash;
pub mod logging;
pub mod record;
pub mod storage;
pub mod sync;

pub use hash::{hash_record, make_hash_sha256, make_hashable, Hashable};
pub use record::{Record, Value};
pub use storage::{
    AnyBackend, FileBackend, IdEncoding, MemoryBackend, PutOptions, RecordBackend, RecordStorage,
    StorageError, StorageResult,
};
pub use sync::{sync_all, sync_record, SyncOutcome, SyncReport};
