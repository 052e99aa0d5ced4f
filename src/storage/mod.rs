//! # Record Storage
//!
//! Bucket/record key-value storage for staging raw records before they are
//! turned into typed documents.
//!
//! [`RecordStorage`] applies the shared policy (existence checks, bucket
//! auto-creation, overwrite gating) and delegates the storage step to a
//! [`RecordBackend`]:
//!
//! - [`MemoryBackend`]: process-lifetime maps
//! - [`FileBackend`]: one directory per bucket, one MessagePack file per record
//! - [`AnyBackend`]: either of the above, picked from configuration
//!
//! No operation spans more than one record, and nothing here is safe for
//! concurrent writers.

pub mod errors;
pub mod backend;
pub mod codec;
pub mod naming;
pub mod memory;
pub mod fs;
pub mod store;
pub mod any;

pub use errors::{StorageError, StorageResult};
pub use backend::RecordBackend;
pub use naming::IdEncoding;
pub use memory::MemoryBackend;
pub use fs::FileBackend;
pub use store::{generate_bucket_id, PutOptions, RecordStorage};
pub use any::AnyBackend;
