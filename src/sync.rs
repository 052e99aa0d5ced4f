//! Hash-driven record sync
//!
//! Staging the same scrape twice should not rewrite every record. A record
//! is written only when it is new or its content hash differs from the
//! stored copy; the hash is recomputed on both sides each time and never
//! stored.

use std::fmt;

use serde::Serialize;

use crate::hash::hash_record;
use crate::record::Record;
use crate::storage::{PutOptions, RecordBackend, RecordStorage, StorageError, StorageResult};

/// What a sync did with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOutcome {
    /// No stored record existed; it was written
    Created,
    /// The stored record differed (or a write was forced); it was replaced
    Updated,
    /// The stored record had the same content; nothing was written
    Skipped,
}

impl SyncOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncOutcome::Created => "created",
            SyncOutcome::Updated => "updated",
            SyncOutcome::Skipped => "skipped",
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters over a batch of syncs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl SyncReport {
    pub fn record(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Created => self.created += 1,
            SyncOutcome::Updated => self.updated += 1,
            SyncOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.updated + self.skipped
    }
}

/// Bring one stored record in line with `record`.
///
/// Creates the bucket if needed. With `force` the record is rewritten even
/// when its content is unchanged.
pub fn sync_record<B: RecordBackend>(
    storage: &mut RecordStorage<B>,
    bucket_id: &str,
    record_id: &str,
    record: Record,
    force: bool,
) -> StorageResult<SyncOutcome> {
    let outcome = match storage.get(bucket_id, record_id)? {
        None => {
            write(storage, bucket_id, record_id, record, PutOptions::new().auto_create())?;
            SyncOutcome::Created
        }
        Some(stored) if force || hash_record(&stored) != hash_record(&record) => {
            write(storage, bucket_id, record_id, record, PutOptions::new().overwrite())?;
            SyncOutcome::Updated
        }
        Some(_) => SyncOutcome::Skipped,
    };

    tracing::debug!(bucket = %bucket_id, record = %record_id, outcome = %outcome, "record synced");
    Ok(outcome)
}

fn write<B: RecordBackend>(
    storage: &mut RecordStorage<B>,
    bucket_id: &str,
    record_id: &str,
    record: Record,
    options: PutOptions,
) -> StorageResult<()> {
    if storage.put(bucket_id, record_id, record, options)? {
        Ok(())
    } else {
        Err(StorageError::Internal(format!(
            "write of {}/{} refused during sync",
            bucket_id, record_id
        )))
    }
}

/// Sync a batch of `(record id, record)` pairs into one bucket
pub fn sync_all<B, I>(
    storage: &mut RecordStorage<B>,
    bucket_id: &str,
    records: I,
    force: bool,
) -> StorageResult<SyncReport>
where
    B: RecordBackend,
    I: IntoIterator<Item = (String, Record)>,
{
    let mut report = SyncReport::default();
    for (record_id, record) in records {
        report.record(sync_record(storage, bucket_id, &record_id, record, force)?);
    }

    tracing::info!(
        bucket = %bucket_id,
        created = report.created,
        updated = report.updated,
        skipped = report.skipped,
        "bucket synced"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;
    use crate::storage::MemoryBackend;

    fn course(title: &str) -> Record {
        let mut r = Record::new();
        r.insert("code".into(), Value::from("CSC108H1"));
        r.insert("title".into(), Value::from(title));
        r
    }

    #[test]
    fn test_create_update_skip() {
        let mut storage = RecordStorage::new(MemoryBackend::new());

        let first = sync_record(&mut storage, "courses", "csc108", course("Intro"), false).unwrap();
        assert_eq!(first, SyncOutcome::Created);

        let again = sync_record(&mut storage, "courses", "csc108", course("Intro"), false).unwrap();
        assert_eq!(again, SyncOutcome::Skipped);

        let changed =
            sync_record(&mut storage, "courses", "csc108", course("Intro to CS"), false).unwrap();
        assert_eq!(changed, SyncOutcome::Updated);
        assert_eq!(
            storage.get("courses", "csc108").unwrap(),
            Some(course("Intro to CS"))
        );
    }

    #[test]
    fn test_force_rewrites_unchanged() {
        let mut storage = RecordStorage::new(MemoryBackend::new());
        sync_record(&mut storage, "courses", "csc108", course("Intro"), false).unwrap();

        let forced = sync_record(&mut storage, "courses", "csc108", course("Intro"), true).unwrap();
        assert_eq!(forced, SyncOutcome::Updated);
    }

    #[test]
    fn test_sync_all_report() {
        let mut storage = RecordStorage::new(MemoryBackend::new());
        sync_record(&mut storage, "courses", "a", course("A"), false).unwrap();
        sync_record(&mut storage, "courses", "b", course("B"), false).unwrap();

        let batch = vec![
            ("a".to_string(), course("A")),
            ("b".to_string(), course("B2")),
            ("c".to_string(), course("C")),
        ];
        let report = sync_all(&mut storage, "courses", batch, false).unwrap();

        assert_eq!(
            report,
            SyncReport {
                created: 1,
                updated: 1,
                skipped: 1
            }
        );
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_outcome_names() {
        assert_eq!(SyncOutcome::Created.to_string(), "created");
        assert_eq!(
            serde_json::to_string(&SyncOutcome::Skipped).unwrap(),
            "\"skipped\""
        );
    }
}
