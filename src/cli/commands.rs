//! CLI command implementations
//!
//! Each command maps onto one storage operation. [`execute`] does the work
//! and returns the JSON payload; [`run`] wires it to the config file,
//! stdin and stdout.

use std::path::Path;

use serde_json::{json, Value as Json};

use crate::config::StorageConfig;
use crate::hash::make_hash_sha256;
use crate::logging;
use crate::record::{record_from_json, record_to_json, Record, Value};
use crate::storage::{AnyBackend, PutOptions, RecordBackend, RecordStorage};
use crate::sync::sync_record;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(&cli.config, cli.command)
}

/// Run a command against the storage described by the config file
pub fn run_command(config_path: &Path, command: Command) -> CliResult<()> {
    let config = StorageConfig::load_or_default(config_path)?;
    logging::init(&config);

    let mut storage = RecordStorage::<AnyBackend>::open(&config)?;
    let input = if command.reads_stdin() {
        Some(read_request()?)
    } else {
        None
    };

    let data = execute(&mut storage, command, input)?;
    write_response(data)
}

/// Execute a command and return its JSON result.
///
/// `input` carries the stdin document for commands that read one.
pub fn execute<B: RecordBackend>(
    storage: &mut RecordStorage<B>,
    command: Command,
    input: Option<Json>,
) -> CliResult<Json> {
    match command {
        Command::Buckets => {
            let mut buckets = storage.get_buckets()?;
            buckets.sort();
            Ok(json!({ "buckets": buckets }))
        }
        Command::MakeBucket { id } => {
            let bucket = storage.make_bucket(id.as_deref())?;
            Ok(json!({ "bucket": bucket }))
        }
        Command::DeleteBucket { id } => Ok(json!({ "deleted": storage.delete_bucket(&id) })),
        Command::DeleteAllBuckets => {
            let count = storage.get_buckets()?.len();
            storage.delete_all_buckets()?;
            Ok(json!({ "deleted": count }))
        }
        Command::Clear { id } => {
            storage.clear(&id)?;
            Ok(json!({ "cleared": id }))
        }
        Command::Get { bucket, record } => {
            let found = storage.get(&bucket, &record)?;
            Ok(json!({ "record": found.as_ref().map(record_to_json) }))
        }
        Command::GetAll { bucket } => {
            let records = storage.get_all(&bucket)?.map(|all| {
                all.iter()
                    .map(|(id, record)| (id.clone(), record_to_json(record)))
                    .collect::<serde_json::Map<_, _>>()
            });
            Ok(json!({ "records": records }))
        }
        Command::Put {
            bucket,
            record,
            overwrite,
            auto_create,
        } => {
            let options = PutOptions {
                overwrite,
                auto_create,
            };
            let stored = storage.put(&bucket, &record, input_record(input)?, options)?;
            Ok(json!({ "stored": stored }))
        }
        Command::Delete { bucket, record } => {
            Ok(json!({ "deleted": storage.delete(&bucket, &record)? }))
        }
        Command::Sync {
            bucket,
            record,
            force,
        } => {
            let outcome = sync_record(storage, &bucket, &record, input_record(input)?, force)?;
            Ok(json!({ "outcome": outcome }))
        }
        Command::Hash => {
            let value = Value::from(require_input(input)?);
            Ok(json!({ "hash": make_hash_sha256(&value) }))
        }
    }
}

fn require_input(input: Option<Json>) -> CliResult<Json> {
    input.ok_or_else(|| CliError::invalid_input("Command expects a JSON document on stdin"))
}

fn input_record(input: Option<Json>) -> CliResult<Record> {
    record_from_json(require_input(input)?)
        .ok_or_else(|| CliError::invalid_input("Record must be a JSON object"))
}
