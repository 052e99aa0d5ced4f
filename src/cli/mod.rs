//! CLI module for gator-store
//!
//! Operator access to a configured record storage:
//! - bucket management: buckets, make-bucket, delete-bucket, clear
//! - records: get, get-all, put, delete, sync
//! - hash: content digest of a JSON document

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{execute, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{envelope, parse_request, read_request, write_response};
