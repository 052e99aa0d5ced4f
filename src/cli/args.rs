//! CLI argument definitions using clap
//!
//! Commands:
//! - gator-store buckets
//! - gator-store make-bucket [ID]
//! - gator-store get <BUCKET> <RECORD>
//! - gator-store put <BUCKET> <RECORD> [--overwrite] [--auto-create] < record.json
//! - gator-store hash < value.json

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gator-store - bucket/record storage for staged timetable records
#[derive(Parser, Debug)]
#[command(name = "gator-store")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply if it does not exist)
    #[arg(long, global = true, default_value = "./gator-store.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all buckets
    Buckets,

    /// Create a bucket (random id if none is given)
    MakeBucket {
        id: Option<String>,
    },

    /// Delete a bucket and all its records
    DeleteBucket {
        id: String,
    },

    /// Delete every bucket
    DeleteAllBuckets,

    /// Remove all records from a bucket, keeping the bucket
    Clear {
        id: String,
    },

    /// Print one record
    Get {
        bucket: String,
        record: String,
    },

    /// Print every record in a bucket
    GetAll {
        bucket: String,
    },

    /// Store the JSON object read from stdin
    Put {
        bucket: String,
        record: String,

        /// Replace the record if it exists
        #[arg(long)]
        overwrite: bool,

        /// Create the bucket if it does not exist
        #[arg(long)]
        auto_create: bool,
    },

    /// Delete one record
    Delete {
        bucket: String,
        record: String,
    },

    /// Store the JSON object read from stdin only if its content changed
    Sync {
        bucket: String,
        record: String,

        /// Rewrite even if the content is unchanged
        #[arg(long)]
        force: bool,
    },

    /// Print the content hash of the JSON value read from stdin
    Hash,
}

impl Command {
    /// Whether the command reads a JSON document from stdin
    pub fn reads_stdin(&self) -> bool {
        matches!(self, Command::Put { .. } | Command::Sync { .. } | Command::Hash)
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
