//! Bucket and record ids as path segments
//!
//! Ids are arbitrary strings; path segments are not. Two mappings exist:
//!
//! - [`IdEncoding::Sanitize`] replaces every character outside
//!   `[A-Za-z0-9_]` with `_`. This is lossy: `"a-b"` and `"a.b"` both map
//!   to `"a_b"` and therefore address the same file. Listing returns the
//!   sanitized names.
//! - [`IdEncoding::Hex`] writes the lowercase hex of the id's UTF-8 bytes.
//!   Distinct ids never collide and listings return the original ids.
//!   Segments are twice the id's byte length, so ids over 127 bytes do not
//!   fit in a file name.
//!
//! Segments longer than [`MAX_SEGMENT_LEN`] bytes are rejected up front
//! instead of failing later as an I/O error.

use serde::{Deserialize, Serialize};

use super::errors::{StorageError, StorageResult};

/// Longest file name most filesystems accept, in bytes
pub const MAX_SEGMENT_LEN: usize = 255;

/// How ids are turned into file and directory names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdEncoding {
    #[default]
    Sanitize,
    Hex,
}

impl IdEncoding {
    /// Map an id to a path segment.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidId`] for an empty id, which would
    /// otherwise address the parent directory, and for an id whose segment
    /// exceeds [`MAX_SEGMENT_LEN`].
    pub fn encode(&self, id: &str) -> StorageResult<String> {
        if id.is_empty() {
            return Err(StorageError::InvalidId("id must not be empty".into()));
        }

        let segment = match self {
            IdEncoding::Sanitize => sanitize(id),
            IdEncoding::Hex => hex::encode(id.as_bytes()),
        };

        if segment.len() > MAX_SEGMENT_LEN {
            return Err(StorageError::InvalidId(format!(
                "id encodes to {} bytes, limit is {}",
                segment.len(),
                MAX_SEGMENT_LEN
            )));
        }
        Ok(segment)
    }

    /// Map a path segment back to an id.
    ///
    /// `None` when the segment was not produced by this encoding.
    pub fn decode(&self, segment: &str) -> Option<String> {
        match self {
            IdEncoding::Sanitize => Some(segment.to_string()),
            IdEncoding::Hex => {
                let bytes = hex::decode(segment).ok()?;
                String::from_utf8(bytes).ok()
            }
        }
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`
pub fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
