//! Record file codec
//!
//! Records are written as a single MessagePack map. Strings, integers,
//! floats, booleans, nil, binary blobs, arrays and nested maps keep their
//! MessagePack types, so any MessagePack reader can decode a record file
//! without a schema.

use super::errors::{StorageError, StorageResult};
use crate::record::Record;

/// Encode a record to MessagePack bytes
pub fn encode_record(record: &Record) -> StorageResult<Vec<u8>> {
    rmp_serde::to_vec(record).map_err(|e| StorageError::EncodeError(e.to_string()))
}

/// Decode a record from MessagePack bytes
///
/// # Errors
///
/// Returns [`StorageError::DecodeError`] if the bytes are not a MessagePack
/// map with string keys.
pub fn decode_record(bytes: &[u8]) -> StorageResult<Record> {
    rmp_serde::from_slice(bytes).map_err(|e| StorageError::DecodeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_record;
    use crate::record::Value;
    use std::collections::BTreeMap;

    fn sample() -> Record {
        let mut inner = BTreeMap::new();
        inner.insert("room".to_string(), Value::from("BA1130"));
        inner.insert("capacity".to_string(), Value::Integer(120));

        let mut record = Record::new();
        record.insert("code".into(), Value::from("CSC108H1"));
        record.insert("credits".into(), Value::Float(0.5));
        record.insert("active".into(), Value::Bool(true));
        record.insert("missing".into(), Value::Nil);
        record.insert("blob".into(), Value::Binary(vec![0, 159, 146, 150]));
        record.insert("negative".into(), Value::Integer(-7));
        record.insert(
            "sections".into(),
            Value::Array(vec![Value::from("LEC0101"), Value::from("TUT0201")]),
        );
        record.insert("location".into(), Value::Map(inner));
        record
    }

    #[test]
    fn test_decode_reproduces_record() {
        let record = sample();
        let bytes = encode_record(&record).unwrap();
        assert_eq!(decode_record(&bytes).unwrap(), record);
    }

    #[test]
    fn test_binary_written_as_bin() {
        let mut record = Record::new();
        record.insert("b".into(), Value::Binary(vec![1, 2, 3]));
        let bytes = encode_record(&record).unwrap();

        // fixmap(1), fixstr "b", bin8 len 3
        assert_eq!(bytes, vec![0x81, 0xa1, b'b', 0xc4, 0x03, 1, 2, 3]);
    }

    #[test]
    fn test_set_decodes_as_array() {
        let mut record = Record::new();
        record.insert("s".into(), Value::Set(vec![Value::Integer(1)]));
        let decoded = decode_record(&encode_record(&record).unwrap()).unwrap();
        assert_eq!(decoded["s"], Value::Array(vec![Value::Integer(1)]));
    }

    #[test]
    fn test_set_written_in_hash_order() {
        let mut record = Record::new();
        record.insert(
            "s".into(),
            Value::Set(vec![Value::from("b"), Value::Integer(3), Value::from("a")]),
        );
        let decoded = decode_record(&encode_record(&record).unwrap()).unwrap();

        assert_eq!(
            decoded["s"],
            Value::Array(vec![Value::Integer(3), Value::from("a"), Value::from("b")])
        );
        assert_eq!(hash_record(&decoded), hash_record(&record));
    }

    #[test]
    fn test_corrupt_bytes_rejected() {
        assert!(matches!(
            decode_record(&[0xc1]),
            Err(StorageError::DecodeError(_))
        ));
        // An array is not a record
        assert!(decode_record(&[0x91, 0x01]).is_err());
    }
}
