//! Content hashing for records
//!
//! A record's digest is SHA-256 over a canonical encoding of its content,
//! rendered as standard base64 so it can be stored as an ordinary string
//! field.
//!
//! Canonicalization happens first ([`make_hashable`]):
//! - arrays become tuples, order preserved
//! - maps become tuples of `(key, value)` pairs sorted by key
//! - sets become tuples sorted by element
//! - scalars pass through
//!
//! Two values that differ only in map insertion order or set element order
//! therefore hash identically, and the digest is stable across processes.
//! The same elements held in an array or a set hash the same once the set
//! is sorted into array order.

use std::cmp::Ordering;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

use crate::record::{Record, Value};

/// Fully ordered, canonical form of a [`Value`].
#[derive(Debug, Clone)]
pub enum Hashable {
    Nil,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Binary(Vec<u8>),
    Tuple(Vec<Hashable>),
}

impl Hashable {
    fn rank(&self) -> u8 {
        match self {
            Hashable::Nil => 0,
            Hashable::Bool(_) => 1,
            Hashable::Integer(_) => 2,
            Hashable::Float(_) => 3,
            Hashable::String(_) => 4,
            Hashable::Binary(_) => 5,
            Hashable::Tuple(_) => 6,
        }
    }

    /// Feeds the canonical byte encoding into `hasher`.
    ///
    /// Each node is a one-byte tag followed by a fixed-width or
    /// length-prefixed payload, so distinct trees never share an encoding.
    fn feed<D: Digest>(&self, hasher: &mut D) {
        hasher.update([self.rank()]);
        match self {
            Hashable::Nil => {}
            Hashable::Bool(b) => hasher.update([u8::from(*b)]),
            Hashable::Integer(i) => hasher.update(i.to_be_bytes()),
            Hashable::Float(f) => hasher.update(f.to_bits().to_be_bytes()),
            Hashable::String(s) => {
                hasher.update((s.len() as u64).to_be_bytes());
                hasher.update(s.as_bytes());
            }
            Hashable::Binary(b) => {
                hasher.update((b.len() as u64).to_be_bytes());
                hasher.update(b);
            }
            Hashable::Tuple(items) => {
                hasher.update((items.len() as u64).to_be_bytes());
                for item in items {
                    item.feed(hasher);
                }
            }
        }
    }
}

impl Ord for Hashable {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Hashable::Nil, Hashable::Nil) => Ordering::Equal,
            (Hashable::Bool(a), Hashable::Bool(b)) => a.cmp(b),
            (Hashable::Integer(a), Hashable::Integer(b)) => a.cmp(b),
            (Hashable::Float(a), Hashable::Float(b)) => a.total_cmp(b),
            (Hashable::String(a), Hashable::String(b)) => a.cmp(b),
            (Hashable::Binary(a), Hashable::Binary(b)) => a.cmp(b),
            (Hashable::Tuple(a), Hashable::Tuple(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Hashable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Hashable {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Hashable {}

/// Recursively converts `value` into its canonical form.
pub fn make_hashable(value: &Value) -> Hashable {
    match value {
        Value::Nil => Hashable::Nil,
        Value::Bool(b) => Hashable::Bool(*b),
        Value::Integer(i) => Hashable::Integer(*i),
        Value::Float(f) => Hashable::Float(*f),
        Value::String(s) => Hashable::String(s.clone()),
        Value::Binary(b) => Hashable::Binary(b.clone()),
        Value::Array(items) => Hashable::Tuple(items.iter().map(make_hashable).collect()),
        Value::Set(items) => {
            let mut sorted: Vec<Hashable> = items.iter().map(make_hashable).collect();
            sorted.sort();
            Hashable::Tuple(sorted)
        }
        Value::Map(m) => pairs(m.iter()),
    }
}

fn pairs<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>) -> Hashable {
    let mut pairs: Vec<(&String, Hashable)> = entries.map(|(k, v)| (k, make_hashable(v))).collect();
    pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
    Hashable::Tuple(
        pairs
            .into_iter()
            .map(|(k, v)| Hashable::Tuple(vec![Hashable::String(k.clone()), v]))
            .collect(),
    )
}

/// SHA-256 digest of `value`'s canonical form, base64 encoded.
pub fn make_hash_sha256(value: &Value) -> String {
    let mut hasher = Sha256::new();
    make_hashable(value).feed(&mut hasher);
    STANDARD.encode(hasher.finalize())
}

/// Digest of a whole record; equal to hashing it as a [`Value::Map`].
pub fn hash_record(record: &Record) -> String {
    let mut hasher = Sha256::new();
    pairs(record.iter()).feed(&mut hasher);
    STANDARD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn ints(xs: &[i64]) -> Vec<Value> {
        xs.iter().map(|x| Value::Integer(*x)).collect()
    }

    fn tuple_ints(xs: &[i64]) -> Hashable {
        Hashable::Tuple(xs.iter().map(|x| Hashable::Integer(*x)).collect())
    }

    fn pair(k: &str, v: Hashable) -> Hashable {
        Hashable::Tuple(vec![Hashable::String(k.to_string()), v])
    }

    fn map(entries: &[(&str, Value)]) -> Value {
        Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn samples() -> Vec<Value> {
        vec![
            Value::Integer(1),
            Value::Float(1.0),
            Value::from("hello world"),
            Value::Binary(b"test".to_vec()),
            Value::Array(vec![]),
            Value::Set(vec![]),
            Value::Map(BTreeMap::new()),
        ]
    }

    #[test]
    fn test_digest_is_base64() {
        for value in samples() {
            let digest = make_hash_sha256(&value);
            let raw = STANDARD.decode(&digest).unwrap();
            assert_eq!(raw.len(), 32);
            assert_eq!(STANDARD.encode(raw), digest);
        }
    }

    #[test]
    fn test_same_input_same_output() {
        for value in samples() {
            assert_eq!(make_hash_sha256(&value), make_hash_sha256(&value.clone()));
        }
    }

    #[test]
    fn test_map_order_agnostic() {
        let mut d1 = Record::new();
        d1.insert("a".into(), Value::Integer(1));
        d1.insert("b".into(), Value::Integer(2));
        let mut d2 = Record::new();
        d2.insert("b".into(), Value::Integer(2));
        d2.insert("a".into(), Value::Integer(1));

        assert_eq!(hash_record(&d1), hash_record(&d2));
        assert_eq!(hash_record(&d1), make_hash_sha256(&Value::Map(d1.clone())));
    }

    #[test]
    fn test_array_order_sensitive() {
        let forward = Value::Array(ints(&[1, 2, 3]));
        let backward = Value::Array(ints(&[3, 2, 1]));
        assert_ne!(make_hash_sha256(&forward), make_hash_sha256(&backward));
    }

    #[test]
    fn test_set_order_agnostic() {
        let a = Value::Set(ints(&[3, 1, 2]));
        let b = Value::Set(ints(&[2, 3, 1]));
        assert_eq!(make_hash_sha256(&a), make_hash_sha256(&b));
    }

    #[test]
    fn test_distinct_values_distinct_digests() {
        assert_ne!(
            make_hash_sha256(&Value::Integer(1)),
            make_hash_sha256(&Value::Float(1.0))
        );
        assert_ne!(
            make_hash_sha256(&Value::from("test")),
            make_hash_sha256(&Value::Binary(b"test".to_vec()))
        );
        assert_ne!(
            make_hash_sha256(&Value::Array(vec![Value::from("ab")])),
            make_hash_sha256(&Value::Array(vec![Value::from("a"), Value::from("b")]))
        );
    }

    #[test]
    fn test_hashable_array() {
        assert_eq!(make_hashable(&Value::Array(ints(&[1, 2, 3]))), tuple_ints(&[1, 2, 3]));
    }

    #[test]
    fn test_hashable_map_sorted() {
        let value = map(&[
            ("c", Value::Integer(3)),
            ("b", Value::Integer(2)),
            ("a", Value::Integer(1)),
        ]);
        assert_eq!(
            make_hashable(&value),
            Hashable::Tuple(vec![
                pair("a", Hashable::Integer(1)),
                pair("b", Hashable::Integer(2)),
                pair("c", Hashable::Integer(3)),
            ])
        );
    }

    #[test]
    fn test_hashable_set_sorted() {
        assert_eq!(make_hashable(&Value::Set(ints(&[3, 2, 1]))), tuple_ints(&[1, 2, 3]));
    }

    #[test]
    fn test_hashable_scalars_unchanged() {
        assert_eq!(make_hashable(&Value::Integer(1)), Hashable::Integer(1));
        assert_eq!(make_hashable(&Value::Float(1.0)), Hashable::Float(1.0));
        assert_eq!(
            make_hashable(&Value::from("hello world")),
            Hashable::String("hello world".into())
        );
        assert_eq!(
            make_hashable(&Value::Binary(b"test".to_vec())),
            Hashable::Binary(b"test".to_vec())
        );
    }

    #[test]
    fn test_hashable_recursive() {
        let words = |ws: &[&str]| ws.iter().map(|w| Value::from(*w)).collect::<Vec<_>>();
        let value = map(&[
            ("a", Value::Array(ints(&[1, 2, 3]))),
            ("b", Value::Set(ints(&[3, 2, 1]))),
            (
                "c",
                map(&[
                    ("a", Value::Integer(1)),
                    ("b", Value::Integer(2)),
                    ("c", Value::Set(words(&["zyx", "wvu", "tsr"]))),
                ]),
            ),
        ]);

        let strings = |ws: &[&str]| {
            Hashable::Tuple(ws.iter().map(|w| Hashable::String(w.to_string())).collect())
        };
        assert_eq!(
            make_hashable(&value),
            Hashable::Tuple(vec![
                pair("a", tuple_ints(&[1, 2, 3])),
                pair("b", tuple_ints(&[1, 2, 3])),
                pair(
                    "c",
                    Hashable::Tuple(vec![
                        pair("a", Hashable::Integer(1)),
                        pair("b", Hashable::Integer(2)),
                        pair("c", strings(&["tsr", "wvu", "zyx"])),
                    ])
                ),
            ])
        );
    }
}
