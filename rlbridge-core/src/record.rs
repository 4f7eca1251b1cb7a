//! Key-value records attached to environment steps.
use std::collections::hash_map::{HashMap, Iter, Keys};

/// Types of values that can be stored in a [`Record`].
#[derive(Debug, Clone)]
pub enum RecordValue {
    /// A single floating-point value.
    Scalar(f32),
    /// A 1-dimensional array of floating-point values.
    Array1(Vec<f32>),
    /// A text value.
    String(String),
}

/// A container of key-value pairs carried alongside a step.
///
/// Backends use it to surface auxiliary per-step information; wrappers pass
/// it through untouched.
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns the value for the given key, if any.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Returns an iterator over key-value pairs.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Merges the entries of another record into this one.
    pub fn merge(mut self, other: Record) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Whether the record holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
