//! Dataset records
//!
//! A record is one JSON object read from a line of a JSONL dataset. The
//! pipeline itself is schema-free; only the `id` field is interpreted, and
//! only when resuming.

use serde_json::{Map, Value};
use std::fmt;

/// Field holding a record's stable identifier
pub const ID_FIELD: &str = "id";

/// One dataset entry
pub type Record = Map<String, Value>;

/// Identifier of a record, compared by its canonical JSON text.
///
/// `1` and `"1"` are different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// Build an identifier from a JSON value
    pub fn from_value(value: &Value) -> Self {
        Self(value.to_string())
    }

    /// Read the identifier of `record`, if it has one
    pub fn of(record: &Record) -> Option<Self> {
        record.get(ID_FIELD).map(Self::from_value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human readable label for log lines: the id, or the position when absent
pub fn record_label(record: &Record, index: usize) -> String {
    match RecordId::of(record) {
        Some(id) => format!("id={}", id),
        None => format!("#{}", index),
    }
}
