//! Record transforms for the supported dataset shapes
//!
//! Each transform decides which fields of a record go through the adapter and
//! where the results land. Fields are processed one after another within a
//! record; concurrency happens across records.

mod fields;
mod instances;
mod response;

pub use fields::FieldsTranslation;
pub use instances::InstancesTranslation;
pub use response::ResponseFill;

use crate::core::types::{Record, RecordId};
use crate::utils::error::{BatchError, Result};
use serde_json::Value;

fn invalid(record: &Record, message: impl std::fmt::Display) -> BatchError {
    match RecordId::of(record) {
        Some(id) => BatchError::InvalidRecord(format!("id={}: {}", id, message)),
        None => BatchError::InvalidRecord(message.to_string()),
    }
}

/// A string field that must be present
fn required_str(record: &Record, field: &str) -> Result<String> {
    match record.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(invalid(record, format!("field \"{}\" is not a string", field))),
        None => Err(invalid(record, format!("missing field \"{}\"", field))),
    }
}

/// A string field that may be absent or null
fn optional_str(record: &Record, field: &str) -> Result<Option<String>> {
    match record.get(field) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(invalid(record, format!("field \"{}\" is not a string", field))),
    }
}
