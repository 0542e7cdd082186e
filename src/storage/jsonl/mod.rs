//! JSONL record store
//!
//! One JSON object per line, UTF-8, non-ASCII text written as-is. Blank lines
//! are ignored on read.

mod append;


pub use append::AppendWriter;

use crate::core::types::{ID_FIELD, Record, RecordId};
use crate::utils::error::{BatchError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Read every record of a dataset file, in file order
pub async fn read_all(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let content = read_text(path).await?;

    let mut records = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(path, line_no + 1, line)?);
    }

    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Replace `path` with `records`, one line each, in the given order
pub async fn write_all(path: impl AsRef<Path>, records: &[Record]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path).await?;

    let mut buffer = String::new();
    for record in records {
        buffer.push_str(&serialize_line(record)?);
    }

    let mut file = fs::File::create(path)
        .await
        .map_err(|e| BatchError::output(path, format!("Failed to create file: {}", e)))?;
    file.write_all(buffer.as_bytes())
        .await
        .map_err(|e| BatchError::output(path, format!("Failed to write file: {}", e)))?;
    file.sync_all()
        .await
        .map_err(|e| BatchError::output(path, format!("Failed to sync file: {}", e)))?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Collect the identifiers of every record already present in `path`.
///
/// A missing file yields an empty set. Every line must carry an `id`.
pub async fn read_ids(path: impl AsRef<Path>) -> Result<HashSet<RecordId>> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(e) => {
            return Err(BatchError::dataset(
                path,
                format!("Failed to read file: {}", e),
            ));
        }
    };

    let mut ids = HashSet::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = parse_line(path, line_no + 1, line)?;
        let id = RecordId::of(&record).ok_or_else(|| {
            BatchError::dataset(
                path,
                format!("line {}: record has no '{}' field", line_no + 1, ID_FIELD),
            )
        })?;
        ids.insert(id);
    }
    Ok(ids)
}

pub(crate) fn serialize_line(record: &Record) -> Result<String> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    Ok(line)
}

pub(crate) async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(|e| {
                BatchError::output(path, format!("Failed to create directory: {}", e))
            })?;
        }
    }
    Ok(())
}

async fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => BatchError::dataset(path, "file not found"),
        _ => BatchError::dataset(path, format!("Failed to read file: {}", e)),
    })
}

fn parse_line(path: &Path, line_no: usize, line: &str) -> Result<Record> {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(BatchError::dataset(
            path,
            format!("line {}: expected a JSON object, got {}", line_no, kind_of(&other)),
        )),
        Err(e) => Err(BatchError::dataset(path, format!("line {}: {}", line_no, e))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
