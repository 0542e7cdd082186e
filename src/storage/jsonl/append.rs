//! Durable line appends for resumable runs

use super::{ensure_parent_dir, serialize_line};
use crate::core::types::Record;
use crate::utils::error::{BatchError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Append handle on a JSONL output file.
///
/// Each [`append`](Self::append) writes one full line and syncs it to disk
/// before returning, so a crash after N appends leaves exactly N lines.
#[derive(Debug)]
pub struct AppendWriter {
    path: PathBuf,
    file: File,
    written: usize,
}

impl AppendWriter {
    /// Open `path` for appending, creating it if needed.
    ///
    /// A trailing line without a newline is kept and terminated when it parses
    /// as a record, and cut off otherwise, so the file only holds complete
    /// records and previously written ones are never dropped.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        ensure_parent_dir(&path).await?;
        repair_torn_tail(&path).await?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| BatchError::output(&path, format!("Failed to open for append: {}", e)))?;

        debug!("Opened {} for append", path.display());
        Ok(Self {
            path,
            file,
            written: 0,
        })
    }

    /// Append one record as one line
    pub async fn append(&mut self, record: &Record) -> Result<()> {
        let line = serialize_line(record)?;
        self.file
            .write_all(line.as_bytes())
            .await
            .map_err(|e| BatchError::output(&self.path, format!("Failed to append: {}", e)))?;
        self.file
            .sync_data()
            .await
            .map_err(|e| BatchError::output(&self.path, format!("Failed to sync: {}", e)))?;
        self.written += 1;
        Ok(())
    }

    /// Lines appended through this handle
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and close the handle
    pub async fn close(mut self) -> Result<()> {
        self.file
            .flush()
            .await
            .map_err(|e| BatchError::output(&self.path, format!("Failed to flush: {}", e)))?;
        debug!(
            "Closed {} after {} appended lines",
            self.path.display(),
            self.written
        );
        Ok(())
    }
}

async fn repair_torn_tail(path: &Path) -> Result<()> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(BatchError::output(
                path,
                format!("Failed to read existing output: {}", e),
            ));
        }
    };

    if bytes.last().is_none_or(|b| *b == b'\n') {
        return Ok(());
    }

    let keep = bytes
        .iter()
        .rposition(|b| *b == b'\n')
        .map(|pos| pos + 1)
        .unwrap_or(0);

    if is_complete_record(&bytes[keep..]) {
        debug!("Terminating unterminated last line of {}", path.display());
        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .await
            .map_err(|e| BatchError::output(path, format!("Failed to open for repair: {}", e)))?;
        file.write_all(b"\n")
            .await
            .map_err(|e| BatchError::output(path, format!("Failed to terminate line: {}", e)))?;
        return file
            .sync_all()
            .await
            .map_err(|e| BatchError::output(path, format!("Failed to sync: {}", e)));
    }

    warn!(
        "Dropping {} bytes of incomplete trailing line from {}",
        bytes.len() - keep,
        path.display()
    );

    let file = OpenOptions::new()
        .write(true)
        .open(path)
        .await
        .map_err(|e| BatchError::output(path, format!("Failed to open for repair: {}", e)))?;
    file.set_len(keep as u64)
        .await
        .map_err(|e| BatchError::output(path, format!("Failed to truncate: {}", e)))?;
    file.sync_all()
        .await
        .map_err(|e| BatchError::output(path, format!("Failed to sync: {}", e)))?;
    Ok(())
}

fn is_complete_record(tail: &[u8]) -> bool {
    matches!(
        serde_json::from_slice::<serde_json::Value>(tail),
        Ok(serde_json::Value::Object(_))
    )
}
