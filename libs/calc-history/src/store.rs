//! JSON history log
//!
//! The log is a single JSON array. Appends rewrite the whole array into a
//! temporary file next to the target and rename it into place, so readers
//! never observe a half-written file. There is no cross-process locking:
//! two processes appending at once race, and the last rename wins.

use crate::record::CalculationRecord;
use errors::{HistoryError, HistoryResult};
use serde_json::Value as JsonValue;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// History log stored at a fixed path
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file and its directory if needed
    ///
    /// An unreadable or malformed file is discarded and replaced. A well-formed
    /// file whose top level is not an array is left untouched and reported.
    pub fn append(&self, record: &CalculationRecord) -> HistoryResult<()> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(&dir).map_err(|e| HistoryError::io(&dir, e))?;

        let mut entries = self.load_for_append()?;
        entries.push(serde_json::to_value(record)?);

        let mut tmp = tempfile::Builder::new()
            .prefix("history_")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(|e| HistoryError::io(&dir, e))?;
        serde_json::to_writer_pretty(&mut tmp, &entries)?;
        tmp.flush().map_err(|e| HistoryError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| HistoryError::io(tmp.path(), e))?;

        // Atomic rename
        tmp.persist(&self.path)
            .map_err(|e| HistoryError::io(&self.path, e.error))?;

        debug!(
            "Appended record {} to {:?} ({} entries)",
            record.id(),
            self.path,
            entries.len()
        );
        Ok(())
    }

    /// Read every record in append order
    ///
    /// A missing file is an empty history.
    pub fn read(&self) -> HistoryResult<Vec<CalculationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| HistoryError::io(&self.path, e))?;
        let value: JsonValue = serde_json::from_str(&content).map_err(|e| self.json_error(e))?;
        if !value.is_array() {
            return Err(HistoryError::NotAnArray {
                path: self.path.clone(),
            });
        }

        let records: Vec<CalculationRecord> =
            serde_json::from_value(value).map_err(|e| self.json_error(e))?;
        debug!("Loaded {} records from {:?}", records.len(), self.path);
        Ok(records)
    }

    /// The last `limit` records, oldest first
    pub fn tail(&self, limit: usize) -> HistoryResult<Vec<CalculationRecord>> {
        let mut records = self.read()?;
        let skip = records.len().saturating_sub(limit);
        Ok(records.split_off(skip))
    }

    /// Existing entries as raw JSON, so entries are carried over verbatim
    fn load_for_append(&self) -> HistoryResult<Vec<JsonValue>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                warn!("History file {:?} unreadable, starting fresh: {}", self.path, e);
                return Ok(Vec::new());
            },
        };

        match serde_json::from_str::<JsonValue>(&content) {
            Ok(JsonValue::Array(entries)) => Ok(entries),
            Ok(_) => Err(HistoryError::NotAnArray {
                path: self.path.clone(),
            }),
            Err(e) => {
                warn!("History file {:?} is not valid JSON, starting fresh: {}", self.path, e);
                Ok(Vec::new())
            },
        }
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn json_error(&self, source: serde_json::Error) -> HistoryError {
        HistoryError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

/// Append a record to the history file at `path`
pub fn append_record(record: &CalculationRecord, path: impl AsRef<Path>) -> HistoryResult<()> {
    HistoryStore::new(path.as_ref()).append(record)
}

/// Read all records from the history file at `path`
pub fn read_history(path: impl AsRef<Path>) -> HistoryResult<Vec<CalculationRecord>> {
    HistoryStore::new(path.as_ref()).read()
}
