use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;
use tokio::sync::RwLock;
use tracing::{error, info};

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

/// A stored labeled coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: i64,
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    pub timestamp: String,
}

/// A validated location that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}

/// Storage failure while rewriting the backing file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to serialize locations: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

struct StoreInner {
    records: Vec<LocationRecord>,
    next_id: i64,
}

/// Repository owning the in-memory location list and its backing file.
///
/// Reads take the read lock; mutations take the write lock for the whole
/// stage-write-commit sequence, so concurrent calls cannot interleave and
/// the id counter never hands out duplicates. A mutation stages the new
/// list, rewrites the file, and only swaps the staged list into the
/// visible state once the write succeeded; a failed write leaves both the
/// list and the file as they were.
pub struct LocationStore {
    path: PathBuf,
    inner: RwLock<StoreInner>,
}

impl LocationStore {
    /// Open the store, reading the backing file if it exists.
    ///
    /// A missing file starts the store empty without creating the file.
    /// An unreadable or unparsable file is logged and also starts the
    /// store empty; startup never aborts on bad data.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<LocationRecord>>(&raw) {
                Ok(records) => {
                    info!(count = records.len(), path = %path.display(), "Loaded locations");
                    records
                }
                Err(err) => {
                    error!(path = %path.display(), %err, "Failed to parse locations file, starting empty");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                error!(path = %path.display(), %err, "Failed to read locations file, starting empty");
                Vec::new()
            }
        };

        // Ids keep ascending across restarts, including files produced by
        // older deployments that used millisecond timestamps as ids.
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;

        Self {
            path,
            inner: RwLock::new(StoreInner { records, next_id }),
        }
    }

    /// Current list, in insertion order.
    pub async fn list(&self) -> Vec<LocationRecord> {
        self.inner.read().await.records.clone()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Append a new record, rewriting the backing file before the record
    /// becomes visible. Returns the created record.
    pub async fn append(&self, new: NewLocation) -> Result<LocationRecord, StoreError> {
        let mut inner = self.inner.write().await;

        let record = LocationRecord {
            id: inner.next_id,
            label: new.label,
            lat: new.lat,
            lng: new.lng,
            timestamp: format_timestamp(OffsetDateTime::now_utc()),
        };

        let mut staged = inner.records.clone();
        staged.push(record.clone());
        self.persist(&staged)?;

        inner.records = staged;
        inner.next_id += 1;
        Ok(record)
    }

    /// Remove the record with the given id, rewriting the backing file
    /// before the removal becomes visible. Returns the removed record, or
    /// `None` if no record matches.
    pub async fn remove(&self, id: i64) -> Result<Option<LocationRecord>, StoreError> {
        let mut inner = self.inner.write().await;

        let Some(index) = inner.records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };

        let mut staged = inner.records.clone();
        let removed = staged.remove(index);
        self.persist(&staged)?;

        inner.records = staged;
        Ok(Some(removed))
    }

    /// Full-file rewrite, pretty-printed.
    fn persist(&self, records: &[LocationRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| at.to_string())
}
