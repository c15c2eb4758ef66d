//! Record store adapter
//!
//! The engine consumes records through this narrow CRUD contract and owns
//! no persistence itself. `StoreError` is the only error kind callers must
//! handle; it is translated into a status-bar notification at the call
//! site, never retried automatically, and never crashes the engine.

pub mod json_file;

pub use json_file::JsonFileStore;

use crate::model::Record;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store data is malformed: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("record not found: {0}")]
    NotFound(String),
}

/// CRUD contract supplied by the external store
pub trait RecordStore {
    /// Deliver the full collection; the caller replaces its working set
    /// wholesale rather than patching it incrementally.
    fn fetch_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Insert when the record has no id yet, update in place otherwise.
    /// Returns the canonical persisted record (store-assigned id on insert).
    fn upsert(&mut self, record: Record) -> Result<Record, StoreError>;

    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}
