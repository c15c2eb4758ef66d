//! JSON-file record store
//!
//! Persists the collection as a single JSON document. On first run the
//! file is seeded with a handful of sample records so the UI has
//! something to show.

use super::{RecordStore, StoreError};
use crate::model::{seed_records, Record};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// On-disk document wrapper
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    records: Vec<Record>,
}

/// File-backed implementation of the record store contract
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location under the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".gestao-tui").join("records.json"))
    }

    fn read_document(&self) -> Result<StoreDocument, StoreError> {
        if !self.path.exists() {
            return Ok(StoreDocument {
                records: seed_records(),
            });
        }
        let contents = fs::read_to_string(&self.path)?;
        let document: StoreDocument = serde_json::from_str(&contents)?;
        Ok(document)
    }

    fn write_document(&self, document: &StoreDocument) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.read_document()?.records)
    }

    fn upsert(&mut self, mut record: Record) -> Result<Record, StoreError> {
        let mut document = self.read_document()?;

        match record.id.clone() {
            Some(id) => {
                let slot = document
                    .records
                    .iter_mut()
                    .find(|r| r.id.as_deref() == Some(id.as_str()))
                    .ok_or(StoreError::NotFound(id))?;
                *slot = record.clone();
            }
            None => {
                record.id = Some(Uuid::new_v4().to_string());
                // Newest first
                document.records.insert(0, record.clone());
            }
        }

        self.write_document(&document)?;
        Ok(record)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        let before = document.records.len();
        document.records.retain(|r| r.id.as_deref() != Some(id));
        if document.records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.write_document(&document)
    }
}
