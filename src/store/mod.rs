//! Record store — named JSON collections in a local data directory.
//!
//! The persistence model mirrors a browser's local storage: three
//! independent string-keyed entries (`patients`, `appointments`,
//! `session`), each one JSON document, rewritten whole on every
//! mutation. Reads fail safe: a missing, unreadable, or corrupt entry
//! is treated as empty rather than surfacing an error.

pub mod records;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

/// Handle to a data directory holding the persisted entries.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Open the store at the default records directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(crate::config::records_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read a whole collection entry. Missing, unreadable, or corrupt
    /// entries read as empty.
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(key, error = %e, "Corrupt collection entry, reading as empty");
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!(key, error = %e, "Unreadable collection entry, reading as empty");
                Vec::new()
            }
        }
    }

    /// Read a single-object entry. Missing or corrupt entries read as absent.
    pub fn read_entry<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.entry_path(key);
        if !path.exists() {
            return None;
        }
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(key, error = %e, "Unreadable entry, reading as absent");
                return None;
            }
        };
        match serde_json::from_str(&data) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Corrupt entry, reading as absent");
                None
            }
        }
    }

    /// Serialize `value` into its entry, replacing the previous contents.
    pub fn write_entry<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let data = serde_json::to_string(value)?;
        fs::write(self.entry_path(key), data)?;
        Ok(())
    }

    /// Remove an entry. Idempotent: removing an absent entry succeeds.
    pub fn remove_entry(&self, key: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
