//! The single persisted last-visit record.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Where the previous visit came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// City name.
    pub city: String,
    /// Country name.
    pub country: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// Key-value persistence for the visit record.
pub trait VisitStore {
    /// Read the raw value under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, SceneError>;
    /// Overwrite the raw value under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), SceneError>;
}

/// In-process store, for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl VisitStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, SceneError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SceneError> {
        let _ = self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store files under `dir`; the directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl VisitStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, SceneError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SceneError::Io(e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SceneError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// Reads and writes the record under a fixed key.
#[derive(Debug, Clone)]
pub struct VisitLog {
    key: String,
}

impl VisitLog {
    /// Log stored under `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Previous visit, if one was stored. Unreadable or malformed records
    /// are logged and treated as absent.
    pub fn load(&self, store: &dyn VisitStore) -> Option<VisitRecord> {
        let raw = match store.read(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("could not read last visit: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("discarding malformed last visit: {e}");
                None
            }
        }
    }

    /// Overwrite the stored record.
    pub fn save(
        &self,
        store: &mut dyn VisitStore,
        record: &VisitRecord,
    ) -> Result<(), SceneError> {
        let json = serde_json::to_string(record)
            .map_err(|e| SceneError::Storage(e.to_string()))?;
        store.write(&self.key, &json)
    }
}
