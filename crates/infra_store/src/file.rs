//! JSON-file key-value medium
//!
//! The whole map lives in memory and is rewritten to disk on every change,
//! through a sibling temp file and a rename so a crash never leaves a
//! half-written store behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::backend::KeyValueStore;
use crate::error::StoreError;

type Entries = BTreeMap<String, String>;

/// Write-through store persisted as a flat JSON object
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<Entries>,
}

impl JsonFileStore {
    /// Opens the store at `path`
    ///
    /// A missing file starts empty. A file that is not a JSON object of
    /// strings is logged and treated as empty; it is replaced on the next
    /// write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Entries>(&contents) {
                Ok(entries) => entries,
                Err(error) => {
                    warn!(path = %path.display(), error = %error, "store file is corrupt, starting empty");
                    Entries::new()
                }
            },
            Err(error) if error.kind() == ErrorKind::NotFound => Entries::new(),
            Err(error) => return Err(StoreError::io(path, error)),
        };

        debug!(path = %path.display(), keys = entries.len(), "store file opened");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        let temp = self.temp_path();
        fs::write(&temp, contents).map_err(|e| StoreError::io(&temp, e))?;
        fs::rename(&temp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }

    /// Applies `change` to a copy, persists it, then swaps it in
    fn update<F: FnOnce(&mut Entries)>(&self, change: F) -> Result<(), StoreError> {
        let mut entries = self.write();
        let mut next = entries.clone();
        change(&mut next);
        if next == *entries {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn backend_name(&self) -> &'static str {
        "json-file"
    }

    fn check(&self) -> Result<(), StoreError> {
        match fs::metadata(&self.path) {
            Ok(metadata) if metadata.permissions().readonly() => Err(StoreError::io(
                &self.path,
                std::io::Error::new(ErrorKind::PermissionDenied, "store file is read-only"),
            )),
            _ => Ok(()),
        }
    }
}
