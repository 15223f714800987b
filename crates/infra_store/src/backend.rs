//! Key-value medium abstraction and backend selection

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::error::StoreError;
use crate::file::JsonFileStore;
use crate::memory::MemoryStore;

/// A string-to-string map with synchronous, idempotent operations
///
/// `get` cannot fail: a medium that cannot produce a value reports it as
/// absent. Writes report failures so callers can stop before moving on.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes a key; removing an absent key succeeds
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Short name used in logs and health reports
    fn backend_name(&self) -> &'static str;

    /// Checks that the medium can accept writes
    fn check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn check(&self) -> Result<(), StoreError> {
        (**self).check()
    }
}

/// Which medium backs the draft store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-lifetime map; lost on restart
    #[default]
    Memory,
    /// JSON object on disk, rewritten on every change
    JsonFile(PathBuf),
}

impl StoreBackend {
    /// Selects the backend from a configured path; empty means in-memory
    pub fn from_path(path: &str) -> Self {
        let path = path.trim();
        if path.is_empty() {
            StoreBackend::Memory
        } else {
            StoreBackend::JsonFile(PathBuf::from(path))
        }
    }
}

/// Opens the configured medium
///
/// # Errors
///
/// Returns `StoreError::Configuration` if the file path names a directory,
/// and `StoreError::Io` if an existing file cannot be read.
pub fn open_store(backend: &StoreBackend) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    match backend {
        StoreBackend::Memory => {
            info!("Opening in-memory draft store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::JsonFile(path) => {
            if path.is_dir() {
                return Err(StoreError::Configuration(format!(
                    "{} is a directory",
                    path.display()
                )));
            }
            info!(path = %path.display(), "Opening file-backed draft store");
            Ok(Arc::new(JsonFileStore::open(path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_path() {
        assert_eq!(StoreBackend::from_path(""), StoreBackend::Memory);
        assert_eq!(StoreBackend::from_path("  "), StoreBackend::Memory);
        assert_eq!(
            StoreBackend::from_path("data/wizard.json"),
            StoreBackend::JsonFile(PathBuf::from("data/wizard.json"))
        );
    }

    #[test]
    fn test_default_backend_is_memory() {
        assert_eq!(StoreBackend::default(), StoreBackend::Memory);
        assert_eq!(StoreBackend::default(), StoreBackend::from_path(""));
    }

    #[test]
    fn test_open_memory() {
        let store = open_store(&StoreBackend::Memory).unwrap();
        assert_eq!(store.backend_name(), "memory");
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_directory_path_rejected() {
        let dir = std::env::temp_dir();
        let result = open_store(&StoreBackend::JsonFile(dir));
        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }
}
