use super::files::{atomic_write, backup_file, read_optional, remove_file_if_exists};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Errors surfaced by a key-value backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable string key-value storage the store and undo buffer persist into
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Keep a copy of a value that could not be decoded before it is overwritten
    fn backup(&mut self, key: &str) -> Result<(), StoreError> {
        let _ = key;
        Ok(())
    }
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn io_error(key: &str) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        read_optional(path).map_err(io_error(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        atomic_write(path, value).map_err(io_error(key))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        remove_file_if_exists(path).map_err(io_error(key))
    }

    fn backup(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let backup = backup_file(&path).map_err(io_error(key))?;
        info!("Backed up unreadable {} to {}", key, backup.display());
        Ok(())
    }
}

#[cfg(test)]
pub mod memory {
    use super::{KeyValueStore, StoreError};
    use std::collections::HashMap;

    /// In-memory backend for tests
    #[derive(Debug, Default, Clone)]
    pub struct MemoryStore {
        pub values: HashMap<String, String>,
        pub backups: Vec<String>,
        pub fail_writes: bool,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(key: &str, value: &str) -> Self {
            let mut store = Self::default();
            store.values.insert(key.to_string(), value.to_string());
            store
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.values.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            self.values.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.values.remove(key);
            Ok(())
        }

        fn backup(&mut self, key: &str) -> Result<(), StoreError> {
            self.backups.push(key.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_set_get_remove() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        assert_eq!(store.get("taskCheckerData").unwrap(), None);

        store.set("taskCheckerData", "{}").unwrap();
        assert_eq!(store.get("taskCheckerData").unwrap().as_deref(), Some("{}"));
        assert!(temp_dir.path().join("taskCheckerData.json").exists());

        store.remove("taskCheckerData").unwrap();
        assert_eq!(store.get("taskCheckerData").unwrap(), None);
        store.remove("taskCheckerData").unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        assert!(matches!(store.set("../escape", "x"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_file_store_backup_keeps_original() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());
        store.set("taskCheckerData", "garbage").unwrap();

        store.backup("taskCheckerData").unwrap();

        let backups = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".bak."))
            .count();
        assert_eq!(backups, 1);
        assert_eq!(store.get("taskCheckerData").unwrap().as_deref(), Some("garbage"));
    }

    #[test]
    fn test_file_store_write_into_missing_dir_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("missing"));

        assert!(matches!(store.set("taskCheckerUndo", "{}"), Err(StoreError::Io { .. })));
    }
}
