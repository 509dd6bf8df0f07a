//! Key-value storage backends
//!
//! Values are JSON strings stored under short keys. `FileStorage` keeps one
//! `<key>.json` file per key; `MemoryStorage` is for hosts without a disk and
//! for tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{PersistenceError, Result};

/// Minimal key-value store for persisted JSON
pub trait Storage {
    /// Stored value for `key`, or None if nothing was saved yet
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a raw value
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Reject all writes (simulates a full or locked store)
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(PersistenceError::storage(format!("cannot write {key}: read only")));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read("k").unwrap(), None);
        storage.write("k", "[1,2]").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_memory_read_only() {
        let mut storage = MemoryStorage::new().with("k", "1").read_only();
        assert!(matches!(
            storage.write("k", "2"),
            Err(PersistenceError::Storage(_))
        ));
        assert_eq!(storage.get("k"), Some("1"));
    }

    #[test]
    fn test_file_storage() {
        let dir = std::env::temp_dir().join(format!("neon_dash_storage_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let mut storage = FileStorage::new(&dir);
        assert_eq!(storage.read("scores").unwrap(), None);

        storage.write("scores", "[]").unwrap();
        storage.write("scores", "[{}]").unwrap();
        assert_eq!(storage.read("scores").unwrap().as_deref(), Some("[{}]"));
        assert!(dir.join("scores.json").exists());
        assert!(!dir.join("scores.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
