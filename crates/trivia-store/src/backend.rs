//! String key-value backends, modelled on browser local storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub trait KeyValueBackend {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process backend. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// All keys live in one JSON object on disk. The file is re-read on every
/// access and rewritten whole on every change.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Could not read store {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };

        if contents.trim().is_empty() {
            return BTreeMap::new();
        }

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(
                "Store {} is corrupt, starting from an empty store: {}",
                self.path.display(),
                e
            );
            BTreeMap::new()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| Error::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::io(&self.path, e))?;

        Ok(())
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_entries();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_backend() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.get("k"), None);

        backend.set("k", "v".to_string()).unwrap();
        assert_eq!(backend.get("k"), Some("v".to_string()));

        backend.remove("k").unwrap();
        assert_eq!(backend.get("k"), None);
    }

    #[test]
    fn test_file_backend_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("store.json"));

        assert_eq!(backend.get("scores"), None);
    }

    #[test]
    fn test_file_backend_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut first = FileBackend::new(&path);
        first.set("scoreSort", "highest".to_string()).unwrap();
        first.set("triviaCurrentUser", "Alice".to_string()).unwrap();

        let second = FileBackend::new(&path);
        assert_eq!(second.get("scoreSort"), Some("highest".to_string()));
        assert_eq!(second.get("triviaCurrentUser"), Some("Alice".to_string()));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_file_backend_remove_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("store.json"));
        backend.set("a", "1".to_string()).unwrap();
        backend.set("b", "2".to_string()).unwrap();

        backend.remove("a").unwrap();
        backend.remove("missing").unwrap();

        assert_eq!(backend.get("a"), None);
        assert_eq!(backend.get("b"), Some("2".to_string()));
    }

    #[test]
    fn test_file_backend_corrupt_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let mut backend = FileBackend::new(&path);
        assert_eq!(backend.get("scores"), None);

        // The next write replaces the corrupt file.
        backend.set("scoreSort", "oldest".to_string()).unwrap();
        assert_eq!(backend.get("scoreSort"), Some("oldest".to_string()));
    }
}
