//! String-keyed persistence port
//!
//! Both the rate cache and the preference store persist serialized text under
//! a logical key. This module defines that port as a trait so the stores are
//! testable without touching the filesystem, plus two implementations:
//! `FileStorage` (one file per key in an XDG-compliant data directory) for
//! production and `MemoryStorage` for tests.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;

/// Port for string-keyed persisted storage
///
/// Reads are best-effort: a missing or unreadable entry is `None`, never an
/// error. Writes may fail with io errors, which callers are free to ignore
/// (persistence is advisory for this application).
pub trait Storage {
    /// Reads the value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, overwriting any prior value
    fn set(&self, key: &str, value: &str) -> std::io::Result<()>;

    /// Removes the entry under `key`, if present
    fn remove(&self, key: &str) -> std::io::Result<()>;
}

/// File-backed storage, one file per key
///
/// Uses `~/.local/share/cambio/` on Linux, or the equivalent XDG path on
/// other platforms. Keys map to `<key>.json` files.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a FileStorage rooted at the XDG data directory
    ///
    /// Returns `None` if the directory cannot be determined (e.g., no home
    /// directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "cambio")?;
        Some(Self {
            dir: project_dirs.data_dir().to_path_buf(),
        })
    }

    /// Creates a FileStorage rooted at a custom directory
    ///
    /// Useful for testing or when a specific location is needed.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> std::io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-memory storage for tests
///
/// Interior mutability keeps the `Storage` methods `&self` like the file
/// implementation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty MemoryStorage
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> std::io::Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
