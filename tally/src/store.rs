//! Persistence boundary
//!
//! The notepad only needs a key-value store holding the document text.

use crate::error::{NotepadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value store for the document text
pub trait Store {
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store kept in memory for the life of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

const STORE_VERSION: u32 = 1;

/// On-disk layout of a `JsonFileStore`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Store backed by a JSON file
///
/// The whole file is read and rewritten on every save. A missing file reads
/// as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile {
                version: STORE_VERSION,
                entries: BTreeMap::new(),
            });
        }

        let text = fs::read_to_string(&self.path)?;
        let file: StoreFile = serde_json::from_str(&text)?;
        if file.version != STORE_VERSION {
            return Err(NotepadError::UnsupportedVersion {
                path: self.path.clone(),
                found: file.version,
            });
        }
        Ok(file)
    }
}

impl Store for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.entries.remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let mut file = self.read()?;
        file.entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        tracing::trace!(path = %self.path.display(), key, "saved document");
        Ok(())
    }
}
