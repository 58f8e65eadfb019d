//! Persistent client-side key-value storage.
//!
//! The admin page keeps exactly one value here: the login token under
//! [`TOKEN_KEY`](crate::constants::storage::TOKEN_KEY). The file store
//! survives restarts; the memory store backs tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::storage;
use crate::error::{Error, Result};

/// Minimal string key-value storage.
pub trait KeyValueStore: Send {
    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// The stored admin token, if any.
    fn token(&self) -> Option<String> {
        self.get(storage::TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Store the admin token.
    fn store_token(&mut self, token: &str) -> Result<()> {
        self.set(storage::TOKEN_KEY, token)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageData {
    #[serde(flatten)]
    entries: BTreeMap<String, String>,
}

/// JSON-file backed store, written through on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: StorageData,
}

impl FileStore {
    /// Open the store file inside `dir`.
    ///
    /// A missing file is an empty store. A corrupt file is logged and
    /// treated as empty; it is overwritten on the next write.
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(storage::FILE_NAME);
        let data = match fs_err::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable storage file {}: {}", path.display(), e);
                StorageData::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StorageData::default(),
            Err(e) => return Err(Error::io(e, path)),
        };
        Ok(Self { path, data })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| Error::Msg(format!("Failed to serialize storage: {e}")))?;
        fs_err::write(&self.path, json).map_err(|e| Error::io(e, self.path.clone()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.data.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding an admin token.
    pub fn with_token(token: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(storage::TOKEN_KEY.to_string(), token.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
