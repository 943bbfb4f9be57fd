//! Local persistent key-value storage
//!
//! Plays the role browser local storage plays for the web client: a small
//! string map that survives restarts. Values are JSON documents.
use std::{
    collections::BTreeMap,
    fmt::Display,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Interaction log not yet sent with a batch fetch
    Interactions,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Interactions => write!(f, "userInteractions"),
        }
    }
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &StorageKey) -> AppResult<Option<String>>;

    fn set(&self, key: &StorageKey, value: String) -> AppResult<()>;
}

/// Reads and deserializes a value; `None` when the key was never written
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &StorageKey,
) -> AppResult<Option<T>> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &StorageKey,
    value: &T,
) -> AppResult<()> {
    store.set(key, serde_json::to_string(value)?)
}

/// Process-local store, used when nothing should outlive the session
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &StorageKey) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(entries.get(&key.to_string()).cloned())
    }

    fn set(&self, key: &StorageKey, value: String) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk, rewritten on every `set`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store, starting empty if the file does not exist yet.
    ///
    /// A file that cannot be parsed is discarded with a warning.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable local storage");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Local storage opened");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &StorageKey) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(entries.get(&key.to_string()).cloned())
    }

    fn set(&self, key: &StorageKey, value: String) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        entries.insert(key.to_string(), value);
        self.flush(&entries)
    }
}
