//! Local persistence for the active dataset.
//!
//! A flat key-value store: one JSON file per key on native platforms, a
//! shared in-memory map on wasm. The chat view reads the dataset back
//! through the same store the landing page wrote it to, so the store is a
//! value you pass around rather than a global.

use crate::types::PersistedUpload;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Key the active dataset lives under.
pub const UPLOAD_KEY: &str = "uploadedCSV";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize the record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

enum Backend {
    #[cfg(not(target_arch = "wasm32"))]
    Disk { root: PathBuf },
    Memory(Mutex<HashMap<String, String>>),
}

/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct KvStore {
    backend: Arc<Backend>,
}

impl KvStore {
    /// Store under the platform data directory, or a local `cache/` when
    /// the platform has none.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_default() -> Self {
        let root = dirs::data_local_dir()
            .map(|dir| dir.join("csv-analyzer"))
            .unwrap_or_else(|| PathBuf::from("cache").join("csv-analyzer"));
        Self::open_at(root)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn open_default() -> Self {
        Self::in_memory()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_at(root: impl Into<PathBuf>) -> Self {
        Self {
            backend: Arc::new(Backend::Disk { root: root.into() }),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(Backend::Memory(Mutex::new(HashMap::new()))),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match &*self.backend {
            #[cfg(not(target_arch = "wasm32"))]
            Backend::Disk { root } => fs::read_to_string(Self::file_path(root, key)).ok(),
            Backend::Memory(map) => map.lock().ok()?.get(key).cloned(),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match &*self.backend {
            #[cfg(not(target_arch = "wasm32"))]
            Backend::Disk { root } => {
                fs::create_dir_all(root)?;
                fs::write(Self::file_path(root, key), value)?;
                Ok(())
            }
            Backend::Memory(map) => {
                let mut map = map.lock().map_err(|_| StorageError::Poisoned)?;
                map.insert(key.to_string(), value.to_string());
                Ok(())
            }
        }
    }

    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        match &*self.backend {
            #[cfg(not(target_arch = "wasm32"))]
            Backend::Disk { root } => {
                let path = Self::file_path(root, key);
                if path.exists() {
                    fs::remove_file(path)?;
                }
                Ok(())
            }
            Backend::Memory(map) => {
                map.lock().map_err(|_| StorageError::Poisoned)?.remove(key);
                Ok(())
            }
        }
    }

    pub fn keys(&self) -> Vec<String> {
        match &*self.backend {
            #[cfg(not(target_arch = "wasm32"))]
            Backend::Disk { root } => {
                if !root.exists() {
                    return Vec::new();
                }
                fs::read_dir(root)
                    .ok()
                    .map(|entries| {
                        entries
                            .flatten()
                            .filter_map(|entry| {
                                let path = entry.path();
                                if path.extension().and_then(|e| e.to_str()) == Some("json") {
                                    path.file_stem()
                                        .and_then(|s| s.to_str())
                                        .map(|s| s.to_string())
                                } else {
                                    None
                                }
                            })
                            .collect()
                    })
                    .unwrap_or_default()
            }
            Backend::Memory(map) => map
                .lock()
                .ok()
                .map(|map| map.keys().cloned().collect())
                .unwrap_or_default(),
        }
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        match &*self.backend {
            #[cfg(not(target_arch = "wasm32"))]
            Backend::Disk { root } => {
                if root.exists() {
                    fs::remove_dir_all(root)?;
                }
                Ok(())
            }
            Backend::Memory(map) => {
                map.lock().map_err(|_| StorageError::Poisoned)?.clear();
                Ok(())
            }
        }
    }

    /// Persists the dataset under [`UPLOAD_KEY`], replacing any previous one.
    pub fn save_upload(&self, record: &PersistedUpload) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(record)?;
        self.set(UPLOAD_KEY, &serialized)
    }

    /// Drops the persisted dataset, if any.
    pub fn clear_upload(&self) -> Result<(), StorageError> {
        self.delete(UPLOAD_KEY)
    }

    /// Reads the dataset back. A missing record is `None`; a corrupt one is
    /// logged and treated as absent rather than surfaced to the UI.
    pub fn load_upload(&self) -> Option<PersistedUpload> {
        let raw = self.get(UPLOAD_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!("stored dataset is unreadable, ignoring it: {err}");
                None
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn file_path(root: &Path, key: &str) -> PathBuf {
        root.join(format!("{}.json", sanitize_key(key)))
    }
}

/// Keys become file names, so anything outside `[A-Za-z0-9_-]` is
/// flattened and the result capped at 64 characters.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}
