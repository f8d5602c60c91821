//! Durable key/value storage for the session.
//!
//! - `MemoryStorage`: tests and server-side rendering
//! - `FileStorage`: native builds, a JSON map in the data directory
//! - `LocalStorage`: browser builds, `window.localStorage`

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Synchronous string storage; writes are visible to the next `get`
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage. Clones share the same map, which lets tests
/// simulate a reload by building a second store over a clone.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

const SESSION_FILE: &str = "session.json";

/// JSON file storage, rewritten on every mutation
pub struct FileStorage {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Open the session file in `data_dir`, starting empty if missing or corrupt
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let path = data_dir.as_ref().join(SESSION_FILE);
        let values = Self::load_from_disk(&path);
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(path: &Path) -> HashMap<String, String> {
        let Ok(content) = fs::read_to_string(path) else {
            return HashMap::new();
        };
        match serde_json::from_str(&content) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                HashMap::new()
            }
        }
    }

    fn save_to_disk(&self, values: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::error!("Failed to create session directory {}: {}", parent.display(), e);
            }
        }
        match serde_json::to_string_pretty(values) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::error!("Failed to write session file {}: {}", self.path.display(), e);
                }
            }
            Err(e) => tracing::error!("Failed to serialize session: {}", e),
        }
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
            self.save_to_disk(&values);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            if values.remove(key).is_some() {
                self.save_to_disk(&values);
            }
        }
    }
}

/// `window.localStorage`. Reads come back empty and writes are logged and
/// dropped when storage is unavailable (private browsing, sandboxed iframes).
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(key, value) {
                    tracing::error!("Failed to write {} to localStorage: {:?}", key, e);
                }
            }
            None => tracing::error!("localStorage unavailable, {} not saved", key),
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(e) = storage.remove_item(key) {
                tracing::error!("Failed to remove {} from localStorage: {:?}", key, e);
            }
        }
    }
}

/// Platform storage used by the application at startup.
///
/// A server render gets a fresh empty map per app instance: the visitor's
/// session lives in their browser, and the client restores it after
/// hydration.
pub fn default_storage() -> Arc<dyn SessionStorage> {
    #[cfg(target_arch = "wasm32")]
    {
        Arc::new(LocalStorage)
    }

    #[cfg(all(not(target_arch = "wasm32"), feature = "server"))]
    {
        Arc::new(MemoryStorage::new())
    }

    #[cfg(all(not(target_arch = "wasm32"), not(feature = "server")))]
    {
        Arc::new(FileStorage::new(crate::config::get_data_dir()))
    }
}
