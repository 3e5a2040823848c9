//! Client-local key/value storage and the persisted auth toggle.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use ide_core::result::AppResult;

/// Key under which the authenticated/public toggle is stored.
pub const AUTH_STORAGE_KEY: &str = "graphiql:isAuthenticated";

/// String key/value storage local to the client.
pub trait LocalStorage: Send + Sync + std::fmt::Debug {
    /// Reads a value.
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    /// Writes a value.
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;

    /// Deletes a value.
    fn remove_item(&self, key: &str) -> AppResult<()>;
}

/// In-memory storage, lost with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.items.write().remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object in a file.
///
/// The file is read on every access and rewritten on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Creates storage at `path`. The file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> AppResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock();
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock();
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// The persisted authenticated/public toggle.
#[derive(Debug, Clone)]
pub struct AuthPreference {
    storage: Arc<dyn LocalStorage>,
}

impl AuthPreference {
    /// Wraps a storage backend.
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Reads the toggle. Sessions start authenticated unless `"false"` was stored.
    pub fn load(&self) -> bool {
        match self.storage.get_item(AUTH_STORAGE_KEY) {
            Ok(Some(value)) => match value.as_str() {
                "true" => true,
                "false" => false,
                other => {
                    warn!(value = %other, "Ignoring unrecognised stored auth preference");
                    true
                }
            },
            Ok(None) => true,
            Err(e) => {
                warn!(error = %e, "Failed to read stored auth preference");
                true
            }
        }
    }

    /// Writes the toggle.
    pub fn save(&self, is_authenticated: bool) -> AppResult<()> {
        debug!(is_authenticated = is_authenticated, "Persisting auth preference");
        self.storage
            .set_item(AUTH_STORAGE_KEY, if is_authenticated { "true" } else { "false" })
    }
}
