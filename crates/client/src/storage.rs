//! JSON-file session persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use bankview_core::session::SessionStorage;
use bankview_shared::config::StorageConfig;
use bankview_shared::{AppError, AppResult};

/// Key/value storage backed by a single JSON file.
///
/// The file holds a flat string map. Every operation is a full
/// read-modify-write; the session writes two small entries at most, so
/// there is nothing worth caching.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates a storage at the given file path. The file and its parent
    /// directories are created lazily on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a storage from configuration.
    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.session_file)
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> AppResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|err| AppError::Storage(err.to_string()))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(AppError::Storage(err.to_string())),
        }
    }

    fn write_map(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| AppError::Storage(err.to_string()))?;
            }
        }
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|err| AppError::Storage(err.to_string()))?;
        fs::write(&self.path, contents).map_err(|err| AppError::Storage(err.to_string()))?;
        debug!(path = %self.path.display(), entries = entries.len(), "session file written");
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.read_map()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_map(&entries)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.read_map()?;
        if entries.remove(key).is_some() {
            self.write_map(&entries)?;
        }
        Ok(())
    }
}
