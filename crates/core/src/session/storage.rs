//! Key/value persistence seam for the session.
//!
//! The session persists exactly two entries: the opaque auth token and the
//! serialized identity. The store writes and clears them together; the
//! storage itself has no schema beyond string keys and values.

use std::collections::HashMap;
use std::sync::Mutex;

use bankview_shared::AppResult;

/// Storage key of the opaque auth token.
pub const KEY_AUTH_TOKEN: &str = "auth_token";
/// Storage key of the serialized current identity.
pub const KEY_CURRENT_USER: &str = "current_user";

/// Persistent string key/value storage.
///
/// Implemented by the IO edge (a JSON file in `bankview-client`); the
/// in-memory implementation below backs tests.
pub trait SessionStorage {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    /// Stores `value` under `key`, replacing any existing value.
    fn put(&self, key: &str, value: &str) -> AppResult<()>;
    /// Removes the value stored under `key`, if any.
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with entries.
    #[must_use]
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self
            .entries
            .lock()
            .map(|entries| entries.get(key).cloned())
            .unwrap_or_default())
    }

    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
        Ok(())
    }
}
