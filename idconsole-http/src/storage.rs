//! Session-scoped key/value storage.
//!
//! The CSRF token cache lives behind [`SessionStorage`] so callers decide
//! where it is kept and tests can observe every access. All operations are
//! synchronous: a read never spans an await point, so a reader sees either a
//! complete record or nothing.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Storage for values that live as long as the console session.
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String);

    /// Remove the value stored under `key`, if any.
    fn remove(&self, key: &str);
}

/// In-memory session storage, cleared when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every entry, as when the browsing session ends.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}
