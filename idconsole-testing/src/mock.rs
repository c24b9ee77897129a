// Recording doubles for storage and navigation

use async_trait::async_trait;
use idconsole_guard::{RouteParams, SessionProbe, View};
use idconsole_http::{MemoryStorage, SessionStorage};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Session storage that counts every call.
#[derive(Debug, Default)]
pub struct RecordingStorage {
    inner: MemoryStorage,
    gets: AtomicUsize,
    sets: AtomicUsize,
    removes: AtomicUsize,
}

impl RecordingStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls.
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `set` calls.
    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    /// Number of `remove` calls.
    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// Current value under `key`, without counting the read.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl SessionStorage for RecordingStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: String) {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value);
    }

    fn remove(&self, key: &str) {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key);
    }
}

/// View that records every mount.
#[derive(Debug, Default)]
pub struct RecordingView {
    name: String,
    mounts: Mutex<Vec<RouteParams>>,
}

impl RecordingView {
    /// Create a view with a display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mounts: Mutex::new(Vec::new()),
        }
    }

    /// Number of times the view was mounted.
    pub fn mount_count(&self) -> usize {
        self.mounts.lock().unwrap().len()
    }

    /// Whether the view was ever mounted.
    pub fn was_mounted(&self) -> bool {
        self.mount_count() > 0
    }

    /// Parameters of the most recent mount.
    pub fn last_params(&self) -> Option<RouteParams> {
        self.mounts.lock().unwrap().last().cloned()
    }
}

impl View for RecordingView {
    fn name(&self) -> &str {
        &self.name
    }

    fn mount(&self, params: &RouteParams) {
        self.mounts.lock().unwrap().push(params.clone());
    }
}

/// Session probe with a fixed, switchable answer.
#[derive(Debug)]
pub struct FixedProbe {
    authenticated: AtomicBool,
    calls: AtomicUsize,
}

impl FixedProbe {
    /// Create a probe answering `authenticated`.
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated: AtomicBool::new(authenticated),
            calls: AtomicUsize::new(0),
        }
    }

    /// Change the answer.
    pub fn set(&self, authenticated: bool) {
        self.authenticated.store(authenticated, Ordering::SeqCst);
    }

    /// Number of checks performed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionProbe for FixedProbe {
    async fn is_authenticated(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.authenticated.load(Ordering::SeqCst)
    }
}
