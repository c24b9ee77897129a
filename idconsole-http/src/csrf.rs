//! Client-side CSRF token records and their session cache.

use crate::SessionStorage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{trace, warn};

/// Header used when the server does not name one.
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// A CSRF token and the header it must be echoed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsrfTokenRecord {
    /// Token value.
    pub token: String,
    /// Header name the server expects the token under.
    #[serde(rename = "headerName")]
    pub header_name: String,
}

impl CsrfTokenRecord {
    /// Create a record with an explicit header name.
    pub fn new(token: impl Into<String>, header_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            header_name: header_name.into(),
        }
    }
}

/// Body of the CSRF endpoint: `{ "token": "...", "headerName": "..." }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CsrfResponse {
    /// Token value.
    pub token: String,
    /// Header name, optional on the wire.
    #[serde(rename = "headerName", default)]
    pub header_name: Option<String>,
}

impl From<CsrfResponse> for CsrfTokenRecord {
    fn from(response: CsrfResponse) -> Self {
        let header_name = response
            .header_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_CSRF_HEADER.to_string());
        Self {
            token: response.token,
            header_name,
        }
    }
}

/// Session cache holding at most one [`CsrfTokenRecord`].
#[derive(Clone)]
pub struct CsrfCache {
    storage: Arc<dyn SessionStorage>,
    key: String,
}

impl CsrfCache {
    /// Create a cache over `storage` using `key`.
    pub fn new(storage: Arc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key of the cached record.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the cached record.
    ///
    /// A value that does not decode is dropped and reported as a miss.
    pub fn load(&self) -> Option<CsrfTokenRecord> {
        let raw = self.storage.get(&self.key)?;
        match serde_json::from_str::<CsrfTokenRecord>(&raw) {
            Ok(record) => {
                trace!(header_name = %record.header_name, "CSRF token cache hit");
                Some(record)
            }
            Err(e) => {
                warn!(error = %e, key = %self.key, "Discarding unreadable cached CSRF token");
                self.storage.remove(&self.key);
                None
            }
        }
    }

    /// Replace the cached record.
    pub fn store(&self, record: &CsrfTokenRecord) {
        match serde_json::to_string(record) {
            Ok(json) => self.storage.set(&self.key, json),
            Err(e) => warn!(error = %e, "Failed to serialize CSRF token for caching"),
        }
    }

    /// Remove the cached record.
    pub fn invalidate(&self) {
        self.storage.remove(&self.key);
    }
}

impl std::fmt::Debug for CsrfCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfCache").field("key", &self.key).finish()
    }
}
