//! Per-call request options.

use crate::{HttpClientError, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Options accepted by every [`ApiClient`](crate::ApiClient) entry point.
///
/// ```
/// use idconsole_http::{Method, RequestOptions};
///
/// let options = RequestOptions::new()
///     .method(Method::DELETE)
///     .csrf(true)
///     .csrf_use_cache(false);
///
/// assert!(options.wants_csrf());
/// assert!(!options.uses_csrf_cache());
/// ```
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub(crate) method: Option<Method>,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) csrf: bool,
    pub(crate) csrf_use_cache: bool,
    pub(crate) timeout: Option<Duration>,
    pub(crate) cancel: Option<CancellationToken>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: None,
            headers: HeaderMap::new(),
            body: None,
            csrf: false,
            csrf_use_cache: true,
            timeout: None,
            cancel: None,
        }
    }
}

impl RequestOptions {
    /// Create default options: no CSRF, cache enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for options with CSRF attachment enabled.
    pub fn with_csrf() -> Self {
        Self::new().csrf(true)
    }

    /// Override the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header. Invalid names or values are ignored with a warning.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        match (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => tracing::warn!(header = name.as_ref(), "Ignoring invalid request header"),
        }
        self
    }

    /// Add multiple headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set a JSON body from an already-built value.
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Encode`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| HttpClientError::Encode(e.to_string()))?;
        Ok(self.body(value))
    }

    /// Attach a CSRF header before sending.
    pub fn csrf(mut self, enabled: bool) -> Self {
        self.csrf = enabled;
        self
    }

    /// Reuse the cached CSRF token (`true`, the default) or force a fresh one.
    pub fn csrf_use_cache(mut self, use_cache: bool) -> Self {
        self.csrf_use_cache = use_cache;
        self
    }

    /// Bound the whole call, CSRF resolution included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Abort the call when `token` is cancelled.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Whether a CSRF header will be attached.
    pub fn wants_csrf(&self) -> bool {
        self.csrf
    }

    /// Whether the cached CSRF token may be used.
    pub fn uses_csrf_cache(&self) -> bool {
        self.csrf_use_cache
    }

    /// Caller-supplied headers.
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }
}
