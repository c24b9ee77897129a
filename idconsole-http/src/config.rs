//! API client configuration.

use std::time::Duration;

/// Default base URL when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Path of the CSRF bootstrap endpoint, relative to the base URL.
pub const DEFAULT_CSRF_PATH: &str = "/csrf";

/// Session storage key holding the cached CSRF token record.
pub const DEFAULT_CSRF_STORAGE_KEY: &str = "csrfToken";

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL every request path is appended to, verbatim.
    pub base_url: String,
    /// Path of the CSRF endpoint.
    pub csrf_path: String,
    /// Storage key of the cached CSRF token record.
    pub csrf_storage_key: String,
    /// Default per-round-trip timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            csrf_path: DEFAULT_CSRF_PATH.to_string(),
            csrf_storage_key: DEFAULT_CSRF_STORAGE_KEY.to_string(),
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("idconsole/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiClientConfig {
    /// Create a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Create a new configuration builder.
    pub fn builder() -> ApiClientConfigBuilder {
        ApiClientConfigBuilder::default()
    }

    /// Join a request path onto the base URL.
    ///
    /// The path is appended as-is; duplicate slashes are not collapsed.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Builder for API client configuration.
#[derive(Debug, Default)]
pub struct ApiClientConfigBuilder {
    config: ApiClientConfig,
}

impl ApiClientConfigBuilder {
    /// Set the base URL for all requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the CSRF endpoint path.
    pub fn csrf_path(mut self, path: impl Into<String>) -> Self {
        self.config.csrf_path = path.into();
        self
    }

    /// Set the storage key used for the cached CSRF token.
    pub fn csrf_storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.csrf_storage_key = key.into();
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Disable the default request timeout.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ApiClientConfig {
        self.config
    }
}
