//! Mock identity API built on `wiremock`.

use crate::RecordingStorage;
use idconsole_http::{ApiClient, ApiClientConfig};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Path prefix the mock API is served under.
pub const API_PREFIX: &str = "/api";

/// Current-user endpoint, relative to the API base.
pub const CURRENT_USER_PATH: &str = "/auth/me";

/// Mock identity backend.
///
/// ```rust,no_run
/// use idconsole_testing::MockBackend;
///
/// # async fn demo() {
/// let backend = MockBackend::start().await;
/// backend.mount_csrf("T1", Some("X-Custom")).await;
/// let (client, storage) = backend.client();
///
/// let record = client.resolve_csrf(true).await.unwrap();
/// assert_eq!(record.token, "T1");
/// assert_eq!(backend.hits("/csrf").await, 1);
/// # let _ = storage;
/// # }
/// ```
pub struct MockBackend {
    server: MockServer,
}

impl MockBackend {
    /// Start a backend on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// The underlying mock server.
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Base URL to configure clients with.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.server.uri(), API_PREFIX)
    }

    /// Absolute server path for an API-relative path.
    pub fn api_path(&self, relative: &str) -> String {
        format!("{API_PREFIX}{relative}")
    }

    /// Build a client against this backend with recording storage.
    pub fn client(&self) -> (ApiClient, Arc<RecordingStorage>) {
        let storage = Arc::new(RecordingStorage::new());
        let client = ApiClient::new(ApiClientConfig::new(self.base_url()), storage.clone())
            .expect("client builds");
        (client, storage)
    }

    /// Serve a CSRF token, with or without a header name.
    pub async fn mount_csrf(&self, token: &str, header_name: Option<&str>) {
        let body = match header_name {
            Some(name) => json!({ "token": token, "headerName": name }),
            None => json!({ "token": token }),
        };
        self.mount_json("GET", "/csrf", 200, body).await;
    }

    /// Serve a sequence of CSRF tokens, one per call, the last one repeating.
    pub async fn mount_csrf_sequence(&self, tokens: &[&str]) {
        for (i, token) in tokens.iter().enumerate() {
            let mock = Mock::given(method("GET"))
                .and(path(self.api_path("/csrf")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })));
            let mock = if i + 1 < tokens.len() {
                mock.up_to_n_times(1)
            } else {
                mock
            };
            // Earlier mounts take priority until exhausted.
            mock.with_priority(u8::try_from(i + 1).unwrap_or(u8::MAX))
                .mount(&self.server)
                .await;
        }
    }

    /// Make the CSRF endpoint fail with `status`.
    pub async fn mount_csrf_failure(&self, status: u16) {
        self.mount_json("GET", "/csrf", status, json!({ "message": "csrf unavailable" }))
            .await;
    }

    /// Serve the current user.
    pub async fn mount_current_user(&self, user: Value) {
        self.mount_json("GET", CURRENT_USER_PATH, 200, user).await;
    }

    /// Make the current-user endpoint answer with `status`.
    pub async fn mount_current_user_status(&self, status: u16) {
        self.mount_json(
            "GET",
            CURRENT_USER_PATH,
            status,
            json!({ "message": "unauthorized" }),
        )
        .await;
    }

    /// Serve a JSON body for `http_method` on an API-relative path.
    pub async fn mount_json(&self, http_method: &str, relative: &str, status: u16, body: Value) {
        Mock::given(method(http_method))
            .and(path(self.api_path(relative)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serve a raw, non-JSON body.
    pub async fn mount_raw(&self, http_method: &str, relative: &str, status: u16, body: &str) {
        Mock::given(method(http_method))
            .and(path(self.api_path(relative)))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Requests received for an API-relative path, in arrival order.
    pub async fn requests_to(&self, relative: &str) -> Vec<Request> {
        let target = self.api_path(relative);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == target)
            .collect()
    }

    /// Number of requests received for an API-relative path.
    pub async fn hits(&self, relative: &str) -> usize {
        self.requests_to(relative).await.len()
    }
}
