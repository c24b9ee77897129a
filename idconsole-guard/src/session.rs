//! Server-verified session checks.
//!
//! The console keeps no local notion of "logged in". Every check asks the
//! current-user endpoint with a fresh CSRF token, and anything short of a
//! 2xx response with a non-null body counts as unauthenticated.

use async_trait::async_trait;
use idconsole_http::{ApiClient, HttpClientError, RequestOptions};
use serde_json::Value;
use tracing::debug;

/// Current-user endpoint, relative to the API base URL.
pub const CURRENT_USER_PATH: &str = "/auth/me";

/// Outcome of a session check that keeps failures apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// The server confirmed an active session.
    Authenticated,
    /// The server answered, but not with a session (4xx/5xx, null body).
    Unauthenticated,
    /// The server could not be reached or did not answer in time.
    Unreachable,
}

impl SessionStatus {
    /// Collapse to the fail-closed boolean.
    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

fn session_check_options() -> RequestOptions {
    RequestOptions::with_csrf().csrf_use_cache(false)
}

/// Ask the server whether the current session is valid.
///
/// Never fails: network errors, non-2xx statuses, CSRF failures and null or
/// unreadable bodies all yield `false`.
pub async fn is_authenticated(client: &ApiClient) -> bool {
    check_session(client).await.is_authenticated()
}

/// Like [`is_authenticated`], but tells an unreachable server apart from a
/// missing session.
pub async fn check_session(client: &ApiClient) -> SessionStatus {
    let result = client
        .get_request::<Option<Value>, Value>(CURRENT_USER_PATH, None, session_check_options())
        .await;

    let status = match result {
        Ok(Some(_)) => SessionStatus::Authenticated,
        Ok(None) => SessionStatus::Unauthenticated,
        Err(e) => classify(&e),
    };
    debug!(?status, "Session check finished");
    status
}

fn classify(error: &HttpClientError) -> SessionStatus {
    if error.is_connection() {
        SessionStatus::Unreachable
    } else {
        SessionStatus::Unauthenticated
    }
}

/// Source of truth for "is there a session right now?".
#[async_trait]
pub trait SessionProbe: Send + Sync {
    /// Check the session. Must not cache across calls.
    async fn is_authenticated(&self) -> bool;
}

/// Probe that asks the identity API through an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ServerSessionProbe {
    client: ApiClient,
}

impl ServerSessionProbe {
    /// Create a probe over `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionProbe for ServerSessionProbe {
    async fn is_authenticated(&self) -> bool {
        is_authenticated(&self.client).await
    }
}
