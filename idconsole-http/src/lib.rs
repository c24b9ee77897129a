//! # idconsole HTTP
//!
//! HTTP client layer of the identity admin console: four call shapes over one
//! base URL, all carrying the session cookies, with optional CSRF header
//! attachment and normalized error responses.
//!
//! ## Features
//!
//! - **Four entry points**: JSON ([`ApiClient::request`]), form-urlencoded
//!   ([`ApiClient::form_request`]), multipart ([`ApiClient::multipart_request`])
//!   and query-string GET ([`ApiClient::get_request`])
//! - **CSRF tokens**: fetched lazily from `/csrf`, cached in session storage,
//!   or fetched fresh for sensitive calls
//! - **Error normalization**: non-2xx responses become
//!   [`HttpClientError::Response`] carrying the server's `message`
//! - **Cancellation and deadlines**: per-call [`CancellationToken`] and timeout
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use idconsole_http::{ApiClient, ApiClientConfig, MemoryStorage, RequestOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(
//!         ApiClientConfig::new("https://id.example.com/api"),
//!         Arc::new(MemoryStorage::new()),
//!     )?;
//!
//!     // Session-bound call with a cached CSRF token
//!     let roles: serde_json::Value = client
//!         .request(
//!             "/roles",
//!             RequestOptions::with_csrf()
//!                 .method(idconsole_http::Method::POST)
//!                 .body(serde_json::json!({"name": "auditor"})),
//!         )
//!         .await?;
//!
//!     println!("{roles}");
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod csrf;
pub mod encoding;
mod error;
pub mod headers;
mod options;
mod response;
mod storage;

pub use client::ApiClient;
pub use config::{
    ApiClientConfig, ApiClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_CSRF_PATH,
    DEFAULT_CSRF_STORAGE_KEY,
};
pub use csrf::{CsrfCache, CsrfResponse, CsrfTokenRecord, DEFAULT_CSRF_HEADER};
pub use error::{CSRF_FETCH_FAILED, HttpClientError, Result};
pub use options::RequestOptions;
pub use response::error_from_body;
pub use storage::{MemoryStorage, SessionStorage};

// Re-export common types
pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
pub use reqwest::multipart;
pub use tokio_util::sync::CancellationToken;

/// Prelude for common imports.
///
/// ```
/// use idconsole_http::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::ApiClient;
    pub use crate::config::{ApiClientConfig, ApiClientConfigBuilder};
    pub use crate::csrf::CsrfTokenRecord;
    pub use crate::error::{HttpClientError, Result};
    pub use crate::options::RequestOptions;
    pub use crate::storage::{MemoryStorage, SessionStorage};
    pub use http::{HeaderMap, Method, StatusCode, header};
    pub use tokio_util::sync::CancellationToken;
}
