//! HTTP client error types.

use std::time::Duration;
use thiserror::Error;

/// Result type for console HTTP operations.
pub type Result<T> = std::result::Result<T, HttpClientError>;

/// Message carried by every CSRF bootstrap failure.
pub const CSRF_FETCH_FAILED: &str = "Failed to fetch CSRF token";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The CSRF endpoint answered with a non-2xx status or an unusable body.
    #[error("Failed to fetch CSRF token")]
    CsrfFetch {
        /// HTTP status of the CSRF endpoint, if a response was received.
        status: Option<u16>,
    },

    /// Non-2xx response from the API.
    ///
    /// Displays only `message`: the server-supplied `message` field, or
    /// `HTTP {status}` when none could be read.
    #[error("{message}")]
    Response {
        /// HTTP status code.
        status: u16,
        /// Normalized error message.
        message: String,
    },

    /// A success body could not be decoded into the requested type.
    #[error("JSON error: {0}")]
    Json(String),

    /// The request was cancelled through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,

    /// The call did not complete within its deadline.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value could not be used.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Form or query parameters could not be encoded.
    #[error("Failed to encode parameters: {0}")]
    Encode(String),

    /// Underlying transport error (DNS, connection refused, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl HttpClientError {
    /// Get the HTTP status code if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::CsrfFetch { status } => *status,
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the server rejected the caller's session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401) | Some(403))
    }

    /// Check if this error came from the cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_)) || matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Check if the server could not be reached at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect() || e.is_timeout())
            || matches!(self, Self::Timeout(_))
    }
}
