//! Header merging.
//!
//! Outgoing headers are built from three layers, applied in this order:
//!
//! 1. entry-point defaults (`Content-Type`, `Accept`),
//! 2. caller headers from [`RequestOptions`](crate::RequestOptions),
//! 3. the CSRF header, when a token was resolved.
//!
//! A later layer replaces every value an earlier layer set for the same
//! header name.

use crate::{CsrfTokenRecord, HttpClientError, Result};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};

const JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Defaults for [`ApiClient::request`](crate::ApiClient::request).
pub fn json_defaults() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
    headers
}

/// Defaults for [`ApiClient::form_request`](crate::ApiClient::form_request).
pub fn form_defaults() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
    headers.insert(ACCEPT, HeaderValue::from_static(JSON));
    headers
}

/// Defaults for [`ApiClient::get_request`](crate::ApiClient::get_request).
pub fn accept_json_defaults() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON));
    headers
}

/// Merge the three header layers.
///
/// # Errors
///
/// Returns [`HttpClientError::InvalidHeader`] when the CSRF record names a
/// header or carries a token that is not valid in an HTTP header.
pub fn merge_headers(
    defaults: HeaderMap,
    caller: &HeaderMap,
    csrf: Option<&CsrfTokenRecord>,
) -> Result<HeaderMap> {
    let mut merged = defaults;

    for name in caller.keys() {
        merged.remove(name);
        for value in caller.get_all(name) {
            merged.append(name.clone(), value.clone());
        }
    }

    if let Some(record) = csrf {
        let (name, value) = csrf_header(record)?;
        merged.insert(name, value);
    }

    Ok(merged)
}

/// Convert a token record into a header pair.
pub fn csrf_header(record: &CsrfTokenRecord) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(record.header_name.as_bytes())
        .map_err(|e| HttpClientError::InvalidHeader(format!("{}: {e}", record.header_name)))?;
    let value = HeaderValue::from_str(&record.token)
        .map_err(|e| HttpClientError::InvalidHeader(format!("{}: {e}", record.header_name)))?;
    Ok((name, value))
}
