//! Response normalization.

use crate::{HttpClientError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Error body the API returns with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<Value>,
}

/// Display form of a scalar `message`. Strings, numbers and booleans are used;
/// `null`, empty strings, arrays and objects are not.
fn message_text(message: Value) -> Option<String> {
    match message {
        Value::String(text) if !text.is_empty() => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Build the error for a non-2xx response.
///
/// The message is the body's `message` field when it is a non-empty string,
/// a number or a boolean, otherwise `HTTP {status}`. Parsing the body never
/// fails the conversion.
pub fn error_from_body(status: u16, body: &[u8]) -> HttpClientError {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed
        .message
        .and_then(message_text)
        .unwrap_or_else(|| format!("HTTP {status}"));
    HttpClientError::Response { status, message }
}

/// Turn a reqwest response into a decoded body or a normalized error.
pub(crate) async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let url = response.url().clone();

    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        let err = error_from_body(status.as_u16(), &body);
        warn!(status = status.as_u16(), url = %url, error = %err, "API request failed");
        return Err(err);
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| HttpClientError::Json(e.to_string()))
}
