//! Form and query-string encoding of flat key/value maps.
//!
//! Nested arrays and objects are sent as their JSON text, so `ids: [1, 2]`
//! becomes `ids=%5B1%2C2%5D` (`[1,2]`), not the comma-joined `ids=1,2` a
//! browser `String(value)` would produce. Servers that expect repeated or
//! comma-separated keys need the caller to flatten the value first.

use crate::{HttpClientError, Result};
use serde::Serialize;
use serde_json::Value;

/// Flatten a serializable map or struct into string pairs.
///
/// `null` (and therefore `None`) values are omitted. Strings are used as-is,
/// numbers and booleans in their display form, and nested arrays or objects
/// as their JSON text.
///
/// # Errors
///
/// Returns [`HttpClientError::Encode`] when `fields` does not serialize to a
/// JSON object.
pub fn flatten_fields<F>(fields: &F) -> Result<Vec<(String, String)>>
where
    F: Serialize + ?Sized,
{
    let value =
        serde_json::to_value(fields).map_err(|e| HttpClientError::Encode(e.to_string()))?;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(HttpClientError::Encode(format!(
                "expected a flat key/value map, got {}",
                kind_of(&other)
            )));
        }
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| stringify(value).map(|value| (key, value)))
        .collect())
}

/// Encode fields as an `application/x-www-form-urlencoded` body.
///
/// # Errors
///
/// See [`flatten_fields`].
pub fn encode_form<F>(fields: &F) -> Result<String>
where
    F: Serialize + ?Sized,
{
    let pairs = flatten_fields(fields)?;
    serde_urlencoded::to_string(&pairs).map_err(|e| HttpClientError::Encode(e.to_string()))
}

/// Append query parameters to a path.
///
/// Joins with `&` when the path already carries a query string and with `?`
/// otherwise. A path is returned unchanged when no parameters remain.
///
/// # Errors
///
/// See [`flatten_fields`].
pub fn append_query<P>(path: &str, params: Option<&P>) -> Result<String>
where
    P: Serialize + ?Sized,
{
    let Some(params) = params else {
        return Ok(path.to_string());
    };

    let query = encode_form(params)?;
    if query.is_empty() {
        return Ok(path.to_string());
    }

    let separator = if path.contains('?') { '&' } else { '?' };
    Ok(format!("{path}{separator}{query}"))
}

fn stringify(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_omits_nullish_values() {
        let body = encode_form(&json!({"a": 1, "b": null, "c": null, "d": "s"})).unwrap();
        let mut parts: Vec<&str> = body.split('&').collect();
        parts.sort_unstable();
        assert_eq!(parts, vec!["a=1", "d=s"]);
    }

    #[test]
    fn test_struct_options_are_omitted() {
        #[derive(Serialize)]
        struct Login<'a> {
            username: &'a str,
            remember: Option<bool>,
        }

        let body = encode_form(&Login {
            username: "admin",
            remember: None,
        })
        .unwrap();
        assert_eq!(body, "username=admin");
    }

    #[test]
    fn test_values_are_stringified_and_escaped() {
        let pairs = flatten_fields(&json!({"flag": true, "n": 2.5, "q": "a b&c"})).unwrap();
        assert!(pairs.contains(&("flag".to_string(), "true".to_string())));
        assert!(pairs.contains(&("n".to_string(), "2.5".to_string())));

        let body = encode_form(&json!({"q": "a b&c"})).unwrap();
        assert_eq!(body, "q=a+b%26c");
    }

    #[test]
    fn test_nested_values_use_json_text() {
        let pairs = flatten_fields(&json!({"ids": [1, 2]})).unwrap();
        assert_eq!(pairs, vec![("ids".to_string(), "[1,2]".to_string())]);

        assert_eq!(encode_form(&json!({"ids": [1, 2]})).unwrap(), "ids=%5B1%2C2%5D");
        assert_eq!(
            append_query("/users", Some(&json!({"filter": {"enabled": true}}))).unwrap(),
            "/users?filter=%7B%22enabled%22%3Atrue%7D"
        );
    }

    #[test]
    fn test_non_map_is_rejected() {
        let err = flatten_fields(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, HttpClientError::Encode(_)));
    }

    #[test]
    fn test_query_joins_with_question_mark() {
        let url = append_query("/x", Some(&json!({"b": 2}))).unwrap();
        assert_eq!(url, "/x?b=2");
    }

    #[test]
    fn test_query_joins_with_ampersand() {
        let url = append_query("/x?already=1", Some(&json!({"b": 2}))).unwrap();
        assert_eq!(url, "/x?already=1&b=2");
    }

    #[test]
    fn test_query_without_params() {
        assert_eq!(append_query::<Value>("/x", None).unwrap(), "/x");
        assert_eq!(
            append_query("/x", Some(&json!({"only": null}))).unwrap(),
            "/x"
        );
    }
}
