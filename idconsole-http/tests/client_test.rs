//! Entry-point behavior against a mock backend.

use idconsole_http::*;
use idconsole_testing::MockBackend;
use idconsole_testing::wiremock::matchers::{header, method, path};
use idconsole_testing::wiremock::{Mock, ResponseTemplate};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_server_message_becomes_error_message() {
    let backend = MockBackend::start().await;
    backend
        .mount_json("POST", "/users", 400, json!({"message": "bad input"}))
        .await;
    let (client, _storage) = backend.client();

    let err = client
        .request::<Value>("/users", RequestOptions::new().method(Method::POST))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "bad input");
    assert_eq!(err.status_code(), Some(400));
}

#[tokio::test]
async fn test_unparseable_error_body_uses_status() {
    let backend = MockBackend::start().await;
    backend.mount_raw("GET", "/users", 503, "upstream down").await;
    let (client, _storage) = backend.client();

    let err = client
        .get_request::<Value, Value>("/users", None, RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP 503");
}

#[tokio::test]
async fn test_request_sends_json() {
    let backend = MockBackend::start().await;
    backend.mount_json("PUT", "/menus/1", 200, json!({"id": 1})).await;
    let (client, _storage) = backend.client();

    let _: Value = client
        .request(
            "/menus/1",
            RequestOptions::new()
                .method(Method::PUT)
                .body(json!({"name": "Users", "sort": 2})),
        )
        .await
        .unwrap();

    let request = &backend.requests_to("/menus/1").await[0];
    assert_eq!(request.headers.get("content-type").unwrap(), "application/json");
    let sent: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(sent, json!({"name": "Users", "sort": 2}));
}

#[tokio::test]
async fn test_request_defaults_to_get_without_body() {
    let backend = MockBackend::start().await;
    backend.mount_json("GET", "/permissions", 200, json!([])).await;
    let (client, _storage) = backend.client();

    let perms: Vec<Value> = client
        .request("/permissions", RequestOptions::new())
        .await
        .unwrap();

    assert!(perms.is_empty());
    let request = &backend.requests_to("/permissions").await[0];
    assert_eq!(request.method, Method::GET);
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_caller_headers_override_defaults() {
    let backend = MockBackend::start().await;
    backend.mount_json("POST", "/import", 200, json!({})).await;
    let (client, _storage) = backend.client();

    let _: Value = client
        .request(
            "/import",
            RequestOptions::new()
                .method(Method::POST)
                .header("Content-Type", "application/merge-patch+json"),
        )
        .await
        .unwrap();

    let request = &backend.requests_to("/import").await[0];
    assert_eq!(
        request.headers.get("content-type").unwrap(),
        "application/merge-patch+json"
    );
}

#[tokio::test]
async fn test_form_request_omits_nullish_values() {
    let backend = MockBackend::start().await;
    backend.mount_json("POST", "/x", 200, json!({})).await;
    let (client, _storage) = backend.client();

    let _: Value = client
        .form_request(
            "/x",
            &json!({"a": 1, "b": null, "c": null, "d": "s"}),
            RequestOptions::new(),
        )
        .await
        .unwrap();

    let request = &backend.requests_to("/x").await[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(
        request.headers.get("content-type").unwrap(),
        "application/x-www-form-urlencoded"
    );
    assert_eq!(request.headers.get("accept").unwrap(), "application/json");

    let body = String::from_utf8(request.body.clone()).unwrap();
    let mut keys: Vec<&str> = body.split('&').collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["a=1", "d=s"]);
}

#[tokio::test]
async fn test_form_request_method_override() {
    let backend = MockBackend::start().await;
    backend.mount_json("PUT", "/profile", 200, json!({})).await;
    let (client, _storage) = backend.client();

    let _: Value = client
        .form_request(
            "/profile",
            &json!({"email": "a@example.com"}),
            RequestOptions::new().method(Method::PUT),
        )
        .await
        .unwrap();

    assert_eq!(backend.hits("/profile").await, 1);
}

#[tokio::test]
async fn test_get_request_joins_with_question_mark() {
    let backend = MockBackend::start().await;
    backend.mount_json("GET", "/x", 200, json!({})).await;
    let (client, _storage) = backend.client();

    let _: Value = client
        .get_request("/x", Some(&json!({"b": 2})), RequestOptions::new())
        .await
        .unwrap();

    let request = &backend.requests_to("/x").await[0];
    assert_eq!(request.url.query(), Some("b=2"));
    assert_eq!(request.headers.get("accept").unwrap(), "application/json");
}

#[tokio::test]
async fn test_get_request_joins_with_ampersand() {
    let backend = MockBackend::start().await;
    backend.mount_json("GET", "/x", 200, json!({})).await;
    let (client, _storage) = backend.client();

    let _: Value = client
        .get_request("/x?already=1", Some(&json!({"b": 2})), RequestOptions::new())
        .await
        .unwrap();

    let request = &backend.requests_to("/x").await[0];
    assert_eq!(request.url.query(), Some("already=1&b=2"));
}

#[tokio::test]
async fn test_get_request_ignores_method_and_body_overrides() {
    let backend = MockBackend::start().await;
    backend.mount_json("GET", "/clients", 200, json!([])).await;
    let (client, _storage) = backend.client();

    let _: Value = client
        .get_request(
            "/clients",
            Some(&json!({"search": null})),
            RequestOptions::new()
                .method(Method::POST)
                .body(json!({"ignored": true})),
        )
        .await
        .unwrap();

    let request = &backend.requests_to("/clients").await[0];
    assert_eq!(request.method, Method::GET);
    assert!(request.url.query().is_none());
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_multipart_request_sets_boundary() {
    let backend = MockBackend::start().await;
    backend.mount_csrf("T1", None).await;
    backend.mount_json("POST", "/clients/logo", 200, json!({"ok": true})).await;
    let (client, _storage) = backend.client();

    let form = multipart::Form::new()
        .text("clientId", "console")
        .part("logo", multipart::Part::bytes(vec![1, 2, 3]).file_name("logo.png"));

    let _: Value = client
        .multipart_request("/clients/logo", form, RequestOptions::with_csrf())
        .await
        .unwrap();

    let request = &backend.requests_to("/clients/logo").await[0];
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert_eq!(request.headers.get("x-csrf-token").unwrap(), "T1");
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"clientId\""));
}

#[tokio::test]
async fn test_invalid_success_body_is_json_error() {
    let backend = MockBackend::start().await;
    backend.mount_raw("GET", "/roles", 200, "not json").await;
    let (client, _storage) = backend.client();

    let err = client
        .request::<Value>("/roles", RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, HttpClientError::Json(_)));
}

#[tokio::test]
async fn test_session_cookie_is_sent_back() {
    let backend = MockBackend::start().await;
    Mock::given(method("POST"))
        .and(path(backend.api_path("/login")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "SESSION=abc123; Path=/")
                .set_body_json(json!({"ok": true})),
        )
        .mount(backend.server())
        .await;
    Mock::given(method("GET"))
        .and(path(backend.api_path("/auth/me")))
        .and(header("cookie", "SESSION=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"username": "admin"})))
        .mount(backend.server())
        .await;
    let (client, _storage) = backend.client();

    let _: Value = client
        .form_request(
            "/login",
            &json!({"username": "admin", "password": "secret"}),
            RequestOptions::new(),
        )
        .await
        .unwrap();
    let me: Value = client
        .get_request("/auth/me", None::<&Value>, RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(me["username"], "admin");
}

#[tokio::test]
async fn test_timeout_bounds_the_call() {
    let backend = MockBackend::start().await;
    Mock::given(method("GET"))
        .and(path(backend.api_path("/slow")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(backend.server())
        .await;
    let (client, _storage) = backend.client();

    let err = client
        .request::<Value>("/slow", RequestOptions::new().timeout(Duration::from_millis(100)))
        .await
        .unwrap_err();

    assert!(matches!(err, HttpClientError::Timeout(_)));
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_call() {
    let backend = MockBackend::start().await;
    Mock::given(method("GET"))
        .and(path(backend.api_path("/slow")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(backend.server())
        .await;
    let (client, _storage) = backend.client();

    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = client
        .request::<Value>("/slow", RequestOptions::new().cancel_on(token))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_network_failure_propagates() {
    let client = ApiClient::new(
        ApiClientConfig::new("http://127.0.0.1:9/api"),
        Arc::new(MemoryStorage::new()),
    )
    .unwrap();

    let err = client
        .request::<Value>("/users", RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, HttpClientError::Http(_)));
    assert!(err.is_connection());
}

#[tokio::test]
async fn test_base_url_is_concatenated_verbatim() {
    let backend = MockBackend::start().await;
    backend.mount_json("GET", "//users", 200, json!([])).await;
    let storage = Arc::new(MemoryStorage::new());
    let client = ApiClient::new(
        ApiClientConfig::new(format!("{}/", backend.base_url())),
        storage,
    )
    .unwrap();

    let _: Value = client.request("/users", RequestOptions::new()).await.unwrap();
    assert_eq!(backend.hits("//users").await, 1);
}
