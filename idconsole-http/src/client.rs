//! API client implementation.

use http::header::ACCEPT;
use http::{HeaderMap, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::csrf::CsrfResponse;
use crate::response::read_json;
use crate::{
    ApiClientConfig, CsrfCache, CsrfTokenRecord, HttpClientError, RequestOptions, Result,
    SessionStorage, encoding, headers,
};

/// Body of an outgoing request.
enum Payload {
    Empty,
    Bytes(Vec<u8>),
    Multipart(reqwest::multipart::Form),
}

/// A request after its entry point has applied its defaults.
struct Outgoing {
    method: Method,
    path: String,
    defaults: HeaderMap,
    payload: Payload,
}

/// Cookie-carrying HTTP client for the identity admin API.
///
/// Every entry point sends the session cookies the client has collected,
/// optionally attaches a CSRF header, and turns non-2xx responses into
/// [`HttpClientError::Response`].
#[derive(Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
    config: Arc<ApiClientConfig>,
    csrf_cache: CsrfCache,
}

impl ApiClient {
    /// Create a client over the given session storage.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Http`] if the underlying client cannot be
    /// built (for example, when the TLS backend fails to initialize).
    pub fn new(config: ApiClientConfig, storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let inner = builder.build()?;
        Ok(Self::with_http_client(config, storage, inner))
    }

    /// Use a custom reqwest client (for connection pool reuse or testing).
    ///
    /// The client should have a cookie store enabled, otherwise the session
    /// cookie is not sent back.
    pub fn with_http_client(
        config: ApiClientConfig,
        storage: Arc<dyn SessionStorage>,
        inner: reqwest::Client,
    ) -> Self {
        let csrf_cache = CsrfCache::new(storage, config.csrf_storage_key.clone());
        Self {
            inner,
            config: Arc::new(config),
            csrf_cache,
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Get the CSRF token cache.
    pub fn csrf_cache(&self) -> &CsrfCache {
        &self.csrf_cache
    }

    /// Forget the cached CSRF token.
    pub fn clear_csrf_cache(&self) {
        self.csrf_cache.invalidate();
    }

    /// JSON in, JSON out.
    ///
    /// Sends `Content-Type: application/json`, serializes the options' body
    /// when one is set, and uses the options' method or `GET`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Response`] for non-2xx statuses,
    /// [`HttpClientError::CsrfFetch`] when a requested CSRF token cannot be
    /// obtained, and [`HttpClientError::Http`] for transport failures.
    pub async fn request<T>(&self, path: &str, mut options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let method = options.method.take().unwrap_or(Method::GET);
        let payload = match options.body.take() {
            Some(body) => Payload::Bytes(
                serde_json::to_vec(&body).map_err(|e| HttpClientError::Encode(e.to_string()))?,
            ),
            None => Payload::Empty,
        };

        let outgoing = Outgoing {
            method,
            path: path.to_string(),
            defaults: headers::json_defaults(),
            payload,
        };
        self.dispatch(outgoing, options).await
    }

    /// `application/x-www-form-urlencoded` request, `POST` unless overridden.
    ///
    /// `form` must serialize to a flat map; `null`/`None` values are left out
    /// of the encoded body.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request), plus [`HttpClientError::Encode`]
    /// when `form` is not a flat map.
    pub async fn form_request<T, F>(
        &self,
        path: &str,
        form: &F,
        mut options: RequestOptions,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        let body = encoding::encode_form(form)?;
        let outgoing = Outgoing {
            method: options.method.take().unwrap_or(Method::POST),
            path: path.to_string(),
            defaults: headers::form_defaults(),
            payload: Payload::Bytes(body.into_bytes()),
        };
        self.dispatch(outgoing, options).await
    }

    /// Multipart request, `POST` unless overridden.
    ///
    /// No `Content-Type` default is set; the boundary header comes from the
    /// form itself.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn multipart_request<T>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        mut options: RequestOptions,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let outgoing = Outgoing {
            method: options.method.take().unwrap_or(Method::POST),
            path: path.to_string(),
            defaults: HeaderMap::new(),
            payload: Payload::Multipart(form),
        };
        self.dispatch(outgoing, options).await
    }

    /// `GET` with a query string built from `params`.
    ///
    /// Parameters are joined with `&` when `path` already has a query string.
    /// The method is always `GET` and no body is sent.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request), plus [`HttpClientError::Encode`]
    /// when `params` is not a flat map.
    pub async fn get_request<T, P>(
        &self,
        path: &str,
        params: Option<&P>,
        mut options: RequestOptions,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        options.method = None;
        options.body = None;

        let outgoing = Outgoing {
            method: Method::GET,
            path: encoding::append_query(path, params)?,
            defaults: headers::accept_json_defaults(),
            payload: Payload::Empty,
        };
        self.dispatch(outgoing, options).await
    }

    /// Resolve the CSRF token record.
    ///
    /// With `use_cache`, a cached record is returned without a network call
    /// and a freshly fetched one is cached. Without it, a token is always
    /// fetched and any cached record is removed.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::CsrfFetch`] when the endpoint answers with a
    /// non-2xx status or an unreadable body.
    pub async fn resolve_csrf(&self, use_cache: bool) -> Result<CsrfTokenRecord> {
        if use_cache && let Some(record) = self.csrf_cache.load() {
            return Ok(record);
        }

        let url = self.url(&self.config.csrf_path)?;
        debug!(url = %url, use_cache, "Fetching CSRF token");

        let response = self
            .inner
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "CSRF endpoint rejected the request");
            return Err(HttpClientError::CsrfFetch {
                status: Some(status.as_u16()),
            });
        }

        let body: CsrfResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "CSRF endpoint returned an unreadable body");
            HttpClientError::CsrfFetch {
                status: Some(status.as_u16()),
            }
        })?;
        let record = CsrfTokenRecord::from(body);

        if use_cache {
            self.csrf_cache.store(&record);
        } else {
            self.csrf_cache.invalidate();
        }

        debug!(header_name = %record.header_name, "CSRF token resolved");
        Ok(record)
    }

    /// Apply the call-wide deadline and cancellation token.
    async fn dispatch<T>(&self, outgoing: Outgoing, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let deadline = options.timeout;
        let cancel = options.cancel.clone();

        let call = async move {
            let send = self.send(outgoing, options);
            match deadline {
                Some(limit) => match tokio::time::timeout(limit, send).await {
                    Ok(result) => result,
                    Err(_) => Err(HttpClientError::Timeout(limit)),
                },
                None => send.await,
            }
        };

        match cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!("API request cancelled");
                    Err(HttpClientError::Cancelled)
                }
                result = call => result,
            },
            None => call.await,
        }
    }

    /// Resolve CSRF, merge headers, send, and decode.
    async fn send<T>(&self, outgoing: Outgoing, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let csrf = if options.csrf {
            Some(self.resolve_csrf(options.csrf_use_cache).await?)
        } else {
            None
        };

        let headers = headers::merge_headers(outgoing.defaults, &options.headers, csrf.as_ref())?;
        let url = self.url(&outgoing.path)?;

        debug!(
            method = %outgoing.method,
            url = %url,
            csrf = csrf.is_some(),
            "Sending API request"
        );

        let request = self.inner.request(outgoing.method, url).headers(headers);
        let request = match outgoing.payload {
            Payload::Empty => request,
            Payload::Bytes(body) => request.body(body),
            Payload::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await?;
        read_json(response).await
    }

    /// Build the absolute URL for a path.
    fn url(&self, path: &str) -> Result<url::Url> {
        let full = self.config.url_for(path);
        url::Url::parse(&full).map_err(|e| HttpClientError::InvalidUrl(format!("{full}: {e}")))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("csrf_cache", &self.csrf_cache)
            .finish()
    }
}
