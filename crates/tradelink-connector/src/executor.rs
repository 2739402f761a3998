//! Request executor
//!
//! The single choke point for outbound calls. Composes the URL, injects the
//! auth strategy's headers and the adapter's fixed extra headers, serializes
//! JSON bodies, and maps non-2xx responses to typed errors with the
//! backend's own diagnostics kept verbatim.

use reqwest::{header, Client, Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::auth::AuthStrategy;
use crate::error::{AdapterError, AdapterResult};

/// Issues HTTP requests against one backend.
pub struct RequestExecutor {
    client: Client,
    base_url: String,
    auth: Arc<dyn AuthStrategy>,
    extra_headers: Vec<(String, String)>,
    timeout_secs: u64,
}

impl RequestExecutor {
    /// Create an executor for a backend.
    ///
    /// `extra_headers` are the fixed tenant/company headers the backend
    /// requires on every request regardless of auth scheme.
    pub fn new(
        base_url: impl Into<String>,
        auth: Arc<dyn AuthStrategy>,
        extra_headers: Vec<(String, String)>,
        timeout_secs: u64,
    ) -> AdapterResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                AdapterError::invalid_config(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            auth,
            extra_headers,
            timeout_secs,
        })
    }

    /// The auth strategy backing this executor.
    pub fn auth(&self) -> &Arc<dyn AuthStrategy> {
        &self.auth
    }

    /// The HTTP client, for strategies that need their own calls.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Build the full URL for a path under the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// GET a path with query parameters.
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> AdapterResult<Value> {
        self.request(Method::GET, path, query, None).await
    }

    /// POST a JSON body to a path.
    pub async fn post(&self, path: &str, body: &Value) -> AdapterResult<Value> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// PUT a JSON body to a path.
    pub async fn put(&self, path: &str, body: &Value) -> AdapterResult<Value> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    /// DELETE a path.
    pub async fn delete(&self, path: &str) -> AdapterResult<Value> {
        self.request(Method::DELETE, path, &[], None).await
    }

    /// Issue one request.
    ///
    /// On a 401 the auth strategy is given one chance to recover (token
    /// re-fetch) and the request is retried exactly once. There is no other
    /// retry logic here.
    #[instrument(skip(self, query, body), fields(url = %self.url(path)))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> AdapterResult<Value> {
        let response = self.send(method.clone(), path, query, body).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            if self.auth.on_unauthorized().await? {
                warn!(path = %path, "401 with cached credentials, retrying once");
                let retried = self.send(method, path, query, body).await?;
                if retried.status() == StatusCode::UNAUTHORIZED {
                    return Err(AdapterError::AuthenticationFailed);
                }
                return Self::into_value(retried).await;
            }
            return Err(AdapterError::AuthenticationFailed);
        }

        Self::into_value(response).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> AdapterResult<reqwest::Response> {
        let url = self.url(path);
        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        for (name, value) in &self.extra_headers {
            builder = builder.header(name, value);
        }
        for (name, value) in self.auth.headers().await? {
            builder = builder.header(name, value);
        }
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(json_body) = body {
            builder = builder.json(json_body);
        }

        debug!(method = %method, url = %url, "Sending request");

        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AdapterError::ConnectionTimeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                AdapterError::connection_failed_with_source(format!("request failed: {url}"), e)
            }
        })
    }

    /// Turn a settled response into a JSON value or a typed error.
    async fn into_value(response: reqwest::Response) -> AdapterResult<Value> {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            // The backend's diagnostic travels verbatim.
            return Err(AdapterError::request_failed(status.as_u16(), text));
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| AdapterError::invalid_response(format!("malformed JSON body: {e}")))
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
