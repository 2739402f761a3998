//! Authentication strategies
//!
//! A strategy produces exactly the headers a request needs. Static schemes
//! (API key, basic auth) are stateless; the client-credentials strategy owns
//! a cached token and guarantees a valid one is in hand before any request.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, instrument};

use crate::error::{AdapterError, AdapterResult};

/// Tokens are treated as expired this long before their literal expiry, to
/// absorb clock skew and in-flight latency.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Produces the authentication headers for outgoing requests.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Headers to attach to the next request. For token-based schemes this
    /// may trigger a token fetch.
    async fn headers(&self) -> AdapterResult<Vec<(String, String)>>;

    /// Called when a request came back 401 despite the strategy's headers.
    ///
    /// Returns `true` if the strategy recovered (e.g. dropped a stale token)
    /// and the request is worth retrying exactly once.
    async fn on_unauthorized(&self) -> AdapterResult<bool> {
        Ok(false)
    }

    /// Drop any held token/session state. Called on disconnect.
    async fn invalidate(&self) {}
}

/// Static API key sent in a configurable header.
pub struct ApiKeyAuth {
    header_name: String,
    key: String,
}

impl ApiKeyAuth {
    pub fn new(header_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            header_name: header_name.into(),
            key: key.into(),
        }
    }
}

#[async_trait]
impl AuthStrategy for ApiKeyAuth {
    async fn headers(&self) -> AdapterResult<Vec<(String, String)>> {
        Ok(vec![(self.header_name.clone(), self.key.clone())])
    }
}

/// Basic authentication.
pub struct BasicAuth {
    encoded: String,
}

impl BasicAuth {
    pub fn new(username: &str, password: &str) -> Self {
        let encoded = BASE64.encode(format!("{username}:{password}"));
        Self { encoded }
    }
}

#[async_trait]
impl AuthStrategy for BasicAuth {
    async fn headers(&self) -> AdapterResult<Vec<(String, String)>> {
        Ok(vec![(
            "Authorization".to_string(),
            format!("Basic {}", self.encoded),
        )])
    }
}

/// OAuth2 token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Cached OAuth2 access token.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// True if the token is expired or will expire within the margin.
    fn is_expired(&self, margin: Duration) -> bool {
        Utc::now() + margin >= self.expires_at
    }
}

/// OAuth2 client-credentials strategy with a guarded token cache.
///
/// The refresh path is single-flight: when several requests find the cached
/// token expired at once, exactly one of them fetches a new token and the
/// rest reuse it.
pub struct ClientCredentialsAuth {
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: Option<String>,
    http_client: reqwest::Client,
    cached_token: RwLock<Option<CachedToken>>,
    refresh_guard: Mutex<()>,
    margin: Duration,
}

impl ClientCredentialsAuth {
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: Option<String>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope,
            http_client,
            cached_token: RwLock::new(None),
            refresh_guard: Mutex::new(()),
            margin: Duration::seconds(EXPIRY_MARGIN_SECS),
        }
    }

    /// Gets a currently-valid access token, refreshing if necessary.
    #[instrument(skip(self))]
    pub async fn get_token(&self) -> AdapterResult<String> {
        {
            let cache = self.cached_token.read().await;
            if let Some(ref token) = *cache {
                if !token.is_expired(self.margin) {
                    return Ok(token.access_token.clone());
                }
            }
        }

        // Single-flight: whoever holds the guard refreshes; everyone queued
        // behind it finds the fresh token on the re-check.
        let _guard = self.refresh_guard.lock().await;
        {
            let cache = self.cached_token.read().await;
            if let Some(ref token) = *cache {
                if !token.is_expired(self.margin) {
                    return Ok(token.access_token.clone());
                }
            }
        }

        debug!("Refreshing access token");
        let new_token = self.acquire_token().await?;
        let access_token = new_token.access_token.clone();
        {
            let mut cache = self.cached_token.write().await;
            *cache = Some(new_token);
        }

        Ok(access_token)
    }

    /// Acquires a new access token using the client credentials flow.
    async fn acquire_token(&self) -> AdapterResult<CachedToken> {
        let mut params = vec![
            ("grant_type", "client_credentials".to_string()),
            ("client_id", self.client_id.clone()),
            ("client_secret", self.client_secret.clone()),
        ];
        if let Some(ref scope) = self.scope {
            params.push(("scope", scope.clone()));
        }

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AdapterError::connection_failed_with_source("token request failed", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::BAD_REQUEST
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(AdapterError::AuthenticationFailed);
            }
            let body = response.text().await.unwrap_or_default();
            return Err(AdapterError::request_failed(status.as_u16(), body));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AdapterError::invalid_response(format!("failed to parse token response: {e}"))
        })?;

        let expires_at = Utc::now() + Duration::seconds(token.expires_in);
        debug!(expires_at = %expires_at, "Acquired new token");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at,
        })
    }
}

#[async_trait]
impl AuthStrategy for ClientCredentialsAuth {
    async fn headers(&self) -> AdapterResult<Vec<(String, String)>> {
        let token = self.get_token().await?;
        Ok(vec![(
            "Authorization".to_string(),
            format!("Bearer {token}"),
        )])
    }

    async fn on_unauthorized(&self) -> AdapterResult<bool> {
        // The token looked valid but the backend rejected it. Drop it and
        // allow one retry with a freshly fetched token.
        self.invalidate().await;
        Ok(true)
    }

    async fn invalidate(&self) {
        let mut cache = self.cached_token.write().await;
        *cache = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_api_key_headers() {
        let auth = ApiKeyAuth::new("x-api-key", "secret-123");
        let headers = auth.headers().await.unwrap();
        assert_eq!(
            headers,
            vec![("x-api-key".to_string(), "secret-123".to_string())]
        );
        // Static strategies have nothing to recover on 401.
        assert!(!auth.on_unauthorized().await.unwrap());
    }

    #[tokio::test]
    async fn test_basic_auth_encoding() {
        let auth = BasicAuth::new("admin", "secret");
        let headers = auth.headers().await.unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].0, "Authorization");
        // "admin:secret" base64-encoded.
        assert_eq!(headers[0].1, "Basic YWRtaW46c2VjcmV0");
    }

    #[test]
    fn test_cached_token_expiry_margin() {
        let token = CachedToken {
            access_token: "t".to_string(),
            expires_at: Utc::now() + Duration::seconds(30),
        };

        // 30s of validity left is inside the 60s margin.
        assert!(token.is_expired(Duration::seconds(EXPIRY_MARGIN_SECS)));
        assert!(!token.is_expired(Duration::seconds(0)));
    }

    #[test]
    fn test_cached_token_already_expired() {
        let token = CachedToken {
            access_token: "t".to_string(),
            expires_at: Utc::now() - Duration::seconds(1),
        };
        assert!(token.is_expired(Duration::seconds(0)));
    }
}
