//! Connection configuration
//!
//! A typed bag of credentials, endpoint, and timeouts per backend. The
//! config is immutable once passed to `connect`; a new config replaces the
//! old one only via a fresh `connect` call.

use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, AdapterResult};

/// Authentication scheme for one backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// Static API key sent in a request header.
    ApiKey {
        key: String,
        #[serde(default = "default_api_key_header")]
        header_name: String,
    },

    /// Basic authentication (username/password).
    Basic { username: String, password: String },

    /// OAuth2 client credentials flow with token expiry tracking.
    #[serde(rename = "oauth2")]
    OAuth2 {
        token_url: String,
        client_id: String,
        client_secret: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scope: Option<String>,
    },
}

fn default_api_key_header() -> String {
    "x-api-key".to_string()
}

impl AuthConfig {
    /// Create API key authentication config with the default header.
    pub fn api_key(key: impl Into<String>) -> Self {
        AuthConfig::ApiKey {
            key: key.into(),
            header_name: default_api_key_header(),
        }
    }

    /// Create basic authentication config.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        AuthConfig::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create OAuth2 client credentials config.
    pub fn oauth2(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        AuthConfig::OAuth2 {
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: None,
        }
    }

    /// Short scheme name for logs and errors.
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        match self {
            AuthConfig::ApiKey { .. } => "api_key",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::OAuth2 { .. } => "oauth2",
        }
    }

    /// Get credentials that must never be logged.
    pub fn get_credentials(&self) -> Vec<(&'static str, String)> {
        match self {
            AuthConfig::ApiKey { key, .. } => vec![("api_key", key.clone())],
            AuthConfig::Basic { password, .. } => vec![("password", password.clone())],
            AuthConfig::OAuth2 { client_secret, .. } => {
                vec![("client_secret", client_secret.clone())]
            }
        }
    }

    /// Create a redacted version for logging/display.
    pub fn redacted(&self) -> Self {
        match self {
            AuthConfig::ApiKey { header_name, .. } => AuthConfig::ApiKey {
                key: "***REDACTED***".to_string(),
                header_name: header_name.clone(),
            },
            AuthConfig::Basic { username, .. } => AuthConfig::Basic {
                username: username.clone(),
                password: "***REDACTED***".to_string(),
            },
            AuthConfig::OAuth2 {
                token_url,
                client_id,
                scope,
                ..
            } => AuthConfig::OAuth2 {
                token_url: token_url.clone(),
                client_id: client_id.clone(),
                client_secret: "***REDACTED***".to_string(),
                scope: scope.clone(),
            },
        }
    }
}

/// Connection configuration for one backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL for API requests (e.g., "https://erp.example.com/api").
    pub base_url: String,

    /// Authentication configuration.
    pub auth: AuthConfig,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry attempts the caller may budget for transient failures.
    /// This layer itself only retries the single re-auth case.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Company identifier some backends require as a header on every
    /// request, not just at connect time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,

    /// Tenant identifier, same wire-level role as `company_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

impl ConnectionConfig {
    /// Create a new config with required fields.
    pub fn new(base_url: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            base_url: base_url.into(),
            auth,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            company_id: None,
            tenant_id: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry budget.
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the mandatory company identifier.
    #[must_use]
    pub fn with_company_id(mut self, id: impl Into<String>) -> Self {
        self.company_id = Some(id.into());
        self
    }

    /// Set the mandatory tenant identifier.
    #[must_use]
    pub fn with_tenant_id(mut self, id: impl Into<String>) -> Self {
        self.tenant_id = Some(id.into());
        self
    }

    /// Build the full URL for a path under the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Validate the endpoint and structural fields.
    pub fn validate(&self) -> AdapterResult<()> {
        if self.base_url.is_empty() {
            return Err(AdapterError::invalid_config("base_url is required"));
        }
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| AdapterError::invalid_config(format!("invalid base_url: {e}")))?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(AdapterError::invalid_config(format!(
                    "unsupported scheme '{scheme}', only http(s) is allowed"
                )));
            }
        }
        if let AuthConfig::OAuth2 { token_url, .. } = &self.auth {
            url::Url::parse(token_url)
                .map_err(|e| AdapterError::invalid_config(format!("invalid token_url: {e}")))?;
        }
        Ok(())
    }

    /// Get credentials that must never be logged.
    pub fn get_credentials(&self) -> Vec<(&'static str, String)> {
        self.auth.get_credentials()
    }

    /// Create a redacted version for logging/display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.auth = config.auth.redacted();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_url_join() {
        let config = ConnectionConfig::new("https://erp.example.com/api/", AuthConfig::api_key("k"));
        assert_eq!(config.url("/products"), "https://erp.example.com/api/products");
        assert_eq!(config.url("products"), "https://erp.example.com/api/products");
    }

    #[test]
    fn test_config_validation() {
        let ok = ConnectionConfig::new("https://erp.example.com", AuthConfig::api_key("k"));
        assert!(ok.validate().is_ok());

        let empty = ConnectionConfig::new("", AuthConfig::api_key("k"));
        assert!(empty.validate().is_err());

        let bad = ConnectionConfig::new("not-a-url", AuthConfig::api_key("k"));
        assert!(bad.validate().is_err());

        let ftp = ConnectionConfig::new("ftp://erp.example.com", AuthConfig::api_key("k"));
        assert!(ftp.validate().is_err());
    }

    #[test]
    fn test_config_validates_token_url() {
        let config = ConnectionConfig::new(
            "https://books.example.com",
            AuthConfig::oauth2("not a url", "client", "secret"),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_auth_redacted() {
        let auth = AuthConfig::basic("admin", "secret");
        if let AuthConfig::Basic { username, password } = auth.redacted() {
            assert_eq!(username, "admin");
            assert_eq!(password, "***REDACTED***");
        } else {
            panic!("Expected Basic auth");
        }
    }

    #[test]
    fn test_auth_credentials() {
        let auth = AuthConfig::oauth2("https://id.example.com/token", "client", "s3cret");
        let creds = auth.get_credentials();
        assert_eq!(creds, vec![("client_secret", "s3cret".to_string())]);
    }

    #[test]
    fn test_auth_serialization_tagged() {
        let auth = AuthConfig::api_key("abc");
        let json = serde_json::to_string(&auth).unwrap();
        assert!(json.contains("\"type\":\"api_key\""));
        assert!(json.contains("\"header_name\":\"x-api-key\""));

        let parsed: AuthConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.scheme(), "api_key");
    }

    #[test]
    fn test_config_builder_headers() {
        let config = ConnectionConfig::new("https://erp.example.com", AuthConfig::basic("u", "p"))
            .with_company_id("co-42")
            .with_timeout_secs(5);
        assert_eq!(config.company_id.as_deref(), Some("co-42"));
        assert_eq!(config.timeout_secs, 5);
        assert!(config.tenant_id.is_none());
    }
}
