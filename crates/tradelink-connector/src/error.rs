//! Adapter error types
//!
//! One error enum shared by every backend adapter, so callers can branch on
//! the kind of failure without knowing which system is wired in.

use thiserror::Error;

use crate::types::BackendType;

/// Error that can occur during adapter operations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Failed to reach the backend (DNS, TLS, connection refused).
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Request exceeded the configured timeout.
    #[error("connection timeout after {timeout_secs} seconds")]
    ConnectionTimeout { timeout_secs: u64 },

    /// Credentials were rejected, including after the single re-auth retry.
    #[error("authentication failed: invalid credentials")]
    AuthenticationFailed,

    /// The backend answered with a non-2xx status. The body is kept verbatim.
    #[error("request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// The backend has no notion of this resource or operation.
    #[error("{backend} does not support {operation}")]
    NotSupported {
        backend: BackendType,
        operation: String,
    },

    /// The adapter has not been connected (or was disconnected).
    #[error("adapter is not connected")]
    NotConnected,

    /// Connection config is invalid for this backend.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The backend returned a body that could not be interpreted.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

impl AdapterError {
    /// Get an error code for classification and logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AdapterError::ConnectionFailed { .. } => "CONNECTION_FAILED",
            AdapterError::ConnectionTimeout { .. } => "CONNECTION_TIMEOUT",
            AdapterError::AuthenticationFailed => "AUTH_FAILED",
            AdapterError::RequestFailed { .. } => "REQUEST_FAILED",
            AdapterError::NotSupported { .. } => "NOT_SUPPORTED",
            AdapterError::NotConnected => "NOT_CONNECTED",
            AdapterError::InvalidConfiguration { .. } => "INVALID_CONFIG",
            AdapterError::InvalidResponse { .. } => "INVALID_RESPONSE",
        }
    }

    /// True when the failure means the adapter needs a fresh `connect`.
    pub fn is_auth(&self) -> bool {
        matches!(self, AdapterError::AuthenticationFailed)
    }

    /// True when the backend simply does not implement the capability,
    /// as opposed to the call having failed.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, AdapterError::NotSupported { .. })
    }

    // Convenience constructors

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        AdapterError::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection failed error with source.
    pub fn connection_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AdapterError::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a request failed error carrying the backend's own diagnostic.
    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        AdapterError::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Create a not-supported error for a capability absent on a backend.
    pub fn not_supported(backend: BackendType, operation: impl Into<String>) -> Self {
        AdapterError::NotSupported {
            backend,
            operation: operation.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        AdapterError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        AdapterError::InvalidResponse {
            message: message.into(),
        }
    }
}

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AdapterError::AuthenticationFailed.error_code(),
            "AUTH_FAILED"
        );
        assert_eq!(
            AdapterError::connection_failed("test").error_code(),
            "CONNECTION_FAILED"
        );
        assert_eq!(
            AdapterError::request_failed(500, "boom").error_code(),
            "REQUEST_FAILED"
        );
    }

    #[test]
    fn test_not_supported_classification() {
        let err = AdapterError::not_supported(BackendType::Accounting, "sales_channels.list");
        assert!(err.is_not_supported());
        assert!(!err.is_auth());
        assert_eq!(
            err.to_string(),
            "accounting does not support sales_channels.list"
        );
    }

    #[test]
    fn test_request_failed_keeps_body_verbatim() {
        let err = AdapterError::request_failed(422, r#"{"message":"sku taken"}"#);
        if let AdapterError::RequestFailed { status, message } = &err {
            assert_eq!(*status, 422);
            assert_eq!(message, r#"{"message":"sku taken"}"#);
        } else {
            panic!("Expected RequestFailed variant");
        }
    }

    #[test]
    fn test_auth_classification() {
        assert!(AdapterError::AuthenticationFailed.is_auth());
        assert!(!AdapterError::NotConnected.is_auth());
    }
}
