//! Error types for the PayPay client
//!
//! Every failure is returned to the immediate caller. Nothing here is retried,
//! logged or swallowed; the host application owns that policy.

use crate::types::{HttpResponse, ResultInfo};
use std::fmt;
use thiserror::Error;

/// Underlying cause reported by an [`HttpTransport`](crate::HttpTransport)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a request stopped before it completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The caller cancelled the request context
    Cancelled,
    /// The request context deadline passed
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Cancelled => f.write_str("context canceled"),
            CancelReason::DeadlineExceeded => f.write_str("context deadline exceeded"),
        }
    }
}

/// Main error type for PayPay client operations
#[derive(Error, Debug)]
pub enum PayPayError {
    /// Missing or invalid client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The request path could not be resolved against the endpoint
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Network or connection failure
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// The caller gave up on the request
    #[error("Request cancelled: {0}")]
    Cancelled(CancelReason),

    /// The response body did not match the expected shape
    #[error("Decode error (HTTP {}): {source}", .response.status)]
    Decode {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
        /// Status and headers of the response that failed to decode
        response: HttpResponse,
    },

    /// The gateway answered, but rejected the operation
    #[error(
        "API error (HTTP {}): {} {}",
        .response.status,
        .result_info.code,
        .result_info.message
    )]
    Api {
        /// Status and headers of the rejecting response
        response: HttpResponse,
        /// Result info decoded from the response body
        result_info: ResultInfo,
    },

    /// Callback token signature did not verify
    #[error("Invalid token signature: {0}")]
    InvalidSignature(String),

    /// Callback token is outside its validity window
    #[error("Expired token: {0}")]
    ExpiredToken(String),

    /// Callback token could not be parsed
    #[error("Malformed token: {0}")]
    MalformedToken(String),
}

impl PayPayError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an invalid signature error
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::InvalidSignature(message.into())
    }

    /// Create an expired token error
    pub fn expired_token(message: impl Into<String>) -> Self {
        Self::ExpiredToken(message.into())
    }

    /// Create a malformed token error
    pub fn malformed_token(message: impl Into<String>) -> Self {
        Self::MalformedToken(message.into())
    }

    /// Create a transport error from any underlying cause
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }

    /// Whether the caller cancelled the request or its deadline passed
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Whether the gateway was reached and rejected the operation
    pub fn is_business_failure(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// HTTP response metadata, when the error happened after a response arrived
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Decode { response, .. } | Self::Api { response, .. } => Some(response),
            _ => None,
        }
    }
}

/// Result type alias for PayPay client operations
pub type Result<T> = std::result::Result<T, PayPayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, StatusCode};

    #[test]
    fn test_error_display() {
        let err = PayPayError::config("missing api key");
        assert_eq!(err.to_string(), "Configuration error: missing api key");

        let err = PayPayError::Cancelled(CancelReason::DeadlineExceeded);
        assert_eq!(err.to_string(), "Request cancelled: context deadline exceeded");
    }

    #[test]
    fn test_transport_error_keeps_cause() {
        use std::error::Error as _;

        let err = PayPayError::transport(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ));
        assert_eq!(err.to_string(), "Transport error: connection reset by peer");
        assert!(err.source().is_some());
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_url_error_conversion() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: PayPayError = parse_err.into();
        assert!(matches!(err, PayPayError::Url(_)));
    }

    #[test]
    fn test_response_accessor() {
        let response = HttpResponse {
            status: StatusCode::BAD_REQUEST,
            headers: HeaderMap::new(),
        };
        let err = PayPayError::Api {
            response,
            result_info: ResultInfo {
                code: "INVALID_PARAMS".to_string(),
                message: "Invalid request params".to_string(),
                code_id: "08100006".to_string(),
            },
        };

        assert!(err.is_business_failure());
        assert!(!err.is_cancelled());
        assert_eq!(err.response().unwrap().status, StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("INVALID_PARAMS"));
        assert!(PayPayError::config("x").response().is_none());
    }
}
