//! Client configuration

use crate::types::endpoints;
use crate::{PayPayError, Result};
use http::HeaderValue;
use std::env;
use std::time::Duration;
use url::Url;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "PAYPAY_API_KEY";
/// Environment variable holding the API secret
pub const ENV_API_SECRET: &str = "PAYPAY_API_SECRET";
/// Environment variable holding the merchant id
pub const ENV_MERCHANT: &str = "PAYPAY_MERCHANT";
/// Environment variable selecting the sandbox endpoint (`1` or `true`)
pub const ENV_SANDBOX: &str = "PAYPAY_SANDBOX";

/// Credentials and endpoint for a [`Client`](crate::Client)
#[derive(Clone)]
pub struct ClientConfig {
    /// API key identifying the caller
    pub api_key: String,
    /// Shared secret for request signing and callback token verification
    pub api_secret: String,
    /// Merchant id sent as `X-ASSUME-MERCHANT`
    pub merchant: String,
    /// Base endpoint every request path is resolved against
    pub endpoint: String,
    /// Request timeout applied to the default HTTP client
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("merchant", &self.merchant)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new config against the production endpoint
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        merchant: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            merchant: merchant.into(),
            endpoint: endpoints::PRODUCTION.to_string(),
            timeout: None,
        }
    }

    /// Load the config from `PAYPAY_*` environment variables
    pub fn from_env() -> Self {
        let config = Self::new(
            env::var(ENV_API_KEY).unwrap_or_default(),
            env::var(ENV_API_SECRET).unwrap_or_default(),
            env::var(ENV_MERCHANT).unwrap_or_default(),
        );

        match env::var(ENV_SANDBOX).as_deref() {
            Ok("1") | Ok("true") => config.with_sandbox(),
            _ => config,
        }
    }

    /// Use the sandbox endpoint
    pub fn with_sandbox(self) -> Self {
        self.with_endpoint(endpoints::SANDBOX)
    }

    /// Use a custom endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(PayPayError::config("missing api key"));
        }
        if self.api_secret.is_empty() {
            return Err(PayPayError::config("missing api secret"));
        }
        if self.merchant.is_empty() {
            return Err(PayPayError::config("missing merchant"));
        }
        if self.api_key.contains(':') {
            return Err(PayPayError::config("api key must not contain ':'"));
        }
        if HeaderValue::from_str(&self.api_key).is_err() {
            return Err(PayPayError::config("api key contains characters not allowed in headers"));
        }
        if HeaderValue::from_str(&self.merchant).is_err() {
            return Err(PayPayError::config("merchant contains characters not allowed in headers"));
        }
        self.endpoint_url().map(|_| ())
    }

    /// Parse the endpoint into an absolute http(s) URL
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| PayPayError::config(format!("invalid endpoint {}: {}", self.endpoint, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(PayPayError::config(
                "endpoint must start with http:// or https://",
            ));
        }

        Ok(url)
    }

    /// Whether the sandbox endpoint is selected
    pub fn is_sandbox(&self) -> bool {
        self.endpoint == endpoints::SANDBOX
    }
}
