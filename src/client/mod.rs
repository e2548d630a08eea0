//! PayPay API client
//!
//! The [`Client`] turns typed operation requests into signed HTTP requests,
//! dispatches them over a pluggable [`HttpTransport`] and decodes the responses.
//!
//! - Request building lives here: query flattening for GET/DELETE, JSON bodies
//!   for POST/PUT, the merchant header and the OPA-Auth `Authorization` header.
//! - [`transport`] - dispatch, cancellation via [`RequestContext`], response decoding.
//! - [`account_link`] - the account-link QR code endpoint and callback token parsing.
//!
//! # Examples
//!
//! ```no_run
//! use paypay_opa::{Client, ClientConfig, RequestContext};
//! use paypay_opa::types::{scopes, CreateAccountLinkQrCodeRequest, RedirectType};
//!
//! # async fn example() -> paypay_opa::Result<()> {
//! let client = Client::new(ClientConfig::new("api_key", "api_secret", "merchant_id").with_sandbox())?;
//!
//! let request = CreateAccountLinkQrCodeRequest::new(
//!     vec![scopes::CONTINUOUS_PAYMENTS.to_string()],
//!     uuid::Uuid::new_v4().to_string(),
//!     "https://merchant.example.com/confirm",
//!     uuid::Uuid::new_v4().to_string(),
//! )
//! .with_redirect_type(RedirectType::WebLink);
//!
//! let response = client
//!     .create_account_link_qr_code(&RequestContext::new(), &request)
//!     .await?;
//! println!("{:?}", response.data.link_qr_code_url());
//! # Ok(())
//! # }
//! ```

use crate::config::ClientConfig;
use crate::crypto::signature::{self, SigningKey};
use crate::types::{headers, ApiResponse, ResultInfo};
use crate::{PayPayError, Result};
use http::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use url::Url;

pub mod account_link;
pub mod transport;


pub use transport::{HttpTransport, RequestContext};

/// HTTP methods the gateway accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// Upper-case method name, as signed
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether a body travels in the query string rather than as JSON
    pub fn is_read(&self) -> bool {
        matches!(self, Method::Get | Method::Delete)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Response bodies that carry a gateway [`ResultInfo`]
pub trait HasResultInfo {
    /// The decoded result block
    fn result_info(&self) -> &ResultInfo;
}

/// Client for the PayPay Open Payment API
///
/// Configuration is immutable after construction, so a client can be cloned
/// and shared freely across tasks.
#[derive(Clone)]
pub struct Client {
    api_key: String,
    api_secret: String,
    merchant: String,
    endpoint: Url,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("merchant", &self.merchant)
            .field("endpoint", &self.endpoint.as_str())
            .field("transport", &"<transport>")
            .finish()
    }
}

impl Client {
    /// Create a client backed by a fresh `reqwest::Client`
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| PayPayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_transport(config, Arc::new(http_client))
    }

    /// Create a client that dispatches through `transport`
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate()?;
        let endpoint = config.endpoint_url()?;

        Ok(Self {
            api_key: config.api_key,
            api_secret: config.api_secret,
            merchant: config.merchant,
            endpoint,
            transport,
        })
    }

    /// Create a client from `PAYPAY_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Base endpoint requests are resolved against
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Merchant id sent with every request
    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    fn signing_key(&self) -> SigningKey<'_> {
        SigningKey::new(&self.api_key, &self.api_secret)
    }

    /// Build a signed request
    ///
    /// For GET and DELETE a body is flattened into the query string; for POST
    /// and PUT it is sent as JSON. The signature always covers `path` without
    /// its query component.
    pub fn build_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<reqwest::Request>
    where
        B: Serialize + ?Sized,
    {
        let signing_path = path.split_once('?').map_or(path, |(p, _)| p);
        let mut url = self.endpoint.join(path)?;

        let mut payload = Vec::new();
        if let Some(body) = body {
            if method.is_read() {
                let pairs = flatten_query(body)?;
                if !pairs.is_empty() {
                    url.query_pairs_mut().extend_pairs(pairs);
                }
            } else {
                payload = serde_json::to_vec(body)
                    .map_err(|e| PayPayError::serialization(e.to_string()))?;
            }
        }

        let authorization = signature::auth_header(
            self.signing_key(),
            method.as_str(),
            signing_path,
            headers::CONTENT_TYPE_JSON,
            &payload,
        );

        tracing::debug!(
            method = %method,
            url = %url,
            merchant = %self.merchant,
            "built signed request"
        );

        let mut request = reqwest::Request::new(method.into(), url);
        let request_headers = request.headers_mut();
        if !self.merchant.is_empty() {
            request_headers.insert(
                HeaderName::from_static(headers::ASSUME_MERCHANT),
                header_value(&self.merchant)?,
            );
        }
        request_headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(headers::CONTENT_TYPE_JSON),
        );
        request_headers.insert(AUTHORIZATION, header_value(&authorization)?);

        if !payload.is_empty() {
            *request.body_mut() = Some(payload.into());
        }

        Ok(request)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| PayPayError::config("credentials contain characters not allowed in headers"))
}

/// Flatten a body into sorted query pairs
///
/// The body must serialize to a JSON object. `null` fields are skipped, strings
/// are used verbatim, numbers and booleans use their JSON text, and arrays
/// repeat the key once per element. Nested objects are rejected.
pub fn flatten_query<B>(body: &B) -> Result<Vec<(String, String)>>
where
    B: Serialize + ?Sized,
{
    let value = serde_json::to_value(body).map_err(|e| PayPayError::serialization(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(PayPayError::serialization(
            "query parameters must serialize to an object",
        ));
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = query_scalar(&key, item)? {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = query_scalar(&key, other)? {
                    pairs.push((key, text));
                }
            }
        }
    }

    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(pairs)
}

fn query_scalar(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(PayPayError::serialization(format!(
            "query parameter {} must be a scalar or a list of scalars",
            key
        ))),
    }
}

/// Turn a response whose status is not `expected` into a business failure
pub(crate) fn ensure_status<T: HasResultInfo>(
    response: ApiResponse<T>,
    expected: StatusCode,
) -> Result<ApiResponse<T>> {
    if response.response.status == expected {
        return Ok(response);
    }

    Err(PayPayError::Api {
        result_info: response.data.result_info().clone(),
        response: response.response,
    })
}
