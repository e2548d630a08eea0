//! Types shared by every gateway endpoint

use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

/// Result block carried by every gateway response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    /// Result code, e.g. `SUCCESS` or `INVALID_PARAMS`
    #[serde(default)]
    pub code: String,
    /// Human-readable result message
    #[serde(default)]
    pub message: String,
    /// Numeric code identifier
    #[serde(rename = "codeId", default)]
    pub code_id: String,
}

impl ResultInfo {
    /// Whether the gateway reported success
    pub fn is_success(&self) -> bool {
        self.code == "SUCCESS"
    }
}

/// Status and headers of a gateway response, kept after the body is consumed
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
}

impl HttpResponse {
    pub(crate) fn from_reqwest(response: &reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
        }
    }
}

/// Decoded response body together with its HTTP metadata
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// Decoded body
    pub data: T,
    /// Status and headers
    pub response: HttpResponse,
}

/// Outcome of copying a response body into a byte sink
#[derive(Debug)]
pub struct RawResponse {
    /// Status and headers
    pub response: HttpResponse,
    /// Number of bytes written into the sink
    pub bytes_written: u64,
    /// Sink failure, if the copy stopped early
    pub copy_error: Option<std::io::Error>,
}
