//! # PayPay Open Payment API client
//!
//! A typed Rust client for the PayPay merchant gateway. It signs every request
//! with the gateway's `hmac OPA-Auth` scheme, dispatches it over a pluggable
//! HTTP transport and decodes the JSON response. It also verifies the signed
//! token the gateway issues at the end of an account-link flow.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paypay_opa::{Client, ClientConfig, PayPayError, RequestContext};
//! use paypay_opa::types::{scopes, CreateAccountLinkQrCodeRequest, RedirectType};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(
//!         ClientConfig::new("api_key", "api_secret", "merchant_id").with_sandbox(),
//!     )?;
//!
//!     let request = CreateAccountLinkQrCodeRequest::new(
//!         vec![scopes::CONTINUOUS_PAYMENTS.to_string()],
//!         uuid::Uuid::new_v4().to_string(),
//!         "https://merchant.example.com/confirm",
//!         uuid::Uuid::new_v4().to_string(),
//!     )
//!     .with_redirect_type(RedirectType::WebLink);
//!
//!     let ctx = RequestContext::new().with_timeout(Duration::from_secs(10));
//!     match client.create_account_link_qr_code(&ctx, &request).await {
//!         Ok(response) => println!("redirect to {:?}", response.data.link_qr_code_url()),
//!         Err(PayPayError::Api { result_info, .. }) => {
//!             println!("rejected: {} {}", result_info.code, result_info.message)
//!         }
//!         Err(err) => return Err(err.into()),
//!     }
//!
//!     // Later, on the redirect callback:
//!     // let claims = client.parse_response_token(&response_token)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`config`**: credentials, endpoint selection (production/sandbox), timeout
//! - **`crypto`**: OPA-Auth request signing and callback token verification
//! - **`client`**: request building, dispatch with cancellation, typed operations
//! - **`types`**: wire types for requests, responses and token claims
//! - **`error`**: one error enum separating transport, cancellation, decode and
//!   business failures
//!
//! ## Error model
//!
//! A request that never got a response fails with `Transport` or `Cancelled`.
//! A response whose body does not decode fails with `Decode`, which still
//! carries the status and headers. A response with the wrong status for the
//! endpoint fails with `Api`, carrying the gateway's `resultInfo`. Nothing is
//! retried.

pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use client::{Client, HttpTransport, Method, RequestContext};
pub use config::ClientConfig;
pub use crypto::TokenVerifier;
pub use error::{BoxError, CancelReason, PayPayError, Result};
pub use types::*;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(endpoints::PRODUCTION, "https://api.paypay.ne.jp");
        assert_eq!(endpoints::SANDBOX, "https://stg-api.sandbox.paypay.ne.jp");
    }

    #[test]
    fn test_client_from_config() {
        let client = Client::new(ClientConfig::new("key", "secret", "merchant").with_sandbox()).unwrap();
        assert_eq!(client.endpoint().as_str(), "https://stg-api.sandbox.paypay.ne.jp/");
        assert_eq!(client.merchant(), "merchant");
    }
}
