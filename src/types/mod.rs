//! Wire types for the PayPay Open Payment API
//!
//! Request and response shapes are plain data holders; their only behaviour is
//! the serde tagging that maps Rust field names onto the gateway's camelCase
//! wire names.
//!
//! - [`common`] - result block and HTTP metadata shared by every endpoint
//! - [`account_link`] - account-link QR code request/response and callback token claims
//! - [`constants`] - endpoints, header names and scopes
//!
//! # Examples
//!
//! ```
//! use paypay_opa::types::{scopes, CreateAccountLinkQrCodeRequest, RedirectType};
//!
//! let request = CreateAccountLinkQrCodeRequest::new(
//!     vec![scopes::CONTINUOUS_PAYMENTS.to_string()],
//!     "5c8f1c2e-6f0c-4a8e-9f0e-0f6d2a1d8b11",
//!     "https://merchant.example.com/confirm",
//!     "order-1001",
//! )
//! .with_redirect_type(RedirectType::WebLink);
//!
//! let body = serde_json::to_string(&request).unwrap();
//! assert!(body.contains("\"redirectType\":\"WEB_LINK\""));
//! ```

pub mod account_link;
pub mod common;
pub mod constants;

pub use account_link::{
    AccountLinkQrCodeData, CreateAccountLinkQrCodeRequest, CreateAccountLinkQrCodeResponse,
    RedirectType, ResponseToken, StandardClaims,
};
pub use common::{ApiResponse, HttpResponse, RawResponse, ResultInfo};
pub use constants::{endpoints, headers, scopes, EMPTY_SENTINEL};
