//! Cryptographic utilities for the PayPay API
//!
//! - [`signature`] - OPA-Auth request signing (HMAC-SHA256 over a canonical string)
//! - [`jwt`] - verification of the callback token issued after an account link
//!
//! # Examples
//!
//! ## Signing a request
//!
//! ```
//! use paypay_opa::crypto::signature::{self, AuthHeader, SigningKey};
//!
//! let key = SigningKey::new("api_key", "api_secret");
//! let header = signature::auth_header(
//!     key,
//!     "POST",
//!     "/v1/qr/sessions",
//!     "application/json",
//!     br#"{"nonce":"abc"}"#,
//! );
//!
//! let fields = AuthHeader::parse(&header).unwrap();
//! assert_eq!(fields.api_key, "api_key");
//! ```
//!
//! ## Verifying a callback token
//!
//! ```no_run
//! use paypay_opa::crypto::jwt::TokenVerifier;
//!
//! # fn example(response_token: &str) -> paypay_opa::Result<()> {
//! let verifier = TokenVerifier::new("c2VjcmV0")?;
//! let claims = verifier.parse(response_token)?;
//! println!("authorization id: {}", claims.user_authorization_id);
//! # Ok(())
//! # }
//! ```

pub mod jwt;
pub mod signature;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use jwt::{parse_response_token, TokenVerifier};
pub use signature::{auth_header, auth_header_at, AuthHeader, SigningKey};
