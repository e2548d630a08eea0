//! OPA-Auth request signing
//!
//! Every request carries an `Authorization` header the gateway recomputes:
//!
//! ```text
//! hmac OPA-Auth:<api key>:<signature>:<nonce>:<epoch>:<body hash>
//! ```
//!
//! `signature` is `base64(HMAC-SHA256(secret, signing string))` where the signing
//! string is the newline-joined sequence path, method, nonce, epoch, content type,
//! body hash. The body hash is `base64(MD5(content type || body))`, or the literal
//! `empty` (for both content type and hash) when there is no body.

use crate::types::{headers, EMPTY_SENTINEL};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// API key and secret used to sign requests
#[derive(Clone, Copy)]
pub struct SigningKey<'a> {
    /// API key, sent in clear in the header
    pub api_key: &'a str,
    /// Shared secret, never sent
    pub api_secret: &'a str,
}

impl<'a> SigningKey<'a> {
    /// Create a new signing key
    pub fn new(api_key: &'a str, api_secret: &'a str) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }
}

impl std::fmt::Debug for SigningKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Generate a fresh request nonce
pub fn generate_nonce() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time in whole seconds since the Unix epoch
pub fn current_epoch() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Content type and body hash as they appear in the signing string
pub fn body_hash(content_type: &str, body: &[u8]) -> (String, String) {
    if body.is_empty() {
        return (EMPTY_SENTINEL.to_string(), EMPTY_SENTINEL.to_string());
    }

    let mut context = md5::Context::new();
    context.consume(content_type.as_bytes());
    context.consume(body);
    let digest = context.compute();

    (
        content_type.to_string(),
        general_purpose::STANDARD.encode(digest.0),
    )
}

/// Build the canonical string the signature is computed over
///
/// `path` must not carry a query component.
pub fn signing_string(
    path: &str,
    method: &str,
    nonce: &str,
    epoch: i64,
    auth_content_type: &str,
    body_hash: &str,
) -> String {
    let epoch = epoch.to_string();
    [
        path,
        method,
        nonce,
        epoch.as_str(),
        auth_content_type,
        body_hash,
    ]
    .join("\n")
}

/// `base64(HMAC-SHA256(secret, message))`
pub fn sign(api_secret: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(api_secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// Compute the Authorization header with a fresh nonce and the current time
pub fn auth_header(
    key: SigningKey<'_>,
    method: &str,
    path: &str,
    content_type: &str,
    body: &[u8],
) -> String {
    auth_header_at(
        key,
        method,
        path,
        content_type,
        body,
        &generate_nonce(),
        current_epoch(),
    )
}

/// Compute the Authorization header for a given nonce and epoch
pub fn auth_header_at(
    key: SigningKey<'_>,
    method: &str,
    path: &str,
    content_type: &str,
    body: &[u8],
    nonce: &str,
    epoch: i64,
) -> String {
    let (auth_content_type, body_hash) = body_hash(content_type, body);
    let message = signing_string(path, method, nonce, epoch, &auth_content_type, &body_hash);
    let signature = sign(key.api_secret, &message);

    let epoch = epoch.to_string();
    let fields = [
        key.api_key,
        signature.as_str(),
        nonce,
        epoch.as_str(),
        body_hash.as_str(),
    ];

    format!("{}:{}", headers::AUTH_SCHEME, fields.join(":"))
}

/// Fields of an OPA-Auth header value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeader {
    /// API key
    pub api_key: String,
    /// Base64 HMAC-SHA256 signature
    pub signature: String,
    /// Request nonce
    pub nonce: String,
    /// Seconds since epoch
    pub epoch: i64,
    /// Base64 MD5 body hash, or `empty`
    pub body_hash: String,
}

impl AuthHeader {
    /// Split a header value into its fields
    ///
    /// Returns `None` unless the value has the OPA-Auth prefix followed by
    /// exactly five colon-separated fields.
    pub fn parse(value: &str) -> Option<Self> {
        let rest = value
            .strip_prefix(headers::AUTH_SCHEME)?
            .strip_prefix(':')?;
        let fields: Vec<&str> = rest.split(':').collect();
        let [api_key, signature, nonce, epoch, body_hash] = fields.as_slice() else {
            return None;
        };

        Some(Self {
            api_key: api_key.to_string(),
            signature: signature.to_string(),
            nonce: nonce.to_string(),
            epoch: epoch.parse().ok()?,
            body_hash: body_hash.to_string(),
        })
    }
}
