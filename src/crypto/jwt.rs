//! Callback token verification
//!
//! After an account link the gateway redirects the user back with a
//! `responseToken` query parameter: a compact JWT signed with the merchant's API
//! secret. The verification key is the base64-decoded secret.

use crate::types::ResponseToken;
use crate::{PayPayError, Result};
use base64::{engine::general_purpose, Engine as _};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

/// HMAC algorithms a token header may declare
pub const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Verifies and decodes callback tokens
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    algorithms: Vec<Algorithm>,
    leeway: u64,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("key", &"<redacted>")
            .field("algorithms", &self.algorithms)
            .field("leeway", &self.leeway)
            .finish()
    }
}

impl TokenVerifier {
    /// Create a verifier from the base64-encoded API secret
    ///
    /// Any HMAC algorithm declared by the token header is accepted until
    /// [`with_algorithm`](Self::with_algorithm) pins one.
    pub fn new(api_secret: &str) -> Result<Self> {
        let secret = general_purpose::STANDARD
            .decode(api_secret)
            .map_err(|e| PayPayError::config(format!("api secret is not valid base64: {}", e)))?;

        Ok(Self {
            key: DecodingKey::from_secret(&secret),
            algorithms: HMAC_ALGORITHMS.to_vec(),
            leeway: 0,
        })
    }

    /// Accept only tokens signed with `algorithm`
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Result<Self> {
        if !HMAC_ALGORITHMS.contains(&algorithm) {
            return Err(PayPayError::config(format!(
                "{:?} is not an HMAC algorithm",
                algorithm
            )));
        }
        self.algorithms = vec![algorithm];
        Ok(self)
    }

    /// Tolerate this many seconds of clock skew on time claims
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway = seconds;
        self
    }

    /// Verify the signature and time claims, then decode the claims
    pub fn parse(&self, token: &str) -> Result<ResponseToken> {
        let mut validation = Validation::new(self.algorithms[0]);
        validation.algorithms = self.algorithms.clone();
        validation.leeway = self.leeway;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<ResponseToken>(token, &self.key, &validation)
            .map_err(map_jwt_error)?;
        let claims = data.claims;

        if let Some(iat) = claims.standard.iat {
            let now = chrono::Utc::now().timestamp();
            if iat > now.saturating_add(self.leeway as i64) {
                return Err(PayPayError::expired_token("token used before issued"));
            }
        }

        Ok(claims)
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> PayPayError {
    match err.kind() {
        ErrorKind::InvalidSignature => PayPayError::invalid_signature("signature mismatch"),
        ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
            PayPayError::invalid_signature(format!("unexpected signing algorithm: {}", err))
        }
        ErrorKind::ExpiredSignature => PayPayError::expired_token("token is expired"),
        ErrorKind::ImmatureSignature => PayPayError::expired_token("token is not valid yet"),
        _ => PayPayError::malformed_token(err.to_string()),
    }
}

/// Verify a callback token with the base64-encoded API secret
pub fn parse_response_token(token: &str, api_secret: &str) -> Result<ResponseToken> {
    TokenVerifier::new(api_secret)?.parse(token)
}
