//! Tests for request signing and callback token verification

use super::jwt::{self, TokenVerifier};
use super::signature::{self, AuthHeader, SigningKey};
use crate::types::{ResponseToken, StandardClaims};
use crate::PayPayError;
use base64::{engine::general_purpose, Engine as _};
use jsonwebtoken::{Algorithm, EncodingKey, Header};

const API_KEY: &str = "test_key";
const API_SECRET: &str = "dGVzdF9zZWNyZXRfYnl0ZXM="; // base64("test_secret_bytes")
const BODY: &[u8] = br#"{"scopes":["continuous_payments"],"nonce":"n"}"#;

fn key() -> SigningKey<'static> {
    SigningKey::new(API_KEY, API_SECRET)
}

#[test]
fn test_auth_header_is_deterministic() {
    let a = signature::auth_header_at(key(), "POST", "/v1/qr/sessions", "application/json", BODY, "nonce-1", 1700000000);
    let b = signature::auth_header_at(key(), "POST", "/v1/qr/sessions", "application/json", BODY, "nonce-1", 1700000000);
    assert_eq!(a, b);
}

#[test]
fn test_auth_header_shape() {
    let header = signature::auth_header_at(key(), "POST", "/v1/qr/sessions", "application/json", BODY, "nonce-1", 1700000000);

    assert!(header.starts_with("hmac OPA-Auth:"));
    let rest = header.trim_start_matches("hmac OPA-Auth:");
    assert_eq!(rest.split(':').count(), 5);

    let fields = AuthHeader::parse(&header).unwrap();
    assert_eq!(fields.api_key, API_KEY);
    assert_eq!(fields.nonce, "nonce-1");
    assert_eq!(fields.epoch, 1700000000);
    assert_eq!(fields.signature.len(), 44); // base64 of 32 bytes
    assert_eq!(fields.body_hash.len(), 24); // base64 of 16 bytes
}

#[test]
fn test_signature_matches_canonical_string() {
    let (content_type, body_hash) = signature::body_hash("application/json", BODY);
    let message = signature::signing_string("/v1/qr/sessions", "POST", "nonce-1", 1700000000, &content_type, &body_hash);
    let expected = signature::sign(API_SECRET, &message);

    let header = signature::auth_header_at(key(), "POST", "/v1/qr/sessions", "application/json", BODY, "nonce-1", 1700000000);
    let fields = AuthHeader::parse(&header).unwrap();
    assert_eq!(fields.signature, expected);
    assert_eq!(fields.body_hash, body_hash);
}

#[test]
fn test_signing_string_layout() {
    let message = signature::signing_string("/v2/codes", "GET", "abc", 42, "empty", "empty");
    assert_eq!(message, "/v2/codes\nGET\nabc\n42\nempty\nempty");
}

#[test]
fn test_empty_body_uses_sentinel() {
    let (content_type, body_hash) = signature::body_hash("application/json", b"");
    assert_eq!(content_type, "empty");
    assert_eq!(body_hash, "empty");

    let (content_type, body_hash) = signature::body_hash("text/plain", b"");
    assert_eq!(content_type, "empty");
    assert_eq!(body_hash, "empty");

    let header = signature::auth_header_at(key(), "GET", "/v2/codes", "application/json", b"", "n", 1);
    assert!(header.ends_with(":empty"));
}

#[test]
fn test_body_hash_known_value() {
    // computed independently of the signer
    let digest = md5::compute(b"application/json{}");
    let expected = general_purpose::STANDARD.encode(digest.0);

    let (content_type, body_hash) = signature::body_hash("application/json", b"{}");
    assert_eq!(content_type, "application/json");
    assert_eq!(body_hash, expected);
}

#[test]
fn test_body_change_changes_signature() {
    let mut tampered = BODY.to_vec();
    let last = tampered.len() - 2;
    tampered[last] = b'm';

    let original = AuthHeader::parse(&signature::auth_header_at(key(), "POST", "/p", "application/json", BODY, "n", 1)).unwrap();
    let changed = AuthHeader::parse(&signature::auth_header_at(key(), "POST", "/p", "application/json", &tampered, "n", 1)).unwrap();

    assert_ne!(original.body_hash, changed.body_hash);
    assert_ne!(original.signature, changed.signature);
}

#[test]
fn test_secret_changes_signature() {
    let a = signature::auth_header_at(key(), "POST", "/p", "application/json", BODY, "n", 1);
    let b = signature::auth_header_at(SigningKey::new(API_KEY, "other"), "POST", "/p", "application/json", BODY, "n", 1);
    assert_ne!(a, b);
}

#[test]
fn test_fresh_nonce_per_call() {
    let a = AuthHeader::parse(&signature::auth_header(key(), "GET", "/p", "application/json", b"")).unwrap();
    let b = AuthHeader::parse(&signature::auth_header(key(), "GET", "/p", "application/json", b"")).unwrap();
    assert_ne!(a.nonce, b.nonce);
    assert!(a.epoch > 1600000000);
}

#[test]
fn test_auth_header_parse_rejects_bad_shape() {
    assert!(AuthHeader::parse("Bearer abc").is_none());
    assert!(AuthHeader::parse("hmac OPA-Auth:a:b:c:1").is_none());
    assert!(AuthHeader::parse("hmac OPA-Auth:a:b:c:notanumber:e").is_none());
}

#[test]
fn test_signing_key_debug_redacts_secret() {
    let debug = format!("{:?}", key());
    assert!(!debug.contains(API_SECRET));
}

fn raw_secret(secret: &str) -> Vec<u8> {
    general_purpose::STANDARD.decode(secret).unwrap()
}

fn claims(exp_offset: i64) -> ResponseToken {
    let now = chrono::Utc::now().timestamp();
    ResponseToken {
        standard: StandardClaims {
            iss: Some("paypay.ne.jp".to_string()),
            aud: Some("merchant".to_string()),
            iat: Some(now - 10),
            exp: Some(now + exp_offset),
            ..Default::default()
        },
        result: "succeeded".to_string(),
        profile_identifier: "profile-1".to_string(),
        nonce: "nonce-1".to_string(),
        user_authorization_id: "auth-1".to_string(),
        reference_id: "ref-1".to_string(),
    }
}

fn mint(claims: &ResponseToken, secret: &str, algorithm: Algorithm) -> String {
    jsonwebtoken::encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(&raw_secret(secret)),
    )
    .unwrap()
}

#[test]
fn test_token_roundtrip() {
    let expected = claims(300);
    let token = mint(&expected, API_SECRET, Algorithm::HS256);

    let parsed = TokenVerifier::new(API_SECRET).unwrap().parse(&token).unwrap();
    assert_eq!(parsed, expected);
    assert!(parsed.is_succeeded());
    assert_eq!(parsed.profile_identifier, "profile-1");
    assert_eq!(parsed.user_authorization_id, "auth-1");
    assert_eq!(parsed.reference_id, "ref-1");
}

#[test]
fn test_token_wrong_secret() {
    let token = mint(&claims(300), API_SECRET, Algorithm::HS256);
    let other = general_purpose::STANDARD.encode("another_secret");

    let result = jwt::parse_response_token(&token, &other);
    assert!(matches!(result, Err(PayPayError::InvalidSignature(_))));
}

#[test]
fn test_token_expired() {
    let token = mint(&claims(-60), API_SECRET, Algorithm::HS256);

    let result = jwt::parse_response_token(&token, API_SECRET);
    assert!(matches!(result, Err(PayPayError::ExpiredToken(_))));
}

#[test]
fn test_token_not_yet_valid() {
    let mut early = claims(300);
    early.standard.nbf = Some(chrono::Utc::now().timestamp() + 120);
    let token = mint(&early, API_SECRET, Algorithm::HS256);

    let result = jwt::parse_response_token(&token, API_SECRET);
    assert!(matches!(result, Err(PayPayError::ExpiredToken(_))));
}

#[test]
fn test_token_issued_in_future() {
    let mut future = claims(600);
    future.standard.iat = Some(chrono::Utc::now().timestamp() + 300);
    let token = mint(&future, API_SECRET, Algorithm::HS256);

    let result = jwt::parse_response_token(&token, API_SECRET);
    assert!(matches!(result, Err(PayPayError::ExpiredToken(_))));

    let parsed = TokenVerifier::new(API_SECRET)
        .unwrap()
        .with_leeway(600)
        .parse(&token);
    assert!(parsed.is_ok());
}

#[test]
fn test_token_without_time_claims() {
    let mut bare = claims(0);
    bare.standard = StandardClaims::default();
    let token = mint(&bare, API_SECRET, Algorithm::HS256);

    let parsed = jwt::parse_response_token(&token, API_SECRET).unwrap();
    assert_eq!(parsed.nonce, "nonce-1");
}

#[test]
fn test_token_malformed() {
    let verifier = TokenVerifier::new(API_SECRET).unwrap();

    for token in ["", "abc", "a.b", "a.b.c.d", "!!!.###.$$$"] {
        let result = verifier.parse(token);
        assert!(
            matches!(result, Err(PayPayError::MalformedToken(_))),
            "token {:?} gave {:?}",
            token,
            result
        );
    }
}

#[test]
fn test_token_hmac_family_accepted_by_default() {
    let token = mint(&claims(300), API_SECRET, Algorithm::HS512);
    assert!(jwt::parse_response_token(&token, API_SECRET).is_ok());
}

#[test]
fn test_token_pinned_algorithm() {
    let token = mint(&claims(300), API_SECRET, Algorithm::HS512);
    let verifier = TokenVerifier::new(API_SECRET)
        .unwrap()
        .with_algorithm(Algorithm::HS256)
        .unwrap();

    let result = verifier.parse(&token);
    assert!(matches!(result, Err(PayPayError::InvalidSignature(_))));

    assert!(TokenVerifier::new(API_SECRET)
        .unwrap()
        .with_algorithm(Algorithm::RS256)
        .is_err());
}

#[test]
fn test_secret_must_be_base64() {
    let result = TokenVerifier::new("not base64 !!");
    assert!(matches!(result, Err(PayPayError::Configuration(_))));
}
