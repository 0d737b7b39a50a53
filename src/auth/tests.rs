//! Tests for request signing

use super::{create_auth_header, generate_jwt, JwtOptions, JwtSigner, RequestSigner, SigningContext};
use crate::ApiError;
use base64::{engine::general_purpose, Engine as _};
use chrono::TimeZone;
use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue, Method};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

const USER_ID: u64 = 140366;
const KEY: &str = "dvZsZdp+CLyi6RqBJuJER88CrrROHLz3VNuAkZI5U6s=";

fn decode_claims(token: &str) -> serde_json::Value {
    let secret = general_purpose::STANDARD.decode(KEY).unwrap();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    jsonwebtoken::decode::<serde_json::Value>(
        token,
        &DecodingKey::from_secret(&secret),
        &validation,
    )
    .unwrap()
    .claims
}

#[test]
fn test_jwt_creation() {
    let options = JwtOptions::new(USER_ID, KEY, "get", "/api/v2.0/human-users/1/space-roles")
        .with_issued_at(1_700_000_000);
    let token = generate_jwt(options).unwrap();

    let claims = decode_claims(&token);
    assert_eq!(claims["sub"], "140366");
    assert_eq!(claims["iat"], 1_700_000_000);
    assert_eq!(claims["requestMethod"], "GET");
    assert_eq!(claims["requestPath"], "/api/v2.0/human-users/1/space-roles");
}

#[test]
fn test_auth_header_is_bearer() {
    let header =
        create_auth_header(JwtOptions::new(USER_ID, KEY, "POST", "/api/v2.0/x")).unwrap();
    assert!(header.starts_with("Bearer "));
}

#[test]
fn test_invalid_base64_key_is_signing_error() {
    let options = JwtOptions::new(USER_ID, "not base64!!", "GET", "/");
    let err = generate_jwt(options).unwrap_err();
    assert!(matches!(err, ApiError::Signing(_)));
}

#[test]
fn test_jwt_signer_binds_method_and_path() {
    let method = Method::PATCH;
    let context = SigningContext {
        method: &method,
        path: "/api/v2.0/payment/web-apps/refunds/5?expand=a",
        timestamp: chrono::Utc.timestamp_opt(1_700_000_123, 0).unwrap(),
        body: Some(b"{}"),
        application_user_id: USER_ID,
        authentication_key: KEY,
    };

    let headers = JwtSigner.sign(&context).unwrap();
    let value = headers.get(AUTHORIZATION).unwrap();
    assert!(value.is_sensitive());

    let token = value.to_str().unwrap().trim_start_matches("Bearer ");
    let claims = decode_claims(token);
    assert_eq!(claims["requestMethod"], "PATCH");
    assert_eq!(
        claims["requestPath"],
        "/api/v2.0/payment/web-apps/refunds/5?expand=a"
    );
    assert_eq!(claims["iat"], 1_700_000_123);
}

fn static_signer(context: &SigningContext<'_>) -> crate::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert("x-user-id", HeaderValue::from(context.application_user_id));
    Ok(headers)
}

#[test]
fn test_functions_are_signers() {
    let method = Method::GET;
    let context = SigningContext {
        method: &method,
        path: "/",
        timestamp: chrono::Utc::now(),
        body: None,
        application_user_id: USER_ID,
        authentication_key: KEY,
    };

    let headers = static_signer.sign(&context).unwrap();
    assert_eq!(headers.get("x-user-id").unwrap(), "140366");
}

#[test]
fn test_signing_context_debug_redacts_key() {
    let method = Method::GET;
    let context = SigningContext {
        method: &method,
        path: "/",
        timestamp: chrono::Utc::now(),
        body: None,
        application_user_id: USER_ID,
        authentication_key: KEY,
    };
    assert!(!format!("{:?}", context).contains(KEY));
}
