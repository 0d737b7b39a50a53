//! JWT request signing
//!
//! Signs each request with an HS256 JWT keyed by the base64-decoded
//! authentication key. The token names the application user as subject and
//! binds the request method and path, so a captured token cannot be replayed
//! against another endpoint.

use super::{RequestSigner, SigningContext};
use crate::{ApiError, Result};
use base64::{engine::general_purpose, Engine as _};
use http::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use jsonwebtoken::{Algorithm, EncodingKey, Header};

/// JWT claims for request authentication
#[derive(Debug, serde::Serialize)]
struct Claims {
    sub: String,
    iat: i64,
    #[serde(rename = "requestPath")]
    request_path: String,
    #[serde(rename = "requestMethod")]
    request_method: String,
}

/// JWT options for authentication
#[derive(Clone)]
pub struct JwtOptions {
    pub application_user_id: u64,
    pub authentication_key: String,
    pub request_method: String,
    pub request_path: String,
    pub issued_at: i64,
}

impl std::fmt::Debug for JwtOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtOptions")
            .field("application_user_id", &self.application_user_id)
            .field("authentication_key", &"<redacted>")
            .field("request_method", &self.request_method)
            .field("request_path", &self.request_path)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

impl JwtOptions {
    /// Create new JWT options issued now
    pub fn new(
        application_user_id: u64,
        authentication_key: impl Into<String>,
        request_method: impl Into<String>,
        request_path: impl Into<String>,
    ) -> Self {
        Self {
            application_user_id,
            authentication_key: authentication_key.into(),
            request_method: request_method.into(),
            request_path: request_path.into(),
            issued_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Override the issue time
    pub fn with_issued_at(mut self, issued_at: i64) -> Self {
        self.issued_at = issued_at;
        self
    }
}

/// Generate a JWT for one request
pub fn generate_jwt(options: JwtOptions) -> Result<String> {
    let secret = general_purpose::STANDARD
        .decode(options.authentication_key.trim())
        .map_err(|e| ApiError::signing(format!("Authentication key is not valid base64: {}", e)))?;

    let claims = Claims {
        sub: options.application_user_id.to_string(),
        iat: options.issued_at,
        request_path: options.request_path,
        request_method: options.request_method.to_uppercase(),
    };

    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(&secret);
    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| ApiError::signing(format!("JWT encoding failed: {}", e)))
}

/// Create an `Authorization` header value for one request
pub fn create_auth_header(options: JwtOptions) -> Result<String> {
    let token = generate_jwt(options)?;
    Ok(format!("Bearer {}", token))
}

/// Signer attaching `Authorization: Bearer <jwt>` to every request
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtSigner;

impl RequestSigner for JwtSigner {
    fn sign(&self, context: &SigningContext<'_>) -> Result<HeaderMap> {
        let options = JwtOptions::new(
            context.application_user_id,
            context.authentication_key,
            context.method.as_str(),
            context.path,
        )
        .with_issued_at(context.timestamp.timestamp());

        let value = create_auth_header(options)?;
        let mut value = HeaderValue::from_str(&value)
            .map_err(|e| ApiError::signing(format!("Invalid authorization header: {}", e)))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}
