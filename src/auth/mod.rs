//! Request authentication
//!
//! Every outgoing request is passed through a [`RequestSigner`] after it has
//! been fully assembled. The signer sees the credentials from the
//! [`Configuration`](crate::Configuration) together with the method, the path
//! (base path and query included), the time of signing and the serialized body,
//! and returns the headers that authenticate the request.
//!
//! # Architecture
//!
//! - [`RequestSigner`] - the strategy interface, also implemented for closures
//! - [`SigningContext`] - everything a signer may read
//! - [`jwt`] - [`JwtSigner`], the strategy installed by default
//!
//! The canonical form the service expects is owned by the service, not by this
//! crate. Swap the signer through
//! [`ApiClientBuilder::signer`](crate::client::ApiClientBuilder::signer) when
//! the service documents a different scheme.
//!
//! # Examples
//!
//! ```
//! use vr_payment::auth::SigningContext;
//! use vr_payment::{ApiClient, Configuration};
//! use http::{HeaderMap, HeaderValue};
//!
//! # fn example() -> vr_payment::Result<()> {
//! let config = Configuration::new(140366, "dvZsZdp+CLyi6RqBJuJER88CrrROHLz3VNuAkZI5U6s=")?;
//! let client = ApiClient::builder(config)
//!     .signer_fn(|ctx: &SigningContext<'_>| {
//!         let mut headers = HeaderMap::new();
//!         headers.insert("x-user-id", HeaderValue::from(ctx.application_user_id));
//!         Ok(headers)
//!     })
//!     .build()?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

use crate::Result;
use chrono::{DateTime, Utc};
use http::{HeaderMap, Method};

pub mod jwt;

#[cfg(test)]
mod tests;

pub use jwt::{create_auth_header, generate_jwt, JwtOptions, JwtSigner};

/// Inputs available to a [`RequestSigner`]
#[derive(Clone, Copy)]
pub struct SigningContext<'a> {
    /// HTTP method of the request
    pub method: &'a Method,
    /// Path and query as sent, base path included (e.g. `/api/v2.0/human-users/1/space-roles?roleId=2`)
    pub path: &'a str,
    /// Moment the request is signed
    pub timestamp: DateTime<Utc>,
    /// Serialized request body, if any
    pub body: Option<&'a [u8]>,
    /// Application user id from the configuration
    pub application_user_id: u64,
    /// Authentication key from the configuration
    pub authentication_key: &'a str,
}

impl std::fmt::Debug for SigningContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningContext")
            .field("method", self.method)
            .field("path", &self.path)
            .field("timestamp", &self.timestamp)
            .field("body_len", &self.body.map(<[u8]>::len))
            .field("application_user_id", &self.application_user_id)
            .field("authentication_key", &"<redacted>")
            .finish()
    }
}

/// Strategy turning credentials and a request into authentication headers
pub trait RequestSigner: Send + Sync {
    /// Produce the headers that authenticate this request
    fn sign(&self, context: &SigningContext<'_>) -> Result<HeaderMap>;
}

impl<F> RequestSigner for F
where
    F: Fn(&SigningContext<'_>) -> Result<HeaderMap> + Send + Sync,
{
    fn sign(&self, context: &SigningContext<'_>) -> Result<HeaderMap> {
        self(context)
    }
}
