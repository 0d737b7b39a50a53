//! Client configuration
//!
//! A [`Configuration`] carries everything a request needs that does not come
//! from the individual operation: where the API lives, who is calling, the
//! secret used to authenticate the caller, how long to wait, and headers sent
//! with every request. It is validated once when built and never changes
//! afterwards, so one instance can be shared by any number of concurrent calls.
//!
//! # Examples
//!
//! ```
//! use vr_payment::Configuration;
//! use std::time::Duration;
//!
//! # fn example() -> vr_payment::Result<()> {
//! let config = Configuration::builder(140366, "dvZsZdp+CLyi6RqBJuJER88CrrROHLz3VNuAkZI5U6s=")
//!     .with_timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! assert_eq!(config.application_user_id(), 140366);
//! # Ok(())
//! # }
//! ```

use crate::{ApiError, Result};
use http::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::env;
use std::time::Duration;

/// Default API base path
pub const DEFAULT_BASE_PATH: &str = "https://gateway.vr-payment.de/api/v2.0";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

/// Environment variable holding the application user id
pub const ENV_USER_ID: &str = "VRPAYMENT_USER_ID";
/// Environment variable holding the authentication key
pub const ENV_AUTH_KEY: &str = "VRPAYMENT_AUTH_KEY";
/// Environment variable overriding the base path
pub const ENV_BASE_PATH: &str = "VRPAYMENT_BASE_PATH";
/// Environment variable overriding the timeout, in seconds
pub const ENV_TIMEOUT_SECS: &str = "VRPAYMENT_TIMEOUT_SECS";

/// Immutable client configuration
#[derive(Clone)]
pub struct Configuration {
    base_path: String,
    application_user_id: u64,
    authentication_key: String,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("base_path", &self.base_path)
            .field("application_user_id", &self.application_user_id)
            .field("authentication_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

impl Configuration {
    /// Create a configuration with the default base path and timeout
    pub fn new(application_user_id: u64, authentication_key: impl Into<String>) -> Result<Self> {
        Self::builder(application_user_id, authentication_key).build()
    }

    /// Start building a configuration
    pub fn builder(
        application_user_id: u64,
        authentication_key: impl Into<String>,
    ) -> ConfigurationBuilder {
        ConfigurationBuilder::new(application_user_id, authentication_key)
    }

    /// Build a configuration from `VRPAYMENT_*` environment variables
    pub fn from_env() -> Result<Self> {
        let user_id = env::var(ENV_USER_ID)
            .map_err(|_| ApiError::config(format!("Missing credentials: {} must be set", ENV_USER_ID)))?;
        let user_id = user_id.trim().parse::<u64>().map_err(|e| {
            ApiError::config(format!("{} is not a valid user id: {}", ENV_USER_ID, e))
        })?;
        let key = env::var(ENV_AUTH_KEY).unwrap_or_default();

        let mut builder = Self::builder(user_id, key);
        if let Ok(base_path) = env::var(ENV_BASE_PATH) {
            builder = builder.with_base_path(base_path);
        }
        if let Ok(secs) = env::var(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                ApiError::config(format!("{} is not a number of seconds: {}", ENV_TIMEOUT_SECS, e))
            })?;
            builder = builder.with_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    /// Base URL every request path is appended to, without trailing slash
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Numeric id of the application user making the calls
    pub fn application_user_id(&self) -> u64 {
        self.application_user_id
    }

    /// Authentication key as issued by the service (base64 text)
    pub fn authentication_key(&self) -> &str {
        &self.authentication_key
    }

    /// Timeout applied to each request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Headers sent with every request
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }
}

/// Builder for [`Configuration`]
#[derive(Clone)]
pub struct ConfigurationBuilder {
    base_path: String,
    application_user_id: u64,
    authentication_key: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
}

impl std::fmt::Debug for ConfigurationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationBuilder")
            .field("base_path", &self.base_path)
            .field("application_user_id", &self.application_user_id)
            .field("authentication_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

impl ConfigurationBuilder {
    /// Create a builder with the given credentials
    pub fn new(application_user_id: u64, authentication_key: impl Into<String>) -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            application_user_id,
            authentication_key: authentication_key.into(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: Vec::new(),
        }
    }

    /// Override the base path
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header sent with every request
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Validate the settings without building
    pub fn validate(&self) -> Result<()> {
        if self.application_user_id == 0 {
            return Err(ApiError::config("Application user id must be set"));
        }

        if self.authentication_key.trim().is_empty() {
            return Err(ApiError::config("Authentication key must be set"));
        }

        if self.base_path.is_empty() {
            return Err(ApiError::config("Base path cannot be empty"));
        }

        if !self.base_path.starts_with("http://") && !self.base_path.starts_with("https://") {
            return Err(ApiError::config(
                "Base path must start with http:// or https://",
            ));
        }

        url::Url::parse(&self.base_path)
            .map_err(|e| ApiError::config(format!("Invalid base path {}: {}", self.base_path, e)))?;

        if self.timeout.is_zero() {
            return Err(ApiError::config("Timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<Configuration> {
        self.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("vr-payment-rust/", env!("CARGO_PKG_VERSION"))),
        );
        for (name, value) in &self.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::config(format!("Invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ApiError::config(format!("Invalid value for header {}: {}", name, e))
            })?;
            default_headers.insert(name, value);
        }

        Ok(Configuration {
            base_path: self.base_path.trim_end_matches('/').to_string(),
            application_user_id: self.application_user_id,
            authentication_key: self.authentication_key,
            timeout: self.timeout,
            default_headers,
        })
    }
}
