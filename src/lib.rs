//! # VR Payment Rust SDK
//!
//! An **async, type-safe** client for the VR Payment web service API.
//!
//! ## Features
//!
//! - 🔐 **Signed requests**: Every call carries credentials derived from the application user id and key
//! - 🧭 **Declarative requests**: Operations are described by a [`RequestDescriptor`] and dispatched by one client
//! - 🧩 **Pluggable seams**: Swap the [`RequestSigner`] or install an [`ErrorClassifier`]
//! - 🧾 **Typed errors**: Validation, transport, API and deserialization failures are distinct [`ApiError`] variants
//! - 🧪 **Tested against a mock server**: Dispatch and every service are covered with `mockito`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vr_payment::service::ExpressCheckoutService;
//! use vr_payment::{ApiClient, Configuration};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credentials of the application user
//!     let config = Configuration::builder(140366, "dvZsZdp+CLyi6RqBJuJER88CrrROHLz3VNuAkZI5U6s=")
//!         .with_timeout(std::time::Duration::from_secs(30))
//!         .build()?;
//!
//!     let client = Arc::new(ApiClient::new(config)?);
//!     let checkout = ExpressCheckoutService::new(client);
//!
//!     let session: serde_json::Value = checkout
//!         .post_express_checkout_create_session(
//!             82470,
//!             &serde_json::json!({ "currency": "EUR" }),
//!         )
//!         .await?;
//!     println!("{}", session);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`config`**: Credentials, base path, timeout and default headers
//! - **`auth`**: Request signing, JWT by default
//! - **`types`**: Request descriptors and response envelopes
//! - **`client`**: Dispatch of descriptors over HTTP
//! - **`classifier`**: Mapping of responses to errors
//! - **`service`**: Per-resource operations built on the client
//! - **`error`**: Error type shared by all of the above

pub mod auth;
pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod service;
pub mod types;

// Re-exports for convenience
pub use auth::{JwtSigner, RequestSigner, SigningContext};
pub use classifier::{ErrorClassifier, StatusClassifier};
pub use client::{ApiClient, ApiClientBuilder};
pub use config::{Configuration, ConfigurationBuilder};
pub use error::{ApiError, Result};
pub use types::{ApiResponse, RawResponse, RequestDescriptor};

/// Current version of the SDK
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
