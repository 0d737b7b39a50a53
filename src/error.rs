//! Error types for the VR Payment client
//!
//! Every failure the client can report is one [`ApiError`] variant. The variants
//! separate failures that never left the process (validation, configuration,
//! serialization, signing) from failures of the round-trip itself (transport)
//! and from responses the server produced (API errors, undecodable bodies).

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by the VR Payment client
#[derive(Debug, Error)]
pub enum ApiError {
    /// A request could not be built from the caller's input. No request was sent.
    #[error("Invalid request for {operation}: {message}")]
    Validation { operation: String, message: String },

    /// The client or its configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication headers could not be computed.
    #[error("Failed to sign request: {0}")]
    Signing(String),

    /// No response was obtained (connection, DNS, TLS or timeout failure).
    #[error("Transport error calling {operation}: {source}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Error calling {operation}: HTTP {status}: {message}")]
    Api {
        operation: String,
        status: u16,
        message: String,
        /// Structured error payload, when the server sent JSON
        body: Option<serde_json::Value>,
    },

    /// A success response did not match the expected result type.
    #[error("Failed to deserialize response of {operation} (HTTP {status}): {source}")]
    Deserialization {
        operation: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a client-side validation error
    pub fn validation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a signing error
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing(message.into())
    }

    /// Create an API error without a structured body
    pub fn api(operation: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            operation: operation.into(),
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Create a transport error
    pub fn transport(operation: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            operation: operation.into(),
            source,
        }
    }

    /// HTTP status carried by the error, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Deserialization { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Operation the error was raised for, if known
    pub fn operation(&self) -> Option<&str> {
        match self {
            Self::Validation { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Api { operation, .. }
            | Self::Deserialization { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// Whether the request failed before reaching the network
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Config(_) | Self::Serialization(_) | Self::Signing(_)
        )
    }

    /// Whether no response was obtained
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Whether the call timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}
