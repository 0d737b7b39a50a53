//! Error classification
//!
//! After a response has been read, and before its body is deserialized, the
//! client asks an [`ErrorClassifier`] whether the response is an error. A client
//! holds at most one classifier; without one, [`StatusClassifier`] applies.

use crate::types::RawResponse;
use crate::ApiError;

/// Hook deciding whether a response becomes an [`ApiError`]
pub trait ErrorClassifier: Send + Sync {
    /// Return `Some(error)` to fail the call, `None` to accept the response
    fn classify(&self, operation: &str, response: &RawResponse) -> Option<ApiError>;
}

impl<F> ErrorClassifier for F
where
    F: Fn(&str, &RawResponse) -> Option<ApiError> + Send + Sync,
{
    fn classify(&self, operation: &str, response: &RawResponse) -> Option<ApiError> {
        self(operation, response)
    }
}

/// Treats every status outside 2xx as an [`ApiError::Api`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusClassifier;

impl ErrorClassifier for StatusClassifier {
    fn classify(&self, operation: &str, response: &RawResponse) -> Option<ApiError> {
        if response.is_success() {
            return None;
        }

        let body = serde_json::from_slice::<serde_json::Value>(response.body())
            .ok()
            .filter(|value| !value.is_null());
        let message = body
            .as_ref()
            .and_then(message_from_json)
            .or_else(|| {
                let text = response.text();
                let text = text.trim();
                (!text.is_empty() && body.is_none()).then(|| text.to_string())
            })
            .unwrap_or_else(|| {
                response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string()
            });

        Some(ApiError::Api {
            operation: operation.to_string(),
            status: response.status().as_u16(),
            message,
            body,
        })
    }
}

/// First non-empty of `message`, `defaultMessage` and `error`
fn message_from_json(body: &serde_json::Value) -> Option<String> {
    ["message", "defaultMessage", "error"]
        .iter()
        .filter_map(|key| body.get(key))
        .filter_map(|value| value.as_str())
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}
