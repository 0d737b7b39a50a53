//! Authenticated request dispatch
//!
//! [`ApiClient`] turns a [`RequestDescriptor`] into an authenticated HTTP call
//! and the response into an [`ApiResponse`] or an [`ApiError`].
//!
//! # Architecture
//!
//! Dispatch runs in two halves:
//! - [`ApiClient::prepare`] is pure: it resolves the path, encodes the query,
//!   negotiates `Content-Type`/`Accept`, merges headers and signs the request.
//!   Invalid input fails here, before any I/O.
//! - [`ApiClient::execute`] sends the prepared request, reads the whole body,
//!   lets the error classifier decide, and only then deserializes.
//!
//! Dropping the future returned by `execute` cancels the call. Classification
//! and deserialization happen after the body has been read and run without
//! further awaits, so a cancelled call never reaches them.
//!
//! # Examples
//!
//! ```no_run
//! use vr_payment::types::RequestDescriptor;
//! use vr_payment::{ApiClient, Configuration};
//!
//! # async fn example() -> vr_payment::Result<()> {
//! let config = Configuration::new(140366, "dvZsZdp+CLyi6RqBJuJER88CrrROHLz3VNuAkZI5U6s=")?;
//! let client = ApiClient::new(config)?;
//!
//! let request = RequestDescriptor::get(
//!     "HumanUsersRolesService.GetHumanUsersUserIdAccountRoles",
//!     "/human-users/{userId}/account-roles",
//! )
//! .path_param("userId", 1234)
//! .account(999);
//!
//! let response = client.execute::<serde_json::Value>(request).await?;
//! println!("{}: {}", response.status(), response.data());
//! # Ok(())
//! # }
//! ```

use crate::auth::{JwtSigner, RequestSigner, SigningContext};
use crate::classifier::{ErrorClassifier, StatusClassifier};
use crate::config::Configuration;
use crate::types::{ApiResponse, PreparedRequest, RawResponse, RequestDescriptor};
use crate::{ApiError, Result};
use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

#[cfg(test)]
mod tests;

/// Client dispatching authenticated requests against the API
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<Configuration>,
    http: reqwest::Client,
    signer: Arc<dyn RequestSigner>,
    classifier: Option<Arc<dyn ErrorClassifier>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("signer", &"<signer>")
            .field("classifier", &self.classifier.as_ref().map(|_| "<classifier>"))
            .finish()
    }
}

impl ApiClient {
    /// Create a client with the default signer and no custom classifier
    pub fn new(config: Configuration) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Start configuring a client
    pub fn builder(config: Configuration) -> ApiClientBuilder {
        ApiClientBuilder::new(config)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Base URL requests are sent to
    pub fn base_path(&self) -> &str {
        self.config.base_path()
    }

    /// Whether a custom error classifier is installed
    pub fn has_error_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    /// Build the outgoing request without sending it
    pub fn prepare(&self, request: &RequestDescriptor) -> Result<PreparedRequest> {
        let operation = request.operation();
        let path = request.resolve_path()?;
        let separator = if path.starts_with('/') { "" } else { "/" };
        let mut url = Url::parse(&format!("{}{}{}", self.config.base_path(), separator, path))
            .map_err(|e| ApiError::config(format!("Invalid request URL for {}: {}", operation, e)))?;

        let query = request.query_pairs();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let mut headers = self.config.default_headers().clone();
        if let Some(content_type) = request.content_type() {
            headers.insert(CONTENT_TYPE, header_value(operation, "Content-Type", &content_type)?);
        }
        if let Some(accept) = request.accept() {
            headers.insert(ACCEPT, header_value(operation, "Accept", &accept)?);
        }
        for (name, value) in request.header_params() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ApiError::validation(operation, format!("Invalid header name '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value(operation, name, value)?);
        }

        let body = request
            .body()
            .map(serde_json::to_vec)
            .transpose()?
            .map(Bytes::from);

        let path_and_query = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        let context = SigningContext {
            method: request.method(),
            path: &path_and_query,
            timestamp: chrono::Utc::now(),
            body: body.as_deref(),
            application_user_id: self.config.application_user_id(),
            authentication_key: self.config.authentication_key(),
        };
        headers.extend(self.signer.sign(&context)?);

        Ok(PreparedRequest {
            operation: operation.to_string(),
            operation_index: request.operation_index(),
            method: request.method().clone(),
            url,
            headers,
            body,
            timeout: request.timeout().unwrap_or_else(|| self.config.timeout()),
        })
    }

    /// Send a prepared request and read the whole response
    ///
    /// No classification happens here: any status is returned as a
    /// [`RawResponse`]. Only failures to obtain a response are errors.
    pub async fn send(&self, request: PreparedRequest) -> Result<RawResponse> {
        tracing::debug!(
            operation = %request.operation,
            operation_index = request.operation_index,
            method = %request.method,
            url = %request.url,
            "Sending API request"
        );

        let PreparedRequest {
            operation,
            method,
            url,
            headers,
            body,
            timeout,
            ..
        } = request;

        let mut builder = self
            .http
            .request(method, url)
            .headers(headers)
            .timeout(timeout);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(operation = %operation, error = %e, "API request failed");
            ApiError::transport(&operation, e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(&operation, e))?;

        tracing::debug!(operation = %operation, status = status.as_u16(), "Received API response");
        Ok(RawResponse::new(status, headers, body))
    }

    /// Ask the classifier whether `response` is an error
    ///
    /// The installed classifier goes first. A non-success status it lets
    /// through is still reported by [`StatusClassifier`].
    pub fn classify(&self, operation: &str, response: &RawResponse) -> Option<ApiError> {
        let error = self
            .classifier
            .as_ref()
            .and_then(|classifier| classifier.classify(operation, response))
            .or_else(|| StatusClassifier.classify(operation, response));

        if let Some(error) = &error {
            tracing::warn!(
                operation = %operation,
                status = response.status().as_u16(),
                error = %error,
                "API call returned an error"
            );
        }
        error
    }

    /// Dispatch a request and return the full response envelope
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<ApiResponse<T>> {
        let prepared = self.prepare(&request)?;
        let operation = prepared.operation.clone();
        let response = self.send(prepared).await?;

        if let Some(error) = self.classify(&operation, &response) {
            return Err(error);
        }

        let data = response
            .json::<T>()
            .map_err(|source| ApiError::Deserialization {
                operation,
                status: response.status().as_u16(),
                source,
            })?;
        let (status, headers, _) = response.into_parts();
        Ok(ApiResponse::new(status, headers, data))
    }

    /// Dispatch a request and return only the payload
    pub async fn execute_data<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        self.execute(request).await.map(ApiResponse::into_data)
    }
}

fn header_value(operation: &str, name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        ApiError::validation(operation, format!("Invalid value for header '{}': {}", name, e))
    })
}

/// Builder for [`ApiClient`]
pub struct ApiClientBuilder {
    config: Configuration,
    signer: Arc<dyn RequestSigner>,
    classifier: Option<Arc<dyn ErrorClassifier>>,
    http: Option<reqwest::Client>,
}

impl std::fmt::Debug for ApiClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientBuilder")
            .field("config", &self.config)
            .field("classifier", &self.classifier.as_ref().map(|_| "<classifier>"))
            .finish()
    }
}

impl ApiClientBuilder {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            signer: Arc::new(JwtSigner),
            classifier: None,
            http: None,
        }
    }

    /// Replace the request signer
    pub fn signer<S: RequestSigner + 'static>(mut self, signer: S) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    /// Replace the request signer with a closure
    pub fn signer_fn<F>(self, signer: F) -> Self
    where
        F: Fn(&SigningContext<'_>) -> Result<HeaderMap> + Send + Sync + 'static,
    {
        self.signer(signer)
    }

    /// Install the error classifier
    ///
    /// Fails if one is already installed; the builder is consumed, so neither
    /// classifier survives the failed call.
    pub fn error_classifier<C: ErrorClassifier + 'static>(mut self, classifier: C) -> Result<Self> {
        if self.classifier.is_some() {
            return Err(ApiError::config(
                "An error classifier is already installed; only one classifier per client is supported",
            ));
        }
        self.classifier = Some(Arc::new(classifier));
        Ok(self)
    }

    /// Install a closure as the error classifier
    pub fn error_classifier_fn<F>(self, classifier: F) -> Result<Self>
    where
        F: Fn(&str, &RawResponse) -> Option<ApiError> + Send + Sync + 'static,
    {
        self.error_classifier(classifier)
    }

    /// Use an existing HTTP client (and its connection pool)
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let http = match self.http {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(self.config.timeout())
                .build()
                .map_err(|e| ApiError::config(format!("Failed to create HTTP client: {}", e)))?,
        };

        Ok(ApiClient {
            config: Arc::new(self.config),
            http,
            signer: self.signer,
            classifier: self.classifier,
        })
    }
}
