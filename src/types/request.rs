//! Request descriptor and prepared request types

use crate::{ApiError, Result};
use bytes::Bytes;
use http::{HeaderMap, Method};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// JSON media type
pub const APPLICATION_JSON: &str = "application/json";

/// Characters kept verbatim in a path segment (RFC 3986 unreserved)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// How a collection-valued query parameter is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionFormat {
    /// One `key=value` entry per value
    #[default]
    Multi,
    /// One entry, values joined by `,`
    Csv,
    /// One entry, values joined by a space
    Ssv,
    /// One entry, values joined by a tab
    Tsv,
    /// One entry, values joined by `|`
    Pipes,
}

impl CollectionFormat {
    fn delimiter(self) -> Option<&'static str> {
        match self {
            Self::Multi => None,
            Self::Csv => Some(","),
            Self::Ssv => Some(" "),
            Self::Tsv => Some("\t"),
            Self::Pipes => Some("|"),
        }
    }
}

/// A query parameter as declared by an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParameter {
    /// Scalar parameter, written once
    Single { name: String, value: String },
    /// Collection parameter
    Collection {
        name: String,
        values: Vec<String>,
        format: CollectionFormat,
    },
}

impl QueryParameter {
    /// Parameter name
    pub fn name(&self) -> &str {
        match self {
            Self::Single { name, .. } | Self::Collection { name, .. } => name,
        }
    }

    /// Query-string entries for this parameter, in order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        match self {
            Self::Single { name, value } => vec![(name.clone(), value.clone())],
            Self::Collection { values, .. } if values.is_empty() => Vec::new(),
            Self::Collection {
                name,
                values,
                format,
            } => match format.delimiter() {
                None => values
                    .iter()
                    .map(|value| (name.clone(), value.clone()))
                    .collect(),
                Some(delimiter) => vec![(name.clone(), values.join(delimiter))],
            },
        }
    }
}

/// Declarative description of one API call
///
/// Built fresh for every call and consumed by
/// [`ApiClient::execute`](crate::ApiClient::execute).
///
/// ```
/// use vr_payment::types::RequestDescriptor;
///
/// let request = RequestDescriptor::get(
///     "HumanUsersRolesService.GetHumanUsersUserIdAccountRoles",
///     "/human-users/{userId}/account-roles",
/// )
/// .path_param("userId", 1234)
/// .account(999);
///
/// assert_eq!(request.resolve_path().unwrap(), "/human-users/1234/account-roles");
/// ```
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    operation: String,
    operation_index: u32,
    method: Method,
    path_template: String,
    path_params: HashMap<String, String>,
    query_params: Vec<QueryParameter>,
    header_params: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    content_types: Vec<String>,
    accepts: Vec<String>,
    timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// Create a descriptor accepting JSON and declaring no content type
    pub fn new(operation: impl Into<String>, method: Method, path_template: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            operation_index: 0,
            method,
            path_template: path_template.into(),
            path_params: HashMap::new(),
            query_params: Vec::new(),
            header_params: Vec::new(),
            body: None,
            content_types: Vec::new(),
            accepts: vec![APPLICATION_JSON.to_string()],
            timeout: None,
        }
    }

    pub fn get(operation: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self::new(operation, Method::GET, path_template)
    }

    pub fn post(operation: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self::new(operation, Method::POST, path_template)
    }

    pub fn put(operation: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self::new(operation, Method::PUT, path_template)
    }

    pub fn patch(operation: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self::new(operation, Method::PATCH, path_template)
    }

    pub fn delete(operation: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self::new(operation, Method::DELETE, path_template)
    }

    /// Set the batch correlation index
    pub fn with_operation_index(mut self, operation_index: u32) -> Self {
        self.operation_index = operation_index;
        self
    }

    /// Bind a `{name}` placeholder
    pub fn path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path_params.insert(name.into(), value.to_string());
        self
    }

    /// Add a scalar query parameter
    pub fn query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query_params.push(QueryParameter::Single {
            name: name.into(),
            value: value.to_string(),
        });
        self
    }

    /// Add a scalar query parameter when a value is present
    pub fn optional_query_param<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query_param(name, value),
            None => self,
        }
    }

    /// Add a collection query parameter written with `format`
    pub fn collection_query_param<I>(
        mut self,
        name: impl Into<String>,
        values: I,
        format: CollectionFormat,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.query_params.push(QueryParameter::Collection {
            name: name.into(),
            values: values.into_iter().map(|v| v.to_string()).collect(),
            format,
        });
        self
    }

    /// Add a collection query parameter repeated once per value
    pub fn multi_query_param<I>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.collection_query_param(name, values, CollectionFormat::Multi)
    }

    /// Add a request header
    pub fn header_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.header_params.push((name.into(), value.to_string()));
        self
    }

    /// Scope the call to a space
    pub fn space(self, space_id: u64) -> Self {
        self.header_param("Space", space_id)
    }

    /// Scope the call to an account
    pub fn account(self, account_id: u64) -> Self {
        self.header_param("Account", account_id)
    }

    /// Serialize `body` as the JSON request body
    pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Declare the content types the operation consumes
    pub fn content_types<I>(mut self, content_types: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.content_types = content_types.into_iter().map(Into::into).collect();
        self
    }

    /// Declare the content types the operation produces
    pub fn accepts<I>(mut self, accepts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.accepts = accepts.into_iter().map(Into::into).collect();
        self
    }

    /// Override the configured timeout for this call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn operation_index(&self) -> u32 {
        self.operation_index
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path_template(&self) -> &str {
        &self.path_template
    }

    pub fn path_params(&self) -> &HashMap<String, String> {
        &self.path_params
    }

    pub fn query_params(&self) -> &[QueryParameter] {
        &self.query_params
    }

    pub fn header_params(&self) -> &[(String, String)] {
        &self.header_params
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Placeholder names in the path template, in order of appearance
    pub fn placeholders(&self) -> Result<Vec<&str>> {
        let mut names = Vec::new();
        let mut rest = self.path_template.as_str();
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                ApiError::validation(
                    &self.operation,
                    format!("Unterminated placeholder in path '{}'", self.path_template),
                )
            })?;
            let name = &after[..end];
            if name.is_empty() || name.contains('{') {
                return Err(ApiError::validation(
                    &self.operation,
                    format!("Malformed placeholder in path '{}'", self.path_template),
                ));
            }
            names.push(name);
            rest = &after[end + 1..];
        }
        Ok(names)
    }

    /// Path with every placeholder replaced by its encoded value
    pub fn resolve_path(&self) -> Result<String> {
        let mut resolved = self.path_template.clone();
        for name in self.placeholders()? {
            let value = self
                .path_params
                .get(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    ApiError::validation(
                        &self.operation,
                        format!("Missing required path parameter '{}'", name),
                    )
                })?;
            // URL parsing collapses dot-segments, even percent-encoded ones
            if value == "." || value == ".." {
                return Err(ApiError::validation(
                    &self.operation,
                    format!("Path parameter '{}' cannot be '{}'", name, value),
                ));
            }
            let encoded = utf8_percent_encode(value, PATH_SEGMENT).to_string();
            resolved = resolved.replacen(&format!("{{{}}}", name), &encoded, 1);
        }
        Ok(resolved)
    }

    /// Query-string entries in declaration order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query_params
            .iter()
            .flat_map(QueryParameter::to_pairs)
            .collect()
    }

    /// Negotiated `Content-Type`; none unless the operation declares content types
    pub fn content_type(&self) -> Option<String> {
        select_header_content_type(&self.content_types)
    }

    /// Negotiated `Accept`, if one should be sent
    pub fn accept(&self) -> Option<String> {
        select_header_accept(&self.accepts)
    }
}

/// Whether `mime` is a JSON media type (`application/json` or `*/*+json`)
pub fn is_json_mime(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    if essence == APPLICATION_JSON {
        return true;
    }
    match essence.split_once('/') {
        Some((kind, subtype)) => {
            !kind.is_empty() && !subtype.contains('/') && subtype.ends_with("+json")
        }
        None => false,
    }
}

/// Pick the `Content-Type` among declared types: first JSON type, else the first
pub fn select_header_content_type(content_types: &[String]) -> Option<String> {
    content_types
        .iter()
        .find(|content_type| is_json_mime(content_type))
        .or_else(|| content_types.first())
        .cloned()
}

/// Build the `Accept` header: JSON if declared, else all declared types
pub fn select_header_accept(accepts: &[String]) -> Option<String> {
    if accepts.is_empty() {
        return None;
    }
    if accepts.iter().any(|accept| is_json_mime(accept)) {
        return Some(APPLICATION_JSON.to_string());
    }
    Some(accepts.join(", "))
}

/// A request ready to be sent: URL resolved, headers negotiated and signed
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub operation: String,
    pub operation_index: u32,
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    pub timeout: Duration,
}

impl PreparedRequest {
    /// Path and query as they appear on the request line
    pub fn path_and_query(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }
}
