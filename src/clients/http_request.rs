//! HTTP request types.
//!
//! This module provides the [`HttpRequest`] type and its builder.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use reqwest::header::{HeaderName, HeaderValue};
use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// Request parameters: query parameters for `GET`/`DELETE`, a JSON body for
/// `POST`/`PUT`.
pub type Params = serde_json::Map<String, Value>;

/// HTTP methods supported by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if parameters travel in the request body.
    #[must_use]
    pub const fn sends_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Error returned when parsing an unsupported method name.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("Unsupported HTTP method '{0}'.")]
pub struct ParseMethodError(pub String);

impl FromStr for HttpMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

/// A request to be sent through a [`RequestHandler`](crate::clients::RequestHandler).
///
/// # Example
///
/// ```rust
/// use drest::clients::{HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/users/")
///     .param("username__icontains", "admin")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.query_pairs(), vec![("username__icontains".to_string(), "admin".to_string())]);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path, relative to the base URL.
    pub path: String,
    /// Request parameters.
    pub params: Params,
    /// Additional headers to include in the request.
    pub extra_headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the path is empty or a header is
    /// not valid HTTP.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim().is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        for (name, value) in &self.extra_headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err()
                || HeaderValue::from_str(value).is_err()
            {
                return Err(InvalidHttpRequestError::InvalidHeader { name: name.clone() });
            }
        }

        Ok(())
    }

    /// Renders the params as query-string pairs.
    ///
    /// Strings are sent verbatim, `null` as an empty value, arrays as one pair
    /// per element, and anything else as its JSON text.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (key, value) in &self.params {
            match value {
                Value::Array(items) => {
                    pairs.extend(items.iter().map(|item| (key.clone(), render_query_value(item))));
                }
                other => pairs.push((key.clone(), render_query_value(other))),
            }
        }
        pairs
    }
}

fn render_query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    params: Params,
    extra_headers: HashMap<String, String>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            params: Params::new(),
            extra_headers: HashMap::new(),
        }
    }

    /// Replaces all params at once.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Adds a single param.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            params: self.params,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}
