//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use drest::clients::HttpError;
//!
//! match handler.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.body);
//!     }
//!     Err(HttpError::InvalidRequest(e)) => {
//!         println!("Invalid request: {}", e);
//!     }
//!     Err(HttpError::Network(e)) => {
//!         println!("Network error: {}", e);
//!     }
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// The response body is kept so callers can inspect validation messages
/// returned by the API.
///
/// # Example
///
/// ```rust
/// use drest::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Received HTTP Code 404 - Not Found".to_string(),
///     body: serde_json::json!({"error": "no such user"}),
///     request_id: None,
/// };
///
/// assert_eq!(error.to_string(), "Received HTTP Code 404 - Not Found");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human-readable summary of the failure.
    pub message: String,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// The `X-Request-Id` header, if the server sent one.
    pub request_id: Option<String>,
}

impl HttpResponseError {
    /// Builds the error for a status code and its reason phrase.
    #[must_use]
    pub fn from_status(
        code: u16,
        reason: &str,
        body: serde_json::Value,
        request_id: Option<String>,
    ) -> Self {
        Self {
            code,
            message: format!("Received HTTP Code {code} - {reason}"),
            body,
            request_id,
        }
    }
}

/// Error returned when an HTTP request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path was empty.
    #[error("Cannot send a request without a path.")]
    EmptyPath,

    /// A header name or value is not valid HTTP.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the status code if the server answered with an error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns the human-readable message without the variant prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Response(e) => e.message.clone(),
            Self::InvalidRequest(e) => e.to_string(),
            Self::Network(e) => format!("Network error: {e}"),
        }
    }
}
