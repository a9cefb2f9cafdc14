//! HTTP response types.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// An HTTP response from the API.
///
/// Header names are stored lower-cased; a header may carry several values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The canonical reason phrase for the status code.
    pub reason: String,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        let reason = reqwest::StatusCode::from_u16(code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string();

        Self {
            code,
            reason,
            headers,
            body,
        }
    }

    /// Parses a raw body.
    ///
    /// Empty bodies become `null`, valid JSON is parsed, and anything else is
    /// kept verbatim as a JSON string.
    #[must_use]
    pub fn parse_body(text: &str) -> Value {
        if text.trim().is_empty() {
            return Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `Content-Type` header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Deserializes the body into a local type.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the body does not match `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use drest::clients::HttpResponse;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct User {
    ///     id: u64,
    ///     username: String,
    /// }
    ///
    /// let response = HttpResponse::new(
    ///     200,
    ///     HashMap::new(),
    ///     serde_json::json!({"id": 1, "username": "admin"}),
    /// );
    /// let user: User = response.json().unwrap();
    /// assert_eq!(user.username, "admin");
    /// ```
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }
}
