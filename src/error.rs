//! Error types for the drest client.
//!
//! This module contains the configuration error type and the top-level
//! [`ApiError`] returned by [`Api`](crate::Api) and
//! [`TastyPieApi`](crate::TastyPieApi).
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Lower layers have their own error enums
//! ([`HttpError`], [`ResourceError`]) which `ApiError` wraps transparently.
//!
//! # Example
//!
//! ```rust
//! use drest::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("localhost:8000");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::resource::ResourceError;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Expected an http or https URL with a host (e.g., 'http://localhost:8000/api/v1/').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Username cannot be empty.
    #[error("Username cannot be empty.")]
    EmptyUsername,

    /// Basic Auth usernames cannot contain a colon.
    #[error("Username '{user}' contains ':', which Basic Auth cannot encode.")]
    ColonInUsername {
        /// The rejected username.
        user: String,
    },

    /// Password or API key cannot be empty.
    #[error("Password or API key cannot be empty.")]
    EmptySecret,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A default header name or value is not valid HTTP.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The underlying HTTP client could not be initialized.
    #[error("Failed to create HTTP client: {reason}")]
    ClientInit {
        /// Description of the failure.
        reason: String,
    },
}

/// Top-level error for API connection operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured authentication mechanism is not supported.
    #[error("Unknown TastyPie auth mechanism '{mechanism}'.")]
    UnknownAuthMechanism {
        /// The mechanism name that was requested.
        mechanism: String,
    },

    /// No resource is registered under the given name.
    #[error("The resource '{name}' does not exist on this API.")]
    UnknownResource {
        /// The requested resource name.
        name: String,
    },

    /// Resource auto-detection received something other than a JSON object.
    #[error("Unexpected resource listing from the API root: {body}")]
    UnexpectedListing {
        /// The body that was returned.
        body: String,
    },

    /// Configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A resource operation failed.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// A raw request failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ApiError {
    /// Returns the HTTP status code when the error came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            Self::Resource(e) => e.status(),
            _ => None,
        }
    }
}
