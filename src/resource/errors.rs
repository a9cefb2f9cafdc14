//! Error types for resource operations.

use thiserror::Error;

use crate::clients::HttpError;

/// Error type for resource registration and resource requests.
///
/// # Example
///
/// ```rust
/// use drest::ResourceError;
///
/// let error = ResourceError::AlreadyExists { name: "users".to_string() };
/// assert_eq!(error.to_string(), "The resource 'users' already exists.");
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A resource was created without a name.
    #[error("name required")]
    MissingName,

    /// A resource was created without a path.
    #[error("path required")]
    MissingPath,

    /// A resource with the same name is already registered.
    #[error("The resource '{name}' already exists.")]
    AlreadyExists {
        /// The duplicate name.
        name: String,
    },

    /// A resource URI had no primary key segment.
    #[error("Cannot find a primary key in resource URI '{uri}'.")]
    InvalidUri {
        /// The URI that was provided.
        uri: String,
    },

    /// A request for this resource failed.
    ///
    /// The message names the resource (and id, when there is one) so it can
    /// be logged as-is.
    #[error("{message}")]
    Request {
        /// The request error annotated with the resource name and id.
        message: String,
        /// The underlying HTTP error.
        #[source]
        source: HttpError,
    },
}

impl ResourceError {
    /// Wraps an HTTP error with the resource name and optional id.
    #[must_use]
    pub fn request(source: HttpError, resource: &str, id: Option<&str>) -> Self {
        let message = id.map_or_else(
            || format!("{} (resource: {resource})", source.message()),
            |id| format!("{} (resource: {resource}, id: {id})", source.message()),
        );
        Self::Request { message, source }
    }

    /// Returns the status code if the server answered with an error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Returns the response body if the server answered with an error.
    #[must_use]
    pub const fn body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Request {
                source: HttpError::Response(e),
                ..
            } => Some(&e.body),
            _ => None,
        }
    }
}
