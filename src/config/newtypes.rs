//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated API base URL.
///
/// The URL must use the `http` or `https` scheme and name a host. Paths
/// requested through the client are joined onto it with [`BaseUrl::join`].
///
/// # Example
///
/// ```rust
/// use drest::BaseUrl;
///
/// let url = BaseUrl::new("http://localhost:8000/api/v1/").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "localhost");
/// assert_eq!(url.join("/users/1", true), "http://localhost:8000/api/v1/users/1/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no `http`/`https`
    /// scheme or no host, or carries userinfo, a query or a fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();
        let invalid = || ConfigError::InvalidBaseUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = url[..scheme_end].to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        // Userinfo is rejected: credentials travel in the Authorization header
        if remainder
            .split('/')
            .next()
            .is_some_and(|authority| authority.contains('@'))
        {
            return Err(invalid());
        }
        // Request paths are appended to the base, so it cannot end in a query or fragment
        if remainder.contains(['?', '#']) {
            return Err(invalid());
        }

        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins a request path onto the base URL.
    ///
    /// Slashes at the seam are collapsed to one. When `trailing_slash` is set,
    /// the result ends in exactly one `/` unless it carries a query string.
    #[must_use]
    pub fn join(&self, path: &str, trailing_slash: bool) -> String {
        let base = self.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');

        let mut url = format!("{base}/{path}");
        if trailing_slash && !url.ends_with('/') && !url.contains('?') {
            url.push('/');
        }
        url
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated, non-empty API username.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated username.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the name is empty.
    pub fn new(user: impl Into<String>) -> Result<Self, ConfigError> {
        let user = user.into();
        if user.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(user))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A password or API key.
///
/// The `Debug` implementation masks the value, displaying only
/// `Secret(*****)`.
///
/// # Example
///
/// ```rust
/// use drest::Secret;
///
/// let secret = Secret::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", secret), "Secret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Creates a new validated secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecret`] if the value is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self(secret))
    }

    /// Wraps a secret that is allowed to be empty, such as a Basic Auth
    /// password paired with a token username.
    #[must_use]
    pub fn allow_empty(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl AsRef<str> for Secret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(*****)")
    }
}
