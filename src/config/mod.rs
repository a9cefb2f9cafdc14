//! Configuration types for the drest client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiConfig`]: Connection settings shared by an API and its resources
//! - [`ApiConfigBuilder`]: A builder for constructing [`ApiConfig`] instances
//! - [`BaseUrl`]: A validated API root URL
//! - [`Username`]: A validated, non-empty username
//! - [`Secret`]: A password or API key with masked debug output
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use drest::{ApiConfig, BaseUrl};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:8000/api/v1/").unwrap())
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//!
//! assert!(config.trailing_slash());
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, Secret, Username};

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};

use crate::error::ConfigError;

/// Connection settings for a REST API.
///
/// `ApiConfig` is `Clone`, `Send`, and `Sync`, so one configuration can back
/// several API handles.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: BaseUrl,
    ignore_ssl_validation: bool,
    trailing_slash: bool,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
    headers: HashMap<String, String>,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Creates a configuration with defaults for everything but the base URL.
    #[must_use]
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            ignore_ssl_validation: false,
            trailing_slash: true,
            timeout: None,
            user_agent_prefix: None,
            headers: HashMap::new(),
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns whether TLS certificate errors are ignored.
    #[must_use]
    pub const fn ignore_ssl_validation(&self) -> bool {
        self.ignore_ssl_validation
    }

    /// Returns whether request URLs get a trailing slash.
    #[must_use]
    pub const fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the extra headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// The builder takes no arguments; only the base URL must be set before
/// [`build`](Self::build).
///
/// # Defaults
///
/// - `ignore_ssl_validation`: `false`
/// - `trailing_slash`: `true`
/// - `timeout`: `None`
/// - `user_agent_prefix`: `None`
/// - `headers`: empty
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<BaseUrl>,
    ignore_ssl_validation: Option<bool>,
    trailing_slash: Option<bool>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
    headers: HashMap<String, String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Accept invalid TLS certificates from the API host.
    #[must_use]
    pub const fn ignore_ssl_validation(mut self, ignore: bool) -> Self {
        self.ignore_ssl_validation = Some(ignore);
        self
    }

    /// Sets whether request URLs end with `/`.
    #[must_use]
    pub const fn trailing_slash(mut self, enabled: bool) -> Self {
        self.trailing_slash = Some(enabled);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Adds a header sent with every request.
    ///
    /// Names are compared case-insensitively, so a later `accept` replaces an
    /// earlier `Accept`.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
        self.headers.insert(key, value.into());
        self
    }

    /// Builds the [`ApiConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if no base URL was set and
    /// [`ConfigError::InvalidHeader`] if an extra header is not valid HTTP.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        for (name, value) in &self.headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err()
                || HeaderValue::from_str(value).is_err()
            {
                return Err(ConfigError::InvalidHeader { name: name.clone() });
            }
        }

        Ok(ApiConfig {
            base_url,
            ignore_ssl_validation: self.ignore_ssl_validation.unwrap_or(false),
            trailing_slash: self.trailing_slash.unwrap_or(true),
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
            headers: self.headers,
        })
    }
}
