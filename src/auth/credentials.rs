//! Credentials attached to outgoing requests.

use std::fmt;
use std::str::FromStr;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;

use crate::config::{Secret, Username};
use crate::error::{ApiError, ConfigError};

/// Credentials sent in the `Authorization` header of every request.
///
/// Credentials are never embedded in the request URL.
///
/// # Example
///
/// ```rust
/// use drest::Credentials;
///
/// let creds = Credentials::basic("john.doe", "secret").unwrap();
/// assert_eq!(creds.header_value(), "Basic am9obi5kb2U6c2VjcmV0");
///
/// let creds = Credentials::api_key("john.doe", "34547a49").unwrap();
/// assert_eq!(creds.header_value(), "ApiKey john.doe:34547a49");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic Authentication.
    Basic {
        /// The API username.
        user: Username,
        /// The user's password.
        password: Secret,
    },
    /// TastyPie `ApiKeyAuthentication`.
    ApiKey {
        /// The API username.
        user: Username,
        /// The user's API key.
        api_key: Secret,
    },
}

impl Credentials {
    /// Creates Basic Auth credentials.
    ///
    /// The password may be empty, as with APIs that take a token as the
    /// username.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the user is empty and
    /// [`ConfigError::ColonInUsername`] if it contains `:`.
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
        let user = Username::new(user)?;
        if user.as_ref().contains(':') {
            return Err(ConfigError::ColonInUsername {
                user: user.as_ref().to_string(),
            });
        }
        Ok(Self::Basic {
            user,
            password: Secret::allow_empty(password),
        })
    }

    /// Creates TastyPie API key credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either value is empty.
    pub fn api_key(user: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::ApiKey {
            user: Username::new(user)?,
            api_key: Secret::new(api_key)?,
        })
    }

    /// Returns the username.
    #[must_use]
    pub fn user(&self) -> &str {
        match self {
            Self::Basic { user, .. } | Self::ApiKey { user, .. } => user.as_ref(),
        }
    }

    /// Returns the value for the `Authorization` header.
    #[must_use]
    pub fn header_value(&self) -> String {
        match self {
            Self::Basic { user, password } => {
                let pair = format!("{}:{}", user.as_ref(), password.as_ref());
                format!("Basic {}", BASE64_STANDARD.encode(pair))
            }
            Self::ApiKey { user, api_key } => {
                format!("ApiKey {}:{}", user.as_ref(), api_key.as_ref())
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { user, .. } => f
                .debug_struct("Basic")
                .field("user", &user.as_ref())
                .field("password", &"*****")
                .finish(),
            Self::ApiKey { user, .. } => f
                .debug_struct("ApiKey")
                .field("user", &user.as_ref())
                .field("api_key", &"*****")
                .finish(),
        }
    }
}

/// Which credential form [`TastyPieApi::auth`](crate::TastyPieApi::auth) builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMechanism {
    /// `Authorization: ApiKey user:key`.
    #[default]
    ApiKey,
    /// HTTP Basic Authentication.
    Basic,
}

impl AuthMechanism {
    /// Builds credentials of this kind from a user and a secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] under the rules of [`Credentials::basic`] or
    /// [`Credentials::api_key`].
    pub fn credentials(
        self,
        user: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Credentials, ConfigError> {
        match self {
            Self::ApiKey => Credentials::api_key(user, secret),
            Self::Basic => Credentials::basic(user, secret),
        }
    }
}

impl fmt::Display for AuthMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey => write!(f, "api_key"),
            Self::Basic => write!(f, "basic"),
        }
    }
}

impl FromStr for AuthMechanism {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api_key" | "apikey" => Ok(Self::ApiKey),
            "basic" => Ok(Self::Basic),
            other => Err(ApiError::UnknownAuthMechanism {
                mechanism: other.to_string(),
            }),
        }
    }
}
