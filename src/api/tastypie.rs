//! API connection tailored for TastyPie backends.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::OnceCell;

use crate::api::Api;
use crate::auth::AuthMechanism;
use crate::clients::{HttpMethod, HttpResponse, Params};
use crate::config::{ApiConfig, BaseUrl};
use crate::error::ApiError;
use crate::resource::{RestResource, TastyPieResource};

/// A connection to a [TastyPie](https://django-tastypie.readthedocs.io/) API.
///
/// Supports `ApiKeyAuthentication` (the default) and `BasicAuthentication`,
/// and can discover resources from the API root listing.
///
/// # Example
///
/// ```rust,ignore
/// use drest::{AuthMechanism, Params, TastyPieApi};
///
/// let mut api = TastyPieApi::connect("http://localhost:8000/api/v0/", AuthMechanism::ApiKey).await?;
/// api.auth("john.doe", "34547a497326dde80bcaf8bcee43e3d1b5f24cc9")?;
///
/// println!("{:?}", api.resources());
/// let users = api.resource("users").unwrap();
/// let schema = users.schema().await?;
/// let admins = users.get_all(filter_params).await?;
/// ```
#[derive(Debug)]
pub struct TastyPieApi {
    api: Api,
    mechanism: AuthMechanism,
    schemas: HashMap<String, OnceCell<Value>>,
}

impl TastyPieApi {
    /// Creates a connection without contacting the API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the URL is invalid.
    pub fn new(base_url: &str, mechanism: AuthMechanism) -> Result<Self, ApiError> {
        Self::with_config(&ApiConfig::new(BaseUrl::new(base_url)?), mechanism)
    }

    /// Creates a connection from a full configuration without contacting the API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the HTTP client cannot be built.
    pub fn with_config(config: &ApiConfig, mechanism: AuthMechanism) -> Result<Self, ApiError> {
        Ok(Self {
            api: Api::with_config(config)?,
            mechanism,
            schemas: HashMap::new(),
        })
    }

    /// Creates a connection and registers every resource the API root lists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the URL is invalid or the listing request fails.
    pub async fn connect(base_url: &str, mechanism: AuthMechanism) -> Result<Self, ApiError> {
        Self::connect_with_config(&ApiConfig::new(BaseUrl::new(base_url)?), mechanism).await
    }

    /// Like [`connect`](Self::connect), with full control over the
    /// configuration (timeouts, TLS validation, extra headers).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the HTTP client cannot be built or the listing
    /// request fails.
    pub async fn connect_with_config(
        config: &ApiConfig,
        mechanism: AuthMechanism,
    ) -> Result<Self, ApiError> {
        let mut api = Self::with_config(config, mechanism)?;
        api.find_resources().await?;
        Ok(api)
    }

    /// Returns the configured auth mechanism.
    #[must_use]
    pub const fn mechanism(&self) -> AuthMechanism {
        self.mechanism
    }

    /// Returns the underlying generic connection.
    #[must_use]
    pub const fn api(&self) -> &Api {
        &self.api
    }

    /// Authenticates every following request using the configured mechanism.
    ///
    /// With [`AuthMechanism::ApiKey`] the secret is the user's API key; with
    /// [`AuthMechanism::Basic`] it is their password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the user is empty, or the API key is
    /// empty under [`AuthMechanism::ApiKey`].
    pub fn auth(&mut self, user: &str, secret: &str) -> Result<(), ApiError> {
        let credentials = self.mechanism.credentials(user, secret)?;
        self.api.set_credentials(credentials);
        Ok(())
    }

    /// Sends a request to a path under the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
    ) -> Result<HttpResponse, ApiError> {
        self.api.request(method, path, params).await
    }

    /// Registers every resource listed at the API root that is not yet known.
    ///
    /// Returns the names that were added. Listing keys that cannot name a
    /// resource, such as `""`, are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the listing request fails and
    /// [`ApiError::UnexpectedListing`] if the root does not return a JSON object.
    pub async fn find_resources(&mut self) -> Result<Vec<String>, ApiError> {
        let response = self.api.request(HttpMethod::Get, "/", Params::new()).await?;
        let listing = match response.body {
            Value::Object(listing) => listing,
            other => {
                return Err(ApiError::UnexpectedListing {
                    body: other.to_string(),
                })
            }
        };

        let mut added = Vec::new();
        for name in listing.keys() {
            if self.api.has_resource(name) {
                continue;
            }
            let resource = match RestResource::new(name.as_str(), name) {
                Ok(resource) => resource,
                Err(e) => {
                    tracing::warn!("Skipping listed resource {:?}: {}", name, e);
                    continue;
                }
            };
            self.register(resource)?;
            added.push(name.clone());
        }
        tracing::debug!("Detected {} new resources: {:?}", added.len(), added);
        Ok(added)
    }

    /// Registers a resource under `name`; `path` defaults to the name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Resource`] if the name is empty or already taken.
    pub fn add_resource(&mut self, name: &str, path: Option<&str>) -> Result<(), ApiError> {
        self.register(RestResource::new(name, path.unwrap_or(name))?)
    }

    /// Registers a pre-built resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Resource`] if the name is already taken.
    pub fn register(&mut self, resource: RestResource) -> Result<(), ApiError> {
        let name = resource.name().to_string();
        self.api.register(resource)?;
        self.schemas.insert(name, OnceCell::new());
        Ok(())
    }

    /// Returns the registered resource names in registration order.
    #[must_use]
    pub fn resources(&self) -> Vec<&str> {
        self.api.resources()
    }

    /// Returns the resource registered under `name`.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<TastyPieResource<'_>> {
        let handle = self.api.resource(name)?;
        let schema = self.schemas.get(name)?;
        Some(TastyPieResource::new(handle, schema))
    }

    /// Like [`resource`](Self::resource), but missing names are an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownResource`] if nothing is registered under `name`.
    pub fn resource_or_err(&self, name: &str) -> Result<TastyPieResource<'_>, ApiError> {
        self.resource(name).ok_or_else(|| ApiError::UnknownResource {
            name: name.to_string(),
        })
    }
}
