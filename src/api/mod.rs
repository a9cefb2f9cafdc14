//! API connections and their resource registries.
//!
//! - [`Api`]: A generic REST API connection using HTTP Basic Auth
//! - [`TastyPieApi`]: A connection tailored to TastyPie backends, with
//!   resource auto-detection and API key auth

mod tastypie;

pub use tastypie::TastyPieApi;

use crate::auth::Credentials;
use crate::clients::{HttpMethod, HttpResponse, Params, RequestHandler};
use crate::config::{ApiConfig, BaseUrl};
use crate::error::ApiError;
use crate::resource::{ResourceError, ResourceHandle, RestResource};

/// A connection to a REST API rooted at a base URL.
///
/// # Example
///
/// ```rust,ignore
/// use drest::{Api, Params};
///
/// let mut api = Api::new("http://localhost:8000/api/v1/")?;
/// api.auth("john.doe", "secret")?;
///
/// // Make calls openly
/// let response = api.request(HttpMethod::Get, "/users/1/", Params::new()).await?;
///
/// // Or attach a resource
/// api.add_resource("users", None)?;
/// let users = api.resource("users").unwrap();
/// let response = users.get(1, Params::new()).await?;
/// ```
#[derive(Debug)]
pub struct Api {
    handler: RequestHandler,
    resources: Vec<RestResource>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Api>();
};

impl Api {
    /// Creates a connection with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the URL is invalid.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_config(&ApiConfig::new(BaseUrl::new(base_url)?))
    }

    /// Creates a connection from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the HTTP client cannot be built.
    pub fn with_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            handler: RequestHandler::new(config)?,
            resources: Vec::new(),
        })
    }

    /// Authenticates every following request with HTTP Basic Auth.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the user is empty or contains `:`. An
    /// empty password is allowed.
    pub fn auth(&mut self, user: &str, password: &str) -> Result<(), ApiError> {
        self.set_credentials(Credentials::basic(user, password)?);
        Ok(())
    }

    /// Replaces the credentials sent with every request.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.handler.set_auth_credentials(credentials);
    }

    /// Returns the request handler.
    #[must_use]
    pub const fn handler(&self) -> &RequestHandler {
        &self.handler
    }

    /// Returns the request handler for header changes.
    pub fn handler_mut(&mut self) -> &mut RequestHandler {
        &mut self.handler
    }

    /// Sends a request to a path under the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the request fails or the API answers with
    /// a non-2xx status.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
    ) -> Result<HttpResponse, ApiError> {
        Ok(self.handler.send(method, path, params).await?)
    }

    /// Returns the registered resource names in registration order.
    #[must_use]
    pub fn resources(&self) -> Vec<&str> {
        self.resources.iter().map(RestResource::name).collect()
    }

    /// Registers a resource under `name`.
    ///
    /// `path` defaults to the name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Resource`] if the name or path is empty, or the
    /// name is already registered.
    pub fn add_resource(&mut self, name: &str, path: Option<&str>) -> Result<(), ApiError> {
        let resource = RestResource::new(name, path.unwrap_or(name))?;
        self.register(resource)
    }

    /// Registers a pre-built resource, e.g. one with a param filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Resource`] if the name is already registered.
    pub fn register(&mut self, resource: RestResource) -> Result<(), ApiError> {
        if self.has_resource(resource.name()) {
            return Err(ResourceError::AlreadyExists {
                name: resource.name().to_string(),
            }
            .into());
        }
        tracing::debug!("Adding resource {} at /{}", resource.name(), resource.path());
        self.resources.push(resource);
        Ok(())
    }

    /// Returns `true` if a resource is registered under `name`.
    #[must_use]
    pub fn has_resource(&self, name: &str) -> bool {
        self.resources.iter().any(|r| r.name() == name)
    }

    /// Returns the resource registered under `name`, bound to this connection.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<ResourceHandle<'_>> {
        self.resources
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.bind(&self.handler))
    }

    /// Like [`resource`](Self::resource), but missing names are an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownResource`] if nothing is registered under `name`.
    pub fn resource_or_err(&self, name: &str) -> Result<ResourceHandle<'_>, ApiError> {
        self.resource(name).ok_or_else(|| ApiError::UnknownResource {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn create_test_api() -> Api {
        Api::new("http://localhost:8000/api/v1/").unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = Api::new("localhost:8000");
        assert!(matches!(
            result,
            Err(ApiError::Config(ConfigError::InvalidBaseUrl { .. }))
        ));
    }

    #[test]
    fn test_auth_sets_basic_credentials() {
        let mut api = create_test_api();
        api.auth("john.doe", "password").unwrap();

        assert_eq!(
            api.handler().credentials().unwrap().header_value(),
            "Basic am9obi5kb2U6cGFzc3dvcmQ="
        );
    }

    #[test]
    fn test_auth_rejects_empty_user() {
        let mut api = create_test_api();
        assert!(matches!(
            api.auth("", "password"),
            Err(ApiError::Config(ConfigError::EmptyUsername))
        ));
        assert!(api.handler().credentials().is_none());
    }

    #[test]
    fn test_add_resource_defaults_path_to_name() {
        let mut api = create_test_api();
        api.add_resource("users", None).unwrap();

        let users = api.resource("users").unwrap();
        assert_eq!(users.resource().path(), "users");
    }

    #[test]
    fn test_add_resource_strips_leading_slash() {
        let mut api = create_test_api();
        api.add_resource("people", Some("/users/")).unwrap();

        assert_eq!(api.resource("people").unwrap().resource().path(), "users");
    }

    #[test]
    fn test_add_resource_rejects_duplicates() {
        let mut api = create_test_api();
        api.add_resource("users", None).unwrap();

        let result = api.add_resource("users", Some("other"));
        assert!(matches!(
            result,
            Err(ApiError::Resource(ResourceError::AlreadyExists { name })) if name == "users"
        ));
        assert_eq!(api.resources(), vec!["users"]);
    }

    #[test]
    fn test_resources_preserve_registration_order() {
        let mut api = create_test_api();
        api.add_resource("users", None).unwrap();
        api.add_resource("projects", None).unwrap();
        api.add_resource("accounts", None).unwrap();

        assert_eq!(api.resources(), vec!["users", "projects", "accounts"]);
    }

    #[test]
    fn test_resource_or_err() {
        let api = create_test_api();
        assert!(api.resource("users").is_none());
        assert!(matches!(
            api.resource_or_err("users"),
            Err(ApiError::UnknownResource { name }) if name == "users"
        ));
    }

    #[test]
    fn test_api_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Api>();
    }
}
