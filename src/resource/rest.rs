//! REST-style resource handles.

use std::fmt;
use std::sync::Arc;

use crate::clients::{HttpError, HttpMethod, HttpResponse, Params, RequestHandler};
use crate::resource::ResourceError;

/// Hook that may rewrite params before a resource request is sent.
pub type ParamFilter = Arc<dyn Fn(Params) -> Params + Send + Sync>;

/// A named REST resource under the API root.
///
/// A `RestResource` only describes the resource; bind it to a
/// [`RequestHandler`] with [`bind`](Self::bind) to make requests.
///
/// # Example
///
/// ```rust
/// use drest::RestResource;
///
/// let users = RestResource::new("users", "/users/").unwrap();
/// assert_eq!(users.path(), "users");
/// ```
#[derive(Clone)]
pub struct RestResource {
    name: String,
    path: String,
    filter: Option<ParamFilter>,
}

impl RestResource {
    /// Creates a resource description.
    ///
    /// Leading and trailing `/` are stripped from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingName`] or [`ResourceError::MissingPath`]
    /// when either is empty.
    pub fn new(name: impl Into<String>, path: &str) -> Result<Self, ResourceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ResourceError::MissingName);
        }
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Err(ResourceError::MissingPath);
        }

        Ok(Self {
            name,
            path: path.to_string(),
            filter: None,
        })
    }

    /// Installs a hook that rewrites params before every request.
    #[must_use]
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(Params) -> Params + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the resource path, without surrounding slashes.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Applies the param filter, if any.
    #[must_use]
    pub fn filter(&self, params: Params) -> Params {
        match &self.filter {
            Some(filter) => filter(params),
            None => params,
        }
    }

    /// Binds the resource to a handler so requests can be made.
    #[must_use]
    pub const fn bind<'a>(&'a self, handler: &'a RequestHandler) -> ResourceHandle<'a> {
        ResourceHandle {
            resource: self,
            handler,
        }
    }

    fn collection_path(&self) -> String {
        format!("/{}", self.path)
    }

    fn member_path(&self, id: &str) -> String {
        format!("/{}/{}", self.path, urlencoding::encode(id))
    }
}

impl fmt::Debug for RestResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestResource")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

/// A [`RestResource`] bound to the handler that sends its requests.
///
/// Obtained from [`Api::resource`](crate::Api::resource) or
/// [`RestResource::bind`].
///
/// # Example
///
/// ```rust,ignore
/// let users = api.resource("users").unwrap();
///
/// let all = users.get_all(Params::new()).await?;
/// let one = users.get(1, Params::new()).await?;
///
/// let mut data = one.body.as_object().cloned().unwrap_or_default();
/// data.insert("first_name".into(), "John".into());
/// users.update(1, data).await?;
///
/// users.delete(1, Params::new()).await?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ResourceHandle<'a> {
    resource: &'a RestResource,
    handler: &'a RequestHandler,
}

impl<'a> ResourceHandle<'a> {
    /// Returns the resource description.
    #[must_use]
    pub const fn resource(&self) -> &'a RestResource {
        self.resource
    }

    /// Returns the handler requests are sent through.
    #[must_use]
    pub const fn handler(&self) -> &'a RequestHandler {
        self.handler
    }

    /// Sends a raw request through the handler.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
    ) -> Result<HttpResponse, HttpError> {
        self.handler.send(method, path, params).await
    }

    /// Fetches every record of the resource: `GET /{path}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Request`] if the request fails.
    pub async fn get_all(&self, params: Params) -> Result<HttpResponse, ResourceError> {
        let path = self.resource.collection_path();
        self.call(HttpMethod::Get, &path, params, None).await
    }

    /// Fetches one record: `GET /{path}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Request`] if the request fails.
    pub async fn get(
        &self,
        id: impl fmt::Display,
        params: Params,
    ) -> Result<HttpResponse, ResourceError> {
        let id = id.to_string();
        let path = self.resource.member_path(&id);
        self.call(HttpMethod::Get, &path, params, Some(&id)).await
    }

    /// Creates a record: `POST /{path}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Request`] if the request fails.
    pub async fn post(&self, params: Params) -> Result<HttpResponse, ResourceError> {
        let path = self.resource.collection_path();
        self.call(HttpMethod::Post, &path, params, None).await
    }

    /// Same as [`post`](Self::post).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Request`] if the request fails.
    pub async fn create(&self, params: Params) -> Result<HttpResponse, ResourceError> {
        self.post(params).await
    }

    /// Updates a record: `PUT /{path}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Request`] if the request fails.
    pub async fn put(
        &self,
        id: impl fmt::Display,
        params: Params,
    ) -> Result<HttpResponse, ResourceError> {
        let id = id.to_string();
        let path = self.resource.member_path(&id);
        self.call(HttpMethod::Put, &path, params, Some(&id)).await
    }

    /// Same as [`put`](Self::put).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Request`] if the request fails.
    pub async fn update(
        &self,
        id: impl fmt::Display,
        params: Params,
    ) -> Result<HttpResponse, ResourceError> {
        self.put(id, params).await
    }

    /// Deletes a record: `DELETE /{path}/{id}`.
    ///
    /// Some APIs accept extra params here, sent as the query string.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Request`] if the request fails.
    pub async fn delete(
        &self,
        id: impl fmt::Display,
        params: Params,
    ) -> Result<HttpResponse, ResourceError> {
        let id = id.to_string();
        let path = self.resource.member_path(&id);
        self.call(HttpMethod::Delete, &path, params, Some(&id)).await
    }

    async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
        id: Option<&str>,
    ) -> Result<HttpResponse, ResourceError> {
        let params = self.resource.filter(params);
        self.handler
            .send(method, path, params)
            .await
            .map_err(|e| ResourceError::request(e, &self.resource.name, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_strips_slashes() {
        let resource = RestResource::new("users", "/users/").unwrap();
        assert_eq!(resource.name(), "users");
        assert_eq!(resource.path(), "users");

        let resource = RestResource::new("projects", "org/1/projects").unwrap();
        assert_eq!(resource.path(), "org/1/projects");
    }

    #[test]
    fn test_new_requires_name_and_path() {
        assert!(matches!(
            RestResource::new("", "users"),
            Err(ResourceError::MissingName)
        ));
        assert!(matches!(
            RestResource::new("users", "//"),
            Err(ResourceError::MissingPath)
        ));
    }

    #[test]
    fn test_paths() {
        let resource = RestResource::new("users", "users").unwrap();
        assert_eq!(resource.collection_path(), "/users");
        assert_eq!(resource.member_path("1"), "/users/1");
        assert_eq!(resource.member_path("john doe"), "/users/john%20doe");
    }

    #[test]
    fn test_default_filter_is_identity() {
        let resource = RestResource::new("users", "users").unwrap();
        let mut params = Params::new();
        params.insert("a".to_string(), json!(1));

        assert_eq!(resource.filter(params.clone()), params);
    }

    #[test]
    fn test_custom_filter_rewrites_params() {
        let resource = RestResource::new("users", "users")
            .unwrap()
            .with_filter(|mut params| {
                params.insert("format".to_string(), json!("json"));
                params
            });

        let filtered = resource.filter(Params::new());
        assert_eq!(filtered.get("format"), Some(&json!("json")));
        assert!(format!("{resource:?}").contains("filter: true"));
    }
}
