//! Resource helpers for TastyPie backends.

use serde_json::Value;
use tokio::sync::OnceCell;

use crate::clients::{HttpMethod, HttpResponse, Params};
use crate::resource::{ResourceError, ResourceHandle};

/// A resource handle with TastyPie-specific helpers.
///
/// Dereferences to [`ResourceHandle`], so the usual `get`/`post`/`put`/`delete`
/// calls are available too.
#[derive(Clone, Copy, Debug)]
pub struct TastyPieResource<'a> {
    handle: ResourceHandle<'a>,
    schema: &'a OnceCell<Value>,
}

impl<'a> TastyPieResource<'a> {
    /// Wraps a bound resource and the cell its schema is memoised in.
    #[must_use]
    pub const fn new(handle: ResourceHandle<'a>, schema: &'a OnceCell<Value>) -> Self {
        Self { handle, schema }
    }

    /// Fetches a record by its `resource_uri` instead of its primary key.
    ///
    /// The last path segment of the URI is used as the key, so
    /// `/api/v1/users/234/` fetches user `234`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidUri`] if the URI has no key segment, or
    /// [`ResourceError::Request`] if the request fails.
    pub async fn get_by_uri(
        &self,
        resource_uri: &str,
        params: Params,
    ) -> Result<HttpResponse, ResourceError> {
        let pk = resource_uri
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|pk| !pk.is_empty())
            .ok_or_else(|| ResourceError::InvalidUri {
                uri: resource_uri.to_string(),
            })?;
        self.handle.get(pk, params).await
    }

    /// Returns the resource schema: `GET /{path}/schema`.
    ///
    /// The schema is fetched once; later calls return the cached value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Request`] if the request fails. Failures are
    /// not cached.
    pub async fn schema(&self) -> Result<&'a Value, ResourceError> {
        let resource = self.handle.resource();
        let schema = self.schema;
        schema
            .get_or_try_init(|| async {
                let path = format!("/{}/schema", resource.path());
                tracing::debug!("Fetching schema for resource {}", resource.name());
                self.handle
                    .request(HttpMethod::Get, &path, Params::new())
                    .await
                    .map(|response| response.body)
                    .map_err(|e| ResourceError::request(e, resource.name(), None))
            })
            .await
    }
}

impl<'a> std::ops::Deref for TastyPieResource<'a> {
    type Target = ResourceHandle<'a>;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}
