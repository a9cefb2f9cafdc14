//! # drest
//!
//! A thin client for REST APIs. It joins request paths onto a base URL,
//! attaches credentials in the `Authorization` header, encodes params,
//! parses JSON responses, and turns non-2xx responses into errors.
//!
//! ## Overview
//!
//! - [`Api`]: A connection with a resource registry and HTTP Basic Auth
//! - [`TastyPieApi`]: A connection for TastyPie backends with resource
//!   auto-detection and API key auth
//! - [`RestResource`] / [`ResourceHandle`]: `get`, `post`, `put` and
//!   `delete` helpers for a named resource
//! - [`ApiConfig`]: Validated connection settings built with a builder
//! - [`Credentials`]: Basic Auth or API key credentials
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drest::{Api, HttpMethod, Params};
//!
//! let mut api = Api::new("http://localhost:8000/api/v1/")?;
//! api.auth("john.doe", "secret")?;
//!
//! // Raw requests
//! let response = api.request(HttpMethod::Get, "/users/1/", Params::new()).await?;
//! println!("{}", response.body);
//!
//! // Resources
//! api.add_resource("users", None)?;
//! let users = api.resource("users").unwrap();
//!
//! let all = users.get_all(Params::new()).await?;
//!
//! let mut user = Params::new();
//! user.insert("username".into(), "john.doe".into());
//! let created = users.create(user).await?;
//!
//! users.delete(1, Params::new()).await?;
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use std::time::Duration;
//! use drest::{ApiConfig, BaseUrl};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com/v1/").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Credentials in headers**: Never embedded in the URL

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod resource;

pub use api::{Api, TastyPieApi};
pub use auth::{AuthMechanism, Credentials};
pub use clients::{
    HttpError, HttpMethod, HttpRequest, HttpResponse, HttpResponseError, InvalidHttpRequestError,
    Params, RequestHandler,
};
pub use config::{ApiConfig, ApiConfigBuilder, BaseUrl, Secret, Username};
pub use error::{ApiError, ConfigError};
pub use resource::{ResourceError, ResourceHandle, RestResource, TastyPieResource};
