//! Resource handles wrapping the usual REST verbs.
//!
//! # Overview
//!
//! - [`RestResource`]: A named path under the API root, with an optional
//!   param filter hook
//! - [`ResourceHandle`]: A resource bound to a request handler, offering
//!   `get_all`, `get`, `post`/`create`, `put`/`update` and `delete`
//! - [`TastyPieResource`]: Adds `get_by_uri` and a memoised `schema`
//! - [`ResourceError`]: Registration and request failures
//!
//! # Paths
//!
//! | Call | Request |
//! |------|---------|
//! | `get_all(params)` | `GET /{path}` |
//! | `get(id, params)` | `GET /{path}/{id}` |
//! | `post(params)` | `POST /{path}` |
//! | `put(id, params)` | `PUT /{path}/{id}` |
//! | `delete(id, params)` | `DELETE /{path}/{id}` |

mod errors;
mod rest;
mod tastypie;

pub use errors::ResourceError;
pub use rest::{ParamFilter, ResourceHandle, RestResource};
pub use tastypie::TastyPieResource;
