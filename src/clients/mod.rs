//! HTTP layer for talking to the remote API.
//!
//! # Overview
//!
//! - [`RequestHandler`]: Joins paths onto the base URL, attaches headers and
//!   credentials, and maps non-2xx responses to errors
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`Params`]: Request parameters
//!
//! # Parameter Encoding
//!
//! - `GET` and `DELETE` send params as the query string
//! - `POST` and `PUT` send params as a JSON object body
//!
//! Each call is a single HTTP exchange; nothing is retried.

mod errors;
mod http_request;
mod http_response;
mod request_handler;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, Params, ParseMethodError};
pub use http_response::HttpResponse;
pub use request_handler::{RequestHandler, CLIENT_VERSION};
