//! Authentication for outgoing requests.
//!
//! # Overview
//!
//! - [`Credentials`]: Basic Auth or TastyPie API key credentials, rendered as
//!   an `Authorization` header value
//! - [`AuthMechanism`]: Selects the credential form used by
//!   [`TastyPieApi`](crate::TastyPieApi)
//!
//! Credentials are attached as a header on every request. They are never
//! placed in the URL; [`BaseUrl`](crate::BaseUrl) rejects URLs that carry
//! userinfo.
//!
//! # Example
//!
//! ```rust
//! use drest::{AuthMechanism, Credentials};
//!
//! let basic = Credentials::basic("john.doe", "secret").unwrap();
//! assert!(basic.header_value().starts_with("Basic "));
//!
//! let key = AuthMechanism::ApiKey.credentials("john.doe", "abc123").unwrap();
//! assert_eq!(key.header_value(), "ApiKey john.doe:abc123");
//! ```

mod credentials;

pub use credentials::{AuthMechanism, Credentials};
