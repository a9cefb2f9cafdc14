//! Request handler that talks to the remote API.
//!
//! [`RequestHandler`] joins request paths onto the base URL, attaches default
//! headers and credentials, encodes params, and turns non-2xx responses into
//! [`HttpError::Response`].

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::auth::Credentials;
use crate::clients::errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpMethod, HttpRequest, Params};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiConfig, BaseUrl};
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sends requests to a single API root.
///
/// # Example
///
/// ```rust,ignore
/// use drest::clients::{HttpMethod, RequestHandler};
/// use drest::{ApiConfig, BaseUrl, Credentials};
///
/// let config = ApiConfig::new(BaseUrl::new("http://localhost:8000/api/v1/")?);
/// let mut handler = RequestHandler::new(&config)?;
/// handler.set_auth_credentials(Credentials::basic("john.doe", "secret")?);
///
/// let response = handler.send(HttpMethod::Get, "/users/1/", Default::default()).await?;
/// println!("{}", response.body);
/// ```
#[derive(Debug)]
pub struct RequestHandler {
    client: reqwest::Client,
    base_url: BaseUrl,
    trailing_slash: bool,
    default_headers: HeaderMap,
    credentials: Option<Credentials>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestHandler>();
};

impl RequestHandler {
    /// Creates a handler for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ClientInit`] if the underlying HTTP client cannot
    /// be built (e.g., TLS initialization failure).
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{user_agent_prefix}drest-rs v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, parse_header_value("User-Agent", &user_agent)?);
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (key, value) in config.headers() {
            let (name, value) = parse_header(key, value)?;
            default_headers.insert(name, value);
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if config.ignore_ssl_validation() {
            tracing::warn!("TLS certificate validation is disabled for {}", config.base_url());
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::ClientInit {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            trailing_slash: config.trailing_slash(),
            default_headers,
            credentials: None,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the headers sent with every request (credentials excluded).
    ///
    /// Header names are case-insensitive; adding `accept` replaces `Accept`.
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Returns the configured credentials, if any.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Attaches credentials to every subsequent request.
    pub fn set_auth_credentials(&mut self, credentials: Credentials) {
        tracing::debug!("Using {} credentials for user {}", kind(&credentials), credentials.user());
        self.credentials = Some(credentials);
    }

    /// Stops sending credentials.
    pub fn clear_auth_credentials(&mut self) {
        self.credentials = None;
    }

    /// Adds or replaces a default header.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the name or value is not valid HTTP.
    pub fn add_header(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let key: String = key.into();
        let value: String = value.into();
        let (name, value) = parse_header(&key, &value)?;
        self.default_headers.insert(name, value);
        Ok(())
    }

    /// Returns the full URL a request path resolves to.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        self.base_url.join(path, self.trailing_slash)
    }

    /// Builds and sends a request from a method, path, and params.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(method, path).params(params).build()?;
        self.request(request).await
    }

    /// Sends a request to the API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);
        let method = match request.http_method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut headers = self.default_headers.clone();
        for (key, value) in &request.extra_headers {
            let (name, value) = parse_header(key, value)
                .map_err(|_| InvalidHttpRequestError::InvalidHeader { name: key.clone() })?;
            headers.insert(name, value);
        }
        // Credentials go in last so they are the only Authorization value
        if let Some(credentials) = &self.credentials {
            let value = HeaderValue::from_str(&credentials.header_value()).map_err(|_| {
                InvalidHttpRequestError::InvalidHeader {
                    name: AUTHORIZATION.to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let mut req_builder = self.client.request(method, &url).headers(headers);

        if request.http_method.sends_body() {
            req_builder = req_builder.json(&serde_json::Value::Object(request.params.clone()));
        } else {
            let pairs = request.query_pairs();
            if !pairs.is_empty() {
                req_builder = req_builder.query(&pairs);
            }
        }

        tracing::debug!("{} {}", request.http_method, url);
        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;
        let response = HttpResponse::new(code, res_headers, HttpResponse::parse_body(&body_text));
        tracing::debug!("{} {} -> {}", request.http_method, url, code);

        if response.is_ok() {
            return Ok(response);
        }

        tracing::warn!(
            "{} {} failed with HTTP {} {}",
            request.http_method,
            url,
            code,
            response.reason
        );
        let request_id = response.request_id().map(String::from);
        Err(HttpError::Response(HttpResponseError::from_status(
            code,
            &response.reason,
            response.body,
            request_id,
        )))
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

fn parse_header(key: &str, value: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
    let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| ConfigError::InvalidHeader {
        name: key.to_string(),
    })?;
    Ok((name, parse_header_value(key, value)?))
}

fn parse_header_value(key: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeader {
        name: key.to_string(),
    })
}

const fn kind(credentials: &Credentials) -> &'static str {
    match credentials {
        Credentials::Basic { .. } => "basic",
        Credentials::ApiKey { .. } => "api key",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> ApiConfig {
        ApiConfig::new(BaseUrl::new("http://localhost:8000/api/v1/").unwrap())
    }

    #[test]
    fn test_handler_construction() {
        let handler = RequestHandler::new(&create_test_config()).unwrap();

        assert_eq!(handler.base_url().as_ref(), "http://localhost:8000/api/v1/");
        assert!(handler.credentials().is_none());
    }

    #[test]
    fn test_user_agent_header_format() {
        let handler = RequestHandler::new(&create_test_config()).unwrap();

        let user_agent = handler.default_headers()["User-Agent"].to_str().unwrap();
        assert!(user_agent.starts_with("drest-rs v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ApiConfig::builder()
            .base_url(BaseUrl::new("http://localhost:8000/").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let handler = RequestHandler::new(&config).unwrap();

        let user_agent = handler.default_headers()["User-Agent"].to_str().unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | drest-rs v"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let handler = RequestHandler::new(&create_test_config()).unwrap();

        assert_eq!(
            handler.default_headers().get("Accept"),
            Some(&HeaderValue::from_static("application/json"))
        );
    }

    #[test]
    fn test_config_headers_become_default_headers() {
        let config = ApiConfig::builder()
            .base_url(BaseUrl::new("http://localhost:8000/").unwrap())
            .header("X-Tenant", "acme")
            .build()
            .unwrap();
        let handler = RequestHandler::new(&config).unwrap();

        assert_eq!(
            handler.default_headers().get("x-tenant"),
            Some(&HeaderValue::from_static("acme"))
        );
    }

    #[test]
    fn test_credentials_are_not_default_headers() {
        let mut handler = RequestHandler::new(&create_test_config()).unwrap();
        handler.set_auth_credentials(Credentials::basic("john.doe", "secret").unwrap());

        assert!(handler.default_headers().get("Authorization").is_none());
        assert_eq!(handler.credentials().unwrap().user(), "john.doe");

        handler.clear_auth_credentials();
        assert!(handler.credentials().is_none());
    }

    #[test]
    fn test_add_header_validates() {
        let mut handler = RequestHandler::new(&create_test_config()).unwrap();

        handler.add_header("X-Api-Version", "2").unwrap();
        assert_eq!(
            handler.default_headers().get("X-Api-Version"),
            Some(&HeaderValue::from_static("2"))
        );

        let result = handler.add_header("Bad Header", "x");
        assert!(matches!(result, Err(ConfigError::InvalidHeader { .. })));
    }

    #[test]
    fn test_add_header_replaces_regardless_of_case() {
        let mut handler = RequestHandler::new(&create_test_config()).unwrap();

        handler.add_header("accept", "text/plain").unwrap();
        handler.add_header("user-agent", "custom").unwrap();

        let headers = handler.default_headers();
        assert_eq!(headers.get_all(ACCEPT).iter().count(), 1);
        assert_eq!(headers[ACCEPT], "text/plain");
        assert_eq!(headers.get_all(USER_AGENT).iter().count(), 1);
        assert_eq!(headers[USER_AGENT], "custom");
    }

    #[test]
    fn test_url_for_respects_trailing_slash_setting() {
        let handler = RequestHandler::new(&create_test_config()).unwrap();
        assert_eq!(handler.url_for("/users/1"), "http://localhost:8000/api/v1/users/1/");

        let config = ApiConfig::builder()
            .base_url(BaseUrl::new("http://localhost:8000/api/v1/").unwrap())
            .trailing_slash(false)
            .build()
            .unwrap();
        let handler = RequestHandler::new(&config).unwrap();
        assert_eq!(handler.url_for("/users/1"), "http://localhost:8000/api/v1/users/1");
    }

    #[test]
    fn test_handler_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RequestHandler>();
    }
}
