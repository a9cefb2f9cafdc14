//! Integration tests for the TastyPie connection against a mock server.

use std::time::Duration;

use drest::{ApiConfig, ApiError, AuthMechanism, BaseUrl, Params, ResourceError, TastyPieApi};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn root_listing() -> serde_json::Value {
    json!({
        "users": {
            "list_endpoint": "/api/v0/users/",
            "schema": "/api/v0/users/schema/"
        },
        "projects": {
            "list_endpoint": "/api/v0/projects/",
            "schema": "/api/v0/projects/schema/"
        }
    })
}

async fn mount_root(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v0/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(root_listing()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_connect_detects_resources() {
    let server = MockServer::start().await;
    mount_root(&server).await;

    let api = assert_ok!(
        TastyPieApi::connect(&format!("{}/api/v0/", server.uri()), AuthMechanism::ApiKey).await
    );

    let mut resources = api.resources();
    resources.sort_unstable();
    assert_eq!(resources, vec!["projects", "users"]);
}

#[tokio::test]
async fn test_find_resources_skips_known_names() {
    let server = MockServer::start().await;
    mount_root(&server).await;

    let mut api =
        TastyPieApi::new(&format!("{}/api/v0/", server.uri()), AuthMechanism::ApiKey).unwrap();
    api.add_resource("users", Some("/accounts/users/")).unwrap();

    let added = assert_ok!(api.find_resources().await);
    assert_eq!(added, vec!["projects".to_string()]);

    // The user-registered path wins over the detected one.
    let users = api.resource("users").unwrap();
    assert_eq!(users.resource().path(), "accounts/users");

    let added = assert_ok!(api.find_resources().await);
    assert!(added.is_empty());
}

#[tokio::test]
async fn test_connect_with_config_uses_config_for_detection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/"))
        .and(header("X-Tenant", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(root_listing()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiConfig::builder()
        .base_url(BaseUrl::new(format!("{}/api/v0/", server.uri())).unwrap())
        .timeout(Duration::from_secs(5))
        .header("X-Tenant", "acme")
        .build()
        .unwrap();
    let api = assert_ok!(TastyPieApi::connect_with_config(&config, AuthMechanism::Basic).await);

    assert_eq!(api.mechanism(), AuthMechanism::Basic);
    assert!(api.resource("users").is_some());
    assert!(api.resource("projects").is_some());
}

#[tokio::test]
async fn test_find_resources_skips_invalid_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "": {"list_endpoint": "/api/v0//"},
            "projects": {"list_endpoint": "/api/v0/projects/"},
            "users": {"list_endpoint": "/api/v0/users/"}
        })))
        .mount(&server)
        .await;

    let mut api =
        TastyPieApi::new(&format!("{}/api/v0/", server.uri()), AuthMechanism::ApiKey).unwrap();

    let added = assert_ok!(api.find_resources().await);
    assert_eq!(added, vec!["projects".to_string(), "users".to_string()]);
    assert_eq!(api.resources(), vec!["projects", "users"]);
}

#[tokio::test]
async fn test_find_resources_rejects_non_object_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["users"])))
        .mount(&server)
        .await;

    let result =
        TastyPieApi::connect(&format!("{}/api/v0/", server.uri()), AuthMechanism::ApiKey).await;
    assert!(matches!(result, Err(ApiError::UnexpectedListing { .. })));
}

#[tokio::test]
async fn test_api_key_auth_header() {
    let server = MockServer::start().await;
    mount_root(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v0/users/"))
        .and(header(
            "Authorization",
            "ApiKey john.doe:34547a497326dde80bcaf8bcee43e3d1b5f24cc9",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"objects": []})))
        .expect(1)
        .mount(&server)
        .await;

    let mut api = assert_ok!(
        TastyPieApi::connect(&format!("{}/api/v0/", server.uri()), AuthMechanism::ApiKey).await
    );
    api.auth("john.doe", "34547a497326dde80bcaf8bcee43e3d1b5f24cc9")
        .unwrap();

    let users = api.resource("users").unwrap();
    assert_ok!(users.get_all(Params::new()).await);
}

#[tokio::test]
async fn test_basic_auth_mechanism_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/users/1/"))
        // base64("admin:pass")
        .and(header("Authorization", "Basic YWRtaW46cGFzcw=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let mut api =
        TastyPieApi::new(&format!("{}/api/v0/", server.uri()), AuthMechanism::Basic).unwrap();
    api.auth("admin", "pass").unwrap();
    api.add_resource("users", None).unwrap();

    let users = api.resource("users").unwrap();
    assert_ok!(users.get(1, Params::new()).await);
}

#[tokio::test]
async fn test_get_by_uri_uses_last_segment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/users/234/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 234})))
        .expect(2)
        .mount(&server)
        .await;

    let mut api =
        TastyPieApi::new(&format!("{}/api/v0/", server.uri()), AuthMechanism::ApiKey).unwrap();
    api.add_resource("users", None).unwrap();
    let users = api.resource("users").unwrap();

    let response = assert_ok!(users.get_by_uri("/api/v0/users/234/", Params::new()).await);
    assert_eq!(response.body["id"], 234);

    assert_ok!(users.get_by_uri("/api/v0/users/234", Params::new()).await);
}

#[tokio::test]
async fn test_schema_is_fetched_once() {
    let server = MockServer::start().await;
    let schema = json!({
        "allowed_list_http_methods": ["get", "post"],
        "fields": {"username": {"type": "string"}}
    });

    Mock::given(method("GET"))
        .and(path("/api/v0/users/schema/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schema.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let mut api =
        TastyPieApi::new(&format!("{}/api/v0/", server.uri()), AuthMechanism::ApiKey).unwrap();
    api.add_resource("users", None).unwrap();

    let first = assert_ok!(api.resource("users").unwrap().schema().await);
    assert_eq!(first, &schema);

    let second = assert_ok!(api.resource("users").unwrap().schema().await);
    assert_eq!(second, &schema);
}

#[tokio::test]
async fn test_schema_failure_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/users/schema/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/users/schema/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fields": {}})))
        .mount(&server)
        .await;

    let mut api =
        TastyPieApi::new(&format!("{}/api/v0/", server.uri()), AuthMechanism::ApiKey).unwrap();
    api.add_resource("users", None).unwrap();
    let users = api.resource("users").unwrap();

    let error = assert_err!(users.schema().await);
    assert!(matches!(error, ResourceError::Request { .. }));
    assert_eq!(error.status(), Some(503));

    let schema = assert_ok!(users.schema().await);
    assert_eq!(schema, &json!({"fields": {}}));
}

#[tokio::test]
async fn test_unknown_auth_mechanism_name() {
    let result = "oauth2".parse::<AuthMechanism>();
    assert!(matches!(
        result,
        Err(ApiError::UnknownAuthMechanism { mechanism }) if mechanism == "oauth2"
    ));
}
