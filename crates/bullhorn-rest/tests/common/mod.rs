//! Shared helpers for the mock-server test suites.
//!
//! Not every suite exercises every helper.

#![allow(dead_code)]

use bullhorn_rest::{BaseUrl, BullhornClient, ClientConfig, Credentials};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Credentials the mock handshake accepts.
pub const USERNAME: &str = "api.agency";
pub const PASSWORD: &str = "hunter2";

/// OAuth client identity baked into the mock handshake.
pub const CLIENT_ID: &str = "client-abc";
pub const CLIENT_SECRET: &str = "client-shh";

/// Artifacts the mock handshake hands out, stage by stage.
pub const AUTH_CODE: &str = "abc123";
pub const ACCESS_TOKEN: &str = "tok456";
pub const SESSION_KEY: &str = "sess789";

/// Path of the instance REST base inside the mock server.
pub const REST_BASE_PATH: &str = "/rest-services/e999/";

/// Build a configuration pointing both handshake hosts at the mock server.
pub fn mock_config(server: &MockServer) -> ClientConfig {
    // For tests, the base URL types allow HTTP on loopback
    let base: BaseUrl = server.uri().parse().unwrap();
    ClientConfig::new(base.clone(), base, CLIENT_ID, CLIENT_SECRET)
}

/// Credentials matching the mocked authorization endpoint.
pub fn credentials() -> Credentials {
    Credentials::new(USERNAME, PASSWORD)
}

/// Mount the three handshake stages on the mock server.
///
/// Stage one redirects to a landing page whose URL carries [`AUTH_CODE`];
/// stage two hands out [`ACCESS_TOKEN`]; stage three opens a session
/// keyed by [`SESSION_KEY`] whose REST base points back into the mock
/// server.
pub async fn mount_handshake(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/authorize"))
        .and(query_param("response_type", "code"))
        .and(query_param("action", "Login"))
        .and(query_param("username", USERNAME))
        .and(query_param("password", PASSWORD))
        .and(query_param("client_id", CLIENT_ID))
        .respond_with(ResponseTemplate::new(302).insert_header(
            "location",
            format!("{}/login-done?code={}", server.uri(), AUTH_CODE),
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/login-done"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(query_param("grant_type", "authorization_code"))
        .and(query_param("code", AUTH_CODE))
        .and(query_param("client_id", CLIENT_ID))
        .and(query_param("client_secret", CLIENT_SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 600
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest-services/login"))
        .and(query_param("version", "*"))
        .and(query_param("access_token", ACCESS_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "restUrl": format!("{}{}", server.uri(), REST_BASE_PATH),
            "BhRestToken": SESSION_KEY
        })))
        .mount(server)
        .await;
}

/// Mount the handshake and drive a fresh client through it.
pub async fn connected_client(server: &MockServer) -> BullhornClient {
    mount_handshake(server).await;

    let mut client = BullhornClient::new(mock_config(server)).unwrap();
    client.connect(&credentials()).await.unwrap();
    client
}
