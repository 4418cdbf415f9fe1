//! Token lifecycle behavior: acquisition, reuse, expiry, and the
//! single re-authentication retry on 401.

use ardea_client::{AssetsClient, AssetsClientError};
use ardea_core::config::AssetsConfig;
use ardea_core::types::SearchRequest;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> AssetsConfig {
    AssetsConfig::new(server.uri(), "api", "secret")
}

fn login_ok(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "loginSuccess": true,
        "loginFaultMessage": "",
        "serverVersion": "6.98",
        "authToken": token
    }))
}

fn empty_search() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "firstResult": 0,
        "maxResultHits": 50,
        "totalHits": 0,
        "hits": []
    }))
}

#[tokio::test]
async fn fresh_token_is_reused_across_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/apilogin"))
        .and(body_string_contains("name=\"username\""))
        .respond_with(login_ok("token-1"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/search"))
        .respond_with(empty_search())
        .expect(2)
        .mount(&server)
        .await;

    let client = AssetsClient::new(config(&server)).unwrap();
    client.search(&SearchRequest::new("*")).await.unwrap();
    client.search(&SearchRequest::new("*")).await.unwrap();

    assert_eq!(client.token().await.as_deref(), Some("token-1"));
    assert!(client.is_token_valid().await);
}

#[tokio::test]
async fn expired_token_triggers_reauthentication() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/apilogin"))
        .respond_with(login_ok("token-1"))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/search"))
        .respond_with(empty_search())
        .expect(2)
        .mount(&server)
        .await;

    // Zero validity: the cached token is already expired on the next call.
    let mut config = config(&server);
    config.token_validity_minutes = Some(0);

    let client = AssetsClient::new(config).unwrap();
    client.search(&SearchRequest::new("*")).await.unwrap();
    assert!(!client.is_token_valid().await);
    client.search(&SearchRequest::new("*")).await.unwrap();
}

#[tokio::test]
async fn single_401_reauthenticates_once_and_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/apilogin"))
        .respond_with(login_ok("token-2"))
        .expect(2)
        .mount(&server)
        .await;

    // First attempt gets a 401, the retry succeeds.
    Mock::given(method("GET"))
        .and(path("/services/search"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/search"))
        .respond_with(empty_search())
        .expect(1)
        .mount(&server)
        .await;

    let client = AssetsClient::new(config(&server)).unwrap();
    let results = client.search(&SearchRequest::new("*")).await.unwrap();
    assert_eq!(results.total_hits, 0);
}

#[tokio::test]
async fn repeated_401_surfaces_an_error() {
    let server = MockServer::start().await;

    // Exactly two logins: the initial one plus one re-authentication.
    Mock::given(method("POST"))
        .and(path("/services/apilogin"))
        .respond_with(login_ok("token-3"))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/search"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let client = AssetsClient::new(config(&server)).unwrap();
    let err = client.search(&SearchRequest::new("*")).await.unwrap_err();
    assert!(err.is_unauthorized(), "unexpected error: {err}");
}

#[tokio::test]
async fn soft_401_in_200_body_also_retries_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/apilogin"))
        .respond_with(login_ok("token-4"))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorcode": 401,
            "message": "Not logged in"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/search"))
        .respond_with(empty_search())
        .expect(1)
        .mount(&server)
        .await;

    let client = AssetsClient::new(config(&server)).unwrap();
    client.search(&SearchRequest::new("*")).await.unwrap();
}

#[tokio::test]
async fn failed_login_surfaces_fault_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/apilogin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "loginSuccess": false,
            "loginFaultMessage": "Invalid username or password",
            "serverVersion": "6.98",
            "authToken": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AssetsClient::new(config(&server)).unwrap();
    let err = client.search(&SearchRequest::new("*")).await.unwrap_err();
    match err {
        AssetsClientError::Login(message) => {
            assert_eq!(message, "Invalid username or password")
        }
        other => panic!("expected login error, got: {other}"),
    }
}

#[tokio::test]
async fn injected_token_skips_login() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/search"))
        .respond_with(empty_search())
        .expect(1)
        .mount(&server)
        .await;

    let client = AssetsClient::new(config(&server)).unwrap();
    client.set_token("externally-minted").await;
    client.search(&SearchRequest::new("*")).await.unwrap();
    // No apilogin mock is mounted; a login attempt would have 404ed.
}
