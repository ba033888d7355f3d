//! End-to-end tests: real reqwest transport and TCP probe against a mock
//! API server.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use tether::{AppError, Command, Services, commands};
use tether_application::{ClientConfig, CredentialStore, InMemoryCredentialStore, SessionEvent};
use tether_domain::{ApiError, ConnectivityState, RequestDescriptor};
use tether_infrastructure::{FileProfileCache, ReqwestTransport};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn profile_json(full_name: &str) -> serde_json::Value {
    json!({
        "id": 42,
        "fullName": full_name,
        "firstName": "Jane",
        "lastName": "Doe",
        "isAdmin": false,
        "hasSecondUnitOfMeasure": false,
        "isSimpleUser": true,
        "isOrgAdmin": false,
        "isSuperAdmin": false
    })
}

fn token_json() -> serde_json::Value {
    json!({
        "token": "access-1",
        "accessToken": "access-1",
        "accessTokenExpireAt": "2030-01-01T00:00:00Z",
        "refreshToken": "refresh-1",
        "refreshTokenExpireAt": "2030-02-01T00:00:00Z",
        "userInfo": profile_json("Jane Doe")
    })
}

struct Harness {
    services: Services,
    credentials: Arc<InMemoryCredentialStore>,
    _cache_dir: TempDir,
}

async fn harness(base_url: &str, credentials: InMemoryCredentialStore) -> Harness {
    let cache_dir = TempDir::new().unwrap();
    let credentials = Arc::new(credentials);
    let config = ClientConfig::default()
        .with_base_url(base_url)
        .with_request_timeout(Duration::from_secs(5));

    let services = Services::build(
        config,
        Arc::new(ReqwestTransport::new().unwrap()),
        Arc::clone(&credentials) as Arc<dyn CredentialStore>,
        Arc::new(FileProfileCache::new(cache_dir.path().join("cached_user.json"))),
    )
    .unwrap();
    services.start().await;

    Harness {
        services,
        credentials,
        _cache_dir: cache_dir,
    }
}

// ============================================================================
// Sign-in / sign-out
// ============================================================================

#[tokio::test]
async fn test_sign_in_then_profile_uses_new_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/account/GenerateToken"))
        .and(body_json(json!({"username": "jane", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/profile"))
        .and(header("Authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("Jane Doe")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server.uri(), InMemoryCredentialStore::new()).await;
    assert_eq!(h.services.monitor.current_state(), ConnectivityState::Connected);

    let output = commands::run(
        Command::SignIn {
            username: "jane".to_string(),
            password: Some("secret".to_string()),
        },
        &h.services,
    )
    .await
    .unwrap();
    assert_eq!(output, "Signed in as Jane Doe (JD)");
    assert!(h.services.state.is_authenticated());

    let output = commands::run(Command::Profile, &h.services).await.unwrap();
    let printed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(printed["fullName"], "Jane Doe");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_sign_in_without_password_is_rejected_locally() {
    let mock_server = MockServer::start().await;
    let h = harness(&mock_server.uri(), InMemoryCredentialStore::new()).await;

    let result = commands::run(
        Command::SignIn {
            username: "jane".to_string(),
            password: None,
        },
        &h.services,
    )
    .await;
    assert!(matches!(result, Err(AppError::MissingPassword)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_sign_in_reports_validation_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/account/GenerateToken"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": {"username": ["required"], "password": ["too short"]},
            "title": "One or more validation errors occurred.",
            "status": 400
        })))
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server.uri(), InMemoryCredentialStore::new()).await;
    let error = h.services.session.sign_in("", "x").await.unwrap_err();

    assert_eq!(error, ApiError::ValidationError("required. too short".to_string()));
    assert_eq!(error.to_string(), "required. too short");
    assert!(!h.credentials.has_valid_token().await);
}

#[tokio::test]
async fn test_sign_out_clears_everything() {
    let mock_server = MockServer::start().await;
    let h = harness(
        &mock_server.uri(),
        InMemoryCredentialStore::with_tokens("access-1", "refresh-1"),
    )
    .await;

    let output = commands::run(Command::SignOut, &h.services).await.unwrap();
    assert_eq!(output, "Signed out");
    assert!(!h.services.session.has_valid_token().await);
    assert_eq!(h.credentials.refresh_token().await.unwrap(), None);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Dispatch outcomes
// ============================================================================

#[tokio::test]
async fn test_unauthorized_broadcasts_and_invalidates_session() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let h = harness(
        &mock_server.uri(),
        InMemoryCredentialStore::with_tokens("stale", "refresh"),
    )
    .await;
    h.services
        .state
        .set_user(Some(serde_json::from_value(profile_json("Jane Doe")).unwrap()))
        .await;
    let mut events = h.services.client.events().subscribe();
    let mut state = h.services.state.subscribe();
    state.mark_unchanged();

    let result = commands::run(Command::Profile, &h.services).await;
    assert!(matches!(result, Err(AppError::Api(ApiError::Unauthorized))));
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Unauthorized);
    assert!(events.try_recv().is_err());

    tokio::time::timeout(Duration::from_secs(5), state.changed())
        .await
        .expect("session was not invalidated")
        .unwrap();
    assert_eq!(h.services.state.current_user(), None);
}

#[tokio::test]
async fn test_no_token_means_no_authorization_header() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("Jane Doe")))
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server.uri(), InMemoryCredentialStore::new()).await;
    h.services.users.fetch_profile().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[0].headers.get("accept").unwrap().to_str().unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(wiremock::matchers::query_param("search", "a b&c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server.uri(), InMemoryCredentialStore::new()).await;
    let descriptor = RequestDescriptor::get("/items").with_query("search", "a b&c");
    let items: Vec<i64> = h.services.client.dispatch(&descriptor).await.unwrap();
    assert_eq!(items, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_status_classification() {
    let mock_server = MockServer::start().await;
    for (route, status) in [("/forbidden", 403), ("/missing", 404), ("/teapot", 418)] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/garbled"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\":"))
        .mount(&mock_server)
        .await;

    let h = harness(&mock_server.uri(), InMemoryCredentialStore::new()).await;
    let client = &h.services.client;
    let call = |p: &'static str| async move {
        client
            .dispatch::<serde_json::Value>(&RequestDescriptor::get(p))
            .await
    };

    assert_eq!(call("/forbidden").await, Err(ApiError::Forbidden));
    assert_eq!(call("/missing").await, Err(ApiError::NotFound));
    assert_eq!(call("/teapot").await, Err(ApiError::Unknown));
    assert_eq!(
        call("/broken").await,
        Err(ApiError::ServerError("Server error: 503".to_string()))
    );
    assert_eq!(call("/garbled").await, Err(ApiError::DecodingError));
}

#[tokio::test]
async fn test_unreachable_origin_fails_fast() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let h = harness(
        &format!("http://127.0.0.1:{port}"),
        InMemoryCredentialStore::new(),
    )
    .await;
    assert_eq!(
        h.services.monitor.current_state(),
        ConnectivityState::Disconnected
    );

    let result = h.services.users.fetch_profile().await;
    assert_eq!(result, Err(ApiError::NoConnection));
    assert_eq!(result.unwrap_err().to_string(), "No internet connection");

    let status = commands::run(Command::Status, &h.services).await.unwrap();
    assert!(status.contains("connectivity: disconnected"));
    assert!(status.contains("token held:   false"));
}
