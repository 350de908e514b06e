#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use condo_api::auth::jwt::JwtConfig;
use condo_api::config::ServerConfig;
use condo_api::notifications::{NotificationWriter, NotifierConfig};
use condo_api::router::build_app_router;
use condo_api::state::AppState;
use condo_db::{LocalStore, StoreMode};

/// Password shared by the seeded `admin` and `diana` accounts.
pub const SEED_PASSWORD: &str = "123";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// The application router plus the temporary directory backing its local
/// store. The directory is removed when this value is dropped.
pub struct TestApp {
    router: Router,
    _data_dir: TempDir,
}

impl TestApp {
    /// A fresh handle to the router. All handles share one store.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router over a freshly seeded local store with
/// no simulated latency and the notification writer disabled.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) is the production one.
pub fn build_test_app() -> TestApp {
    let data_dir = tempfile::tempdir().expect("temp dir should be created");
    let state = AppState {
        store: Arc::new(LocalStore::new(data_dir.path(), Duration::ZERO)),
        store_mode: StoreMode::Local,
        config: Arc::new(test_config()),
        notifier: Arc::new(NotificationWriter::new(NotifierConfig::disabled())),
    };

    TestApp {
        router: build_app_router(state),
        _data_dir: data_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router should not fail")
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    builder(method, uri, token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::GET, uri, Some(token)).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Log in and return the access token. Panics unless the login succeeds.
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login as {username} should succeed");
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login response should carry access_token")
        .to_string()
}

pub async fn admin_token(app: Router) -> String {
    login(app, "admin", SEED_PASSWORD).await
}

pub async fn staff_token(app: Router) -> String {
    login(app, "diana", SEED_PASSWORD).await
}
