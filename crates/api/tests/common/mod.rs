//! Shared harness for API integration tests.
//!
//! Builds the real application router (same middleware stack as `main`)
//! around a per-test database pool and an injectable push gateway.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use beacon_api::auth::jwt::{generate_access_token, JwtConfig};
use beacon_api::config::ServerConfig;
use beacon_api::router::build_app;
use beacon_api::state::AppState;
use beacon_db::models::device::DeviceRegistration;
use beacon_db::repositories::DeviceRepo;
use beacon_push::PushGateway;

/// Signing secret shared by test tokens and the test server config.
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with the given pool and push gateway.
pub fn build_test_app(pool: PgPool, push: Arc<dyn PushGateway>) -> Router {
    build_app(AppState {
        pool,
        config: Arc::new(test_config()),
        push,
    })
}

/// A `Bearer <token>` header value for the given owner uid.
#[allow(dead_code)]
pub fn bearer(uid: &str) -> String {
    let token = generate_access_token(uid, &test_config().jwt).unwrap();
    format!("Bearer {token}")
}

/// Send a GET request, optionally authenticated.
#[allow(dead_code)]
pub async fn get(app: &Router, path: &str, auth: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(value) = auth {
        builder = builder.header("authorization", value);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a POST request with a JSON body, optionally authenticated.
#[allow(dead_code)]
pub async fn post_json(
    app: &Router,
    path: &str,
    auth: Option<&str>,
    body: &serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("content-type", "application/json");
    if let Some(value) = auth {
        builder = builder.header("authorization", value);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Seed a device row directly, bypassing the API.
///
/// Pass an empty `token` to register a device with no usable push address.
#[allow(dead_code)]
pub async fn seed_device(pool: &PgPool, device_id: &str, owner_uid: &str, token: &str) {
    let registration = DeviceRegistration {
        device_id: device_id.to_string(),
        owner_uid: owner_uid.to_string(),
        device_name: "Test Phone".to_string(),
        fcm_token: token.to_string(),
        platform: "android".to_string(),
    };
    DeviceRepo::upsert(pool, &registration).await.unwrap();
}
