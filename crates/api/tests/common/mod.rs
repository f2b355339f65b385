#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use valentine_api::auth::jwt::JwtConfig;
use valentine_api::config::{ServerConfig, StoreConfig};
use valentine_api::router::build_app_router;
use valentine_api::state::AppState;
use valentine_core::access::AccessFlow;
use valentine_core::store::memory::MemoryTemplateStore;
use valentine_core::template::{Template, TEMPLATE_TYPE};

pub const TEST_LOGIN_URL: &str = "http://localhost:5173/auth/login";

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        login_url: TEST_LOGIN_URL.to_string(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            session_expiry_mins: 60,
        },
        store: StoreConfig::Memory { seed_path: None },
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<MemoryTemplateStore>) -> Router {
    let config = test_config();
    let state = AppState {
        flow: AccessFlow::new(store),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// An unpublished record with no slug and no data, as seeded out of band.
pub fn seed_template(email: &str, code: &str) -> Template {
    Template {
        id: Uuid::new_v4(),
        owner_email: email.to_string(),
        template_code: code.to_string(),
        template_type: TEMPLATE_TYPE.to_string(),
        slug: None,
        is_published: false,
        data: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A store holding the given records.
pub fn store_with(templates: impl IntoIterator<Item = Template>) -> Arc<MemoryTemplateStore> {
    Arc::new(MemoryTemplateStore::with_templates(templates))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("response body should be JSON")
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).expect("response body should be UTF-8")
}
