//! Integration tests for the hosted REST template store.
//!
//! Each test runs the adapter against an in-process PostgREST stand-in
//! bound to an ephemeral local port and inspects what it received.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;
use valentine_core::store::{StoreError, TemplateFilter, TemplatePatch, TemplateStore};
use valentine_db::rest_store::{RestConfig, RestTemplateStore};

const SERVICE_KEY: &str = "service-role-key";

/// One request as seen by the stub.
#[derive(Debug, Clone)]
struct Received {
    method: Method,
    query: String,
    headers: HeaderMap,
    body: Bytes,
}

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    rows: Value,
    received: Arc<Mutex<Vec<Received>>>,
}

async fn respond(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    stub.received.lock().unwrap().push(Received {
        method,
        query: uri.query().unwrap_or_default().to_string(),
        headers,
        body,
    });
    (stub.status, Json(stub.rows.clone()))
}

/// Serve `rows` with `status` for every request on the templates table.
async fn spawn_stub(status: StatusCode, rows: Value) -> (RestTemplateStore, Arc<Mutex<Vec<Received>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        status,
        rows,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/rest/v1/projects", any(respond))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let store = RestTemplateStore::new(&RestConfig {
        base_url: format!("http://{addr}"),
        service_role_key: SERVICE_KEY.to_string(),
        table: "projects".to_string(),
    })
    .unwrap();
    (store, received)
}

fn row(id: Uuid) -> Value {
    json!({
        "id": id,
        "owner_email": "a@x.com",
        "template_code": "ABC123",
        "template_type": "simp",
        "slug": null,
        "is_published": false,
        "data": null,
    })
}

fn only_request(received: &Arc<Mutex<Vec<Received>>>) -> Received {
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1, "expected exactly one request");
    received[0].clone()
}

#[tokio::test]
async fn find_one_sends_service_key_and_eq_filters() {
    let id = Uuid::new_v4();
    let (store, received) = spawn_stub(StatusCode::OK, json!([row(id)])).await;

    let found = store
        .find_one(&TemplateFilter::by_credentials("a@x.com", "ABC123"))
        .await
        .unwrap();
    assert_eq!(found.map(|t| t.id), Some(id));

    let request = only_request(&received);
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.headers["apikey"], SERVICE_KEY);
    assert_eq!(
        request.headers["authorization"],
        format!("Bearer {SERVICE_KEY}").as_str()
    );
    assert!(request.query.contains("template_code=eq.ABC123"));
    assert!(request.query.contains("template_type=eq.simp"));
    assert!(request.query.contains("limit=2"));
}

#[tokio::test]
async fn find_one_without_rows_is_none() {
    let (store, _) = spawn_stub(StatusCode::OK, json!([])).await;

    let found = store
        .find_one(&TemplateFilter::published("abcd1234"))
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn find_one_with_two_rows_is_ambiguous() {
    let (store, _) = spawn_stub(
        StatusCode::OK,
        json!([row(Uuid::new_v4()), row(Uuid::new_v4())]),
    )
    .await;

    let result = store
        .find_one(&TemplateFilter::by_credentials("a@x.com", "ABC123"))
        .await;
    assert!(matches!(result, Err(StoreError::Ambiguous(2))));
}

#[tokio::test]
async fn update_patches_by_id_and_asks_for_the_row_back() {
    let id = Uuid::new_v4();
    let mut updated = row(id);
    updated["is_published"] = json!(true);
    updated["slug"] = json!("abcd1234");
    let (store, received) = spawn_stub(StatusCode::OK, json!([updated])).await;

    let patch = TemplatePatch {
        data: None,
        is_published: Some(true),
        slug: Some("abcd1234".to_string()),
    };
    let template = store.update(id, &patch).await.unwrap();
    assert!(template.is_published);
    assert_eq!(template.slug.as_deref(), Some("abcd1234"));

    let request = only_request(&received);
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.query, format!("id=eq.{id}"));
    assert_eq!(request.headers["prefer"], "return=representation");
    assert_eq!(request.headers["apikey"], SERVICE_KEY);

    // Unset patch fields are omitted, not sent as null.
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body, json!({ "is_published": true, "slug": "abcd1234" }));
}

#[tokio::test]
async fn update_with_empty_response_is_missing() {
    let (store, _) = spawn_stub(StatusCode::OK, json!([])).await;
    let id = Uuid::new_v4();

    let result = store.update(id, &TemplatePatch::default()).await;
    assert!(matches!(result, Err(StoreError::Missing(missing)) if missing == id));
}

#[tokio::test]
async fn error_status_is_a_backend_error_without_the_url() {
    let (store, _) = spawn_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "message": "boom" }),
    )
    .await;

    let err = store
        .find_one(&TemplateFilter::by_credentials("a@x.com", "ABC123"))
        .await
        .unwrap_err();

    match err {
        StoreError::Backend(message) => {
            assert!(message.contains("500"), "unexpected message {message}");
            assert!(!message.contains("ABC123"));
            assert!(!message.contains("template_code"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn ping_follows_status() {
    let (healthy, received) = spawn_stub(StatusCode::OK, json!([])).await;
    healthy.ping().await.unwrap();
    assert!(only_request(&received).query.contains("limit=1"));

    let (unauthorized, _) = spawn_stub(StatusCode::UNAUTHORIZED, json!({})).await;
    assert!(matches!(
        unauthorized.ping().await,
        Err(StoreError::Backend(_))
    ));
}
