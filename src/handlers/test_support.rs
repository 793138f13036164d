use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tower::ServiceExt;

use crate::app;
use crate::memory::InMemoryPetStore;
use crate::service::PetService;
use crate::state::AppState;

/// Full router over an empty in-memory store
pub fn test_app() -> Router {
    let state = AppState {
        pets: PetService::new(Arc::new(InMemoryPetStore::new())),
    };
    app::router(state)
}

/// Send one request through the router, returning status and raw body
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

pub fn decode<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap()
}

/// Create a pet through the API and assert it succeeded
pub async fn create_pet(app: &Router, id: &str, name: &str, age: i32) {
    let (status, _) = send(
        app,
        "POST",
        "/pets",
        Some(serde_json::json!({"id": id, "name": name, "age": age})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
