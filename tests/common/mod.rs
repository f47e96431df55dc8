// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use codomi_api::config::Config;
use codomi_api::routes::create_router;
use codomi_api::services::{DemoVerifier, DirectoryService, ScopeResolver};
use codomi_api::store::{MemoryStore, SessionStore};
use codomi_api::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app over a fresh in-memory store.
/// Returns the router, the shared state, and the store for inspection.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    let config = Config::test_default();
    let store = Arc::new(MemoryStore::new());
    let verifier = Arc::new(DemoVerifier::new(config.demo_password.clone()));

    let resolver = ScopeResolver::new(
        verifier,
        store.clone() as Arc<dyn SessionStore>,
        DirectoryService::demo(),
    );

    let state = Arc::new(AppState {
        config,
        resolver: tokio::sync::Mutex::new(resolver),
    });

    (create_router(state.clone()), state, store)
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Log in through the API with the shared demo password.
#[allow(dead_code)]
pub async fn login(app: &axum::Router, email: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({"email": email, "password": "123456"}),
        ))
        .await
        .unwrap();
    response.status()
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
