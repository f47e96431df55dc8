// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login flow tests.
//!
//! These tests verify that:
//! 1. A successful login opens a session and forces a fresh scope selection
//! 2. Failed logins report invalid credentials and write nothing
//! 3. Logout is idempotent

use axum::http::StatusCode;
use codomi_api::store::keys;
use codomi_api::store::SessionStore;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_admin_login_then_explicit_selection() {
    let (app, _state, _store) = common::create_test_app();

    // Two condominiums are reachable for an admin, so nothing is auto-selected
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/auth/login",
            json!({"email": "admin@codomi.com", "password": "123456"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let session = common::read_json(response).await;
    assert_eq!(session["user"]["role"], "admin");
    assert!(session["selected_condominium"].is_null());
    assert!(session["selected_building"].is_null());
    assert_eq!(session["condominiums"].as_array().unwrap().len(), 2);

    // Pick a condominium; the building selection opens up
    let response = app
        .clone()
        .oneshot(common::json_request(
            "PUT",
            "/api/session/condominium",
            json!({"id": "1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let session = common::read_json(response).await;
    assert_eq!(session["selected_condominium"]["id"], "1");
    assert!(session["selected_building"].is_null());
    assert_eq!(session["buildings"].as_array().unwrap().len(), 2);

    // Pick a building within it
    let response = app
        .clone()
        .oneshot(common::json_request(
            "PUT",
            "/api/session/building",
            json!({"id": "1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let session = common::read_json(response).await;
    assert_eq!(session["selected_building"]["id"], "1");
    assert_eq!(session["selected_building"]["condominium_id"], "1");
}

#[tokio::test]
async fn test_unknown_email_rejected_without_store_writes() {
    let (app, _state, store) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/auth/login",
            json!({"email": "nobody@email.com", "password": "123456"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::read_json(response).await;
    assert_eq!(body["error"], "invalid_credentials");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let (app, _state, store) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/auth/login",
            json!({"email": "admin@codomi.com", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_malformed_email_is_bad_request() {
    let (app, _state, _store) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/auth/login",
            json!({"email": "not-an-email", "password": "123456"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_persists_session_keys() {
    let (app, _state, store) = common::create_test_app();

    assert_eq!(common::login(&app, "roberto@email.com").await, StatusCode::OK);

    // Junta scope auto-selects, so all three keys are written
    assert!(store.get(keys::USER).unwrap().is_some());
    assert!(store.get(keys::CONDOMINIUM).unwrap().is_some());
    assert!(store.get(keys::BUILDING).unwrap().is_some());
}

#[tokio::test]
async fn test_logout_clears_store_and_is_idempotent() {
    let (app, _state, store) = common::create_test_app();
    assert_eq!(common::login(&app, "roberto@email.com").await, StatusCode::OK);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(common::json_request("POST", "/auth/logout", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(store.is_empty());
    }
}
