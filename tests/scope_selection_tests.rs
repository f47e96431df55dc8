// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scope selection tests: auto-selection and access policy enforcement
//! through the API.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_junta_login_auto_selects_assigned_scope() {
    let (app, _state, _store) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/auth/login",
            json!({"email": "roberto@email.com", "password": "123456"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Exactly one condominium and building are reachable, both auto-selected
    let session = common::read_json(response).await;
    assert_eq!(session["user"]["role"], "junta");
    assert_eq!(session["selected_condominium"]["id"], "1");
    assert_eq!(session["selected_building"]["id"], "1");
    assert_eq!(session["condominiums"].as_array().unwrap().len(), 1);
    assert_eq!(session["buildings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_owner_login_auto_selects_condominium_only() {
    let (app, _state, _store) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/auth/login",
            json!({"email": "maria@email.com", "password": "123456"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let session = common::read_json(response).await;
    assert_eq!(session["selected_condominium"]["id"], "1");
    assert!(session["selected_building"].is_null());
    assert_eq!(session["buildings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_building_of_other_condominium_rejected() {
    let (app, _state, _store) = common::create_test_app();
    common::login(&app, "admin@codomi.com").await;

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

    // Building 3 belongs to condominium 2
    let response = app
        .clone()
        .oneshot(common::json_request(
            "PUT",
            "/api/session/building",
            json!({"id": "3"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = common::read_json(response).await;
    assert_eq!(body["error"], "out_of_scope");

    // Selection is unchanged
    let response = app
        .oneshot(common::json_request("GET", "/api/session", json!({})))
        .await
        .unwrap();
    let session = common::read_json(response).await;
    assert_eq!(session["selected_condominium"]["id"], "1");
    assert!(session["selected_building"].is_null());
}

#[tokio::test]
async fn test_junta_cannot_escape_assigned_condominium() {
    let (app, _state, _store) = common::create_test_app();
    common::login(&app, "roberto@email.com").await;

    let response = app
        .oneshot(common::json_request(
            "PUT",
            "/api/session/condominium",
            json!({"id": "2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_building_selection_requires_condominium() {
    let (app, _state, _store) = common::create_test_app();
    common::login(&app, "admin@codomi.com").await;

    let response = app
        .oneshot(common::json_request(
            "PUT",
            "/api/session/building",
            json!({"id": "1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reselecting_condominium_resets_building() {
    let (app, _state, _store) = common::create_test_app();
    common::login(&app, "admin@codomi.com").await;

    for (uri, id) in [
        ("/api/session/condominium", "1"),
        ("/api/session/building", "2"),
    ] {
        let response = app
            .clone()
            .oneshot(common::json_request("PUT", uri, json!({"id": id})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(common::json_request(
            "PUT",
            "/api/session/condominium",
            json!({"id": "2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let session = common::read_json(response).await;
    assert_eq!(session["selected_condominium"]["id"], "2");
    assert!(session["selected_building"].is_null());
    assert_eq!(session["buildings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_buildings_listing_narrows_by_condominium() {
    let (app, _state, _store) = common::create_test_app();
    common::login(&app, "admin@codomi.com").await;

    let response = app
        .clone()
        .oneshot(common::json_request(
            "GET",
            "/api/buildings?condominium_id=2",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    let buildings = body["buildings"].as_array().unwrap();
    assert_eq!(buildings.len(), 1);
    assert_eq!(buildings[0]["id"], "3");
}

#[tokio::test]
async fn test_unknown_condominium_rejected() {
    let (app, _state, _store) = common::create_test_app();
    common::login(&app, "admin@codomi.com").await;

    let response = app
        .oneshot(common::json_request(
            "PUT",
            "/api/session/condominium",
            json!({"id": "99"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
