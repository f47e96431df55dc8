// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login and logout routes.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::AppState;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::api::SessionResponse;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Login request body.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Authenticate and open the session.
///
/// The resolver lock is held across the verifier call, so concurrent login
/// attempts are serialized rather than racing each other.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut resolver = state.resolver.lock().await;
    resolver.authenticate(&body.email, &body.password).await?;

    SessionResponse::from_resolver(&resolver)
        .map(Json)
        .ok_or(AppError::Unauthorized)
}

/// Close the session. Safe to call when already logged out.
async fn logout(State(state): State<Arc<AppState>>) -> Json<LogoutResponse> {
    state.resolver.lock().await.deauthenticate();
    Json(LogoutResponse { success: true })
}
