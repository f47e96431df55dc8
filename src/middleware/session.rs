// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-gating middleware.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires an authenticated session.
///
/// Routes behind this layer can assume a user is present; the reachable-set
/// accessors would otherwise just return empty lists.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let authenticated = state.resolver.lock().await.is_authenticated();
    if !authenticated {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}
