// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session API routes (require an authenticated session).

use crate::error::{AppError, Result};
use crate::models::{Building, Condominium, User};
use crate::services::ScopeResolver;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Session routes. The session middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/session/condominium", put(select_condominium))
        .route("/api/session/building", put(select_building))
        .route("/api/condominiums", get(get_condominiums))
        .route("/api/buildings", get(get_buildings))
}

// ─── Session Snapshot ────────────────────────────────────────

/// Current session snapshot: who is logged in, the selected scope, and the
/// choices still open to them.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub user: User,
    pub selected_condominium: Option<Condominium>,
    pub selected_building: Option<Building>,
    /// Condominiums reachable for this user
    pub condominiums: Vec<Condominium>,
    /// Buildings reachable within the selected condominium (all reachable
    /// buildings when none is selected)
    pub buildings: Vec<Building>,
}

impl SessionResponse {
    /// Snapshot the resolver state. None when nobody is logged in.
    pub(crate) fn from_resolver(resolver: &ScopeResolver) -> Option<Self> {
        let user = resolver.user()?.clone();
        let selected_condominium = resolver.selected_condominium().cloned();
        let buildings = resolver
            .reachable_buildings(selected_condominium.as_ref().map(|c| c.id.as_str()));

        Some(Self {
            user,
            selected_condominium,
            selected_building: resolver.selected_building().cloned(),
            condominiums: resolver.reachable_condominiums(),
            buildings,
        })
    }
}

/// Get the current session.
async fn get_session(State(state): State<Arc<AppState>>) -> Result<Json<SessionResponse>> {
    let resolver = state.resolver.lock().await;
    SessionResponse::from_resolver(&resolver)
        .map(Json)
        .ok_or(AppError::Unauthorized)
}

// ─── Scope Selection ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct SelectionRequest {
    pub id: String,
}

/// Select the condominium the session operates on.
async fn select_condominium(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectionRequest>,
) -> Result<Json<SessionResponse>> {
    let mut resolver = state.resolver.lock().await;
    resolver.select_condominium(&body.id)?;

    SessionResponse::from_resolver(&resolver)
        .map(Json)
        .ok_or(AppError::Unauthorized)
}

/// Select a building within the selected condominium.
async fn select_building(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectionRequest>,
) -> Result<Json<SessionResponse>> {
    let mut resolver = state.resolver.lock().await;
    resolver.select_building(&body.id)?;

    SessionResponse::from_resolver(&resolver)
        .map(Json)
        .ok_or(AppError::Unauthorized)
}

// ─── Reachable Sets ──────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CondominiumsResponse {
    pub condominiums: Vec<Condominium>,
}

/// Condominiums the current user may select.
async fn get_condominiums(
    State(state): State<Arc<AppState>>,
) -> Json<CondominiumsResponse> {
    let resolver = state.resolver.lock().await;
    Json(CondominiumsResponse {
        condominiums: resolver.reachable_condominiums(),
    })
}

#[derive(Deserialize)]
struct BuildingsQuery {
    /// Narrow to one condominium
    condominium_id: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BuildingsResponse {
    pub buildings: Vec<Building>,
}

/// Buildings the current user may select.
async fn get_buildings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BuildingsQuery>,
) -> Json<BuildingsResponse> {
    let resolver = state.resolver.lock().await;
    Json(BuildingsResponse {
        buildings: resolver.reachable_buildings(query.condominium_id.as_deref()),
    })
}
