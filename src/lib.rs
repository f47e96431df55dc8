// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Codomi: session and scope service for condominium management
//!
//! This crate provides the backend session API that authenticates users
//! and resolves which condominium and building a session operates on.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::ScopeResolver;
use tokio::sync::Mutex;

/// Shared application state.
///
/// The resolver sits behind a single lock: every mutation of session state
/// goes through it, so login attempts serialize instead of racing.
pub struct AppState {
    pub config: Config,
    pub resolver: Mutex<ScopeResolver>,
}
