// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Codomi Session API Server
//!
//! Authenticates condominium management users and resolves which
//! condominium/building scope each session operates on.

use codomi_api::{
    config::Config,
    services::{CredentialVerifier, DemoVerifier, DirectoryService, HttpVerifier, ScopeResolver},
    store::{FileStore, MemoryStore, SessionStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Codomi session API");

    // Load the condominium/building directory
    let directory = match &config.directory_path {
        Some(path) => {
            tracing::info!(path = %path, "Loading directory");
            DirectoryService::load_from_file(path).expect("Failed to load directory")
        }
        None => DirectoryService::demo(),
    };
    tracing::info!(
        condominiums = directory.condominiums().len(),
        buildings = directory.buildings().len(),
        "Directory ready"
    );

    // Open the persisted session store
    let store: Arc<dyn SessionStore> = match &config.session_store_path {
        Some(path) => {
            tracing::info!(path = %path, "Opening session store");
            Arc::new(FileStore::open(path).expect("Failed to open session store"))
        }
        None => {
            tracing::info!("Using in-memory session store (nothing survives restarts)");
            Arc::new(MemoryStore::new())
        }
    };

    // Pick the credential verifier
    let verifier: Arc<dyn CredentialVerifier> = match &config.auth_url {
        Some(url) => {
            tracing::info!(url = %url, "Using remote credential verifier");
            Arc::new(HttpVerifier::new(url.clone()))
        }
        None => Arc::new(DemoVerifier::new(config.demo_password.clone())),
    };

    // Restore any previous session before serving
    let mut resolver = ScopeResolver::new(verifier, store, directory);
    resolver.restore_session();

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        resolver: tokio::sync::Mutex::new(resolver),
    });

    // Build router
    let app = codomi_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("codomi_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
