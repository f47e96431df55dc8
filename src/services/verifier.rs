// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential verification.
//!
//! The resolver treats verification as a suspending call to an external
//! collaborator. `DemoVerifier` resolves against the built-in account
//! roster; `HttpVerifier` posts the credentials to a remote auth service.

use async_trait::async_trait;
use serde::Serialize;

use crate::models::{Role, User};

/// Errors from credential verification.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The credentials do not match any account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The verifier could not be reached or answered malformed data.
    #[error("verifier transport failure: {0}")]
    Transport(String),
}

/// Resolves (email, password) to a user record.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> Result<User, VerifyError>;
}

// ─── Demo Roster ─────────────────────────────────────────────

/// In-memory verifier over the demo account roster.
pub struct DemoVerifier {
    accounts: Vec<User>,
    password: String,
}

impl DemoVerifier {
    /// Verifier over the built-in roster; every account shares `password`.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            accounts: demo_accounts(),
            password: password.into(),
        }
    }

    /// Replace the roster (for tests).
    pub fn with_accounts(mut self, accounts: Vec<User>) -> Self {
        self.accounts = accounts;
        self
    }
}

#[async_trait]
impl CredentialVerifier for DemoVerifier {
    async fn verify(&self, email: &str, password: &str) -> Result<User, VerifyError> {
        match self.accounts.iter().find(|u| u.email == email) {
            Some(user) if password == self.password => Ok(user.clone()),
            _ => Err(VerifyError::InvalidCredentials),
        }
    }
}

/// Demo accounts mirroring the seeded frontend roster.
fn demo_accounts() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "Ana García".to_string(),
            email: "admin@codomi.com".to_string(),
            role: Role::Admin,
            apartment: None,
            is_board_member: None,
            building_id: None,
        },
        User {
            id: "2".to_string(),
            name: "Carlos Mendoza".to_string(),
            email: "carlos@email.com".to_string(),
            role: Role::Owner,
            apartment: Some("Apt 301".to_string()),
            is_board_member: Some(true),
            building_id: None,
        },
        User {
            id: "3".to_string(),
            name: "María López".to_string(),
            email: "maria@email.com".to_string(),
            role: Role::Owner,
            apartment: Some("Apt 205".to_string()),
            is_board_member: Some(false),
            building_id: None,
        },
        User {
            id: "4".to_string(),
            name: "Roberto Silva".to_string(),
            email: "roberto@email.com".to_string(),
            role: Role::Junta,
            apartment: None,
            is_board_member: None,
            building_id: Some("1".to_string()),
        },
    ]
}

// ─── Remote Auth Service ─────────────────────────────────────

/// Verifier backed by a remote auth service.
pub struct HttpVerifier {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl HttpVerifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for HttpVerifier {
    /// POST `{email, password}` to `{base_url}/login`.
    ///
    /// 401 means the credentials were checked and rejected; any other
    /// non-2xx response counts as a transport failure.
    async fn verify(&self, email: &str, password: &str) -> Result<User, VerifyError> {
        let url = format!("{}/login", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .json(&LoginBody { email, password })
            .send()
            .await
            .map_err(|e| VerifyError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(VerifyError::InvalidCredentials);
        }
        if !response.status().is_success() {
            return Err(VerifyError::Transport(format!(
                "auth service returned {}",
                response.status()
            )));
        }

        response
            .json::<User>()
            .await
            .map_err(|e| VerifyError::Transport(e.to_string()))
    }
}
