// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session scope resolution.
//!
//! `ScopeResolver` owns the authenticated user and the condominium/building
//! pair the session operates on. It moves through four states:
//!
//! logged out → authenticated (no scope) → condominium selected → building
//! selected
//!
//! A fresh login always clears the previous scope; the selection is then
//! auto-populated only when the access policy leaves exactly one choice.
//! The selection is persisted to the session store and restored at startup,
//! re-checked against the access policy of the restored user.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{Building, Condominium, User};
use crate::store::{keys, SessionStore};

use super::directory::DirectoryService;
use super::policy;
use super::verifier::{CredentialVerifier, VerifyError};

/// Errors surfaced by resolver operations.
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    /// Authentication did not succeed. Verifier transport failures collapse
    /// into this from the caller's point of view; the distinction only
    /// shows up in logs.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The requested selection is not reachable under the current access
    /// policy.
    #[error("{0} is not reachable for this session")]
    OutOfScope(String),
}

/// Persisted user snapshot (the `session.user` key).
#[derive(Serialize, Deserialize)]
struct PersistedUser {
    #[serde(flatten)]
    user: User,
    /// When the session was established (RFC 3339)
    authenticated_at: String,
}

pub struct ScopeResolver {
    verifier: Arc<dyn CredentialVerifier>,
    store: Arc<dyn SessionStore>,
    directory: DirectoryService,
    user: Option<User>,
    selected_condominium: Option<Condominium>,
    selected_building: Option<Building>,
}

impl ScopeResolver {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        store: Arc<dyn SessionStore>,
        directory: DirectoryService,
    ) -> Self {
        Self {
            verifier,
            store,
            directory,
            user: None,
            selected_condominium: None,
            selected_building: None,
        }
    }

    // ─── State Accessors ─────────────────────────────────────

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn selected_condominium(&self) -> Option<&Condominium> {
        self.selected_condominium.as_ref()
    }

    pub fn selected_building(&self) -> Option<&Building> {
        self.selected_building.as_ref()
    }

    /// Condominiums the current user may select. Empty when logged out.
    pub fn reachable_condominiums(&self) -> Vec<Condominium> {
        self.user
            .as_ref()
            .map(|user| policy::reachable_condominiums(user, &self.directory))
            .unwrap_or_default()
    }

    /// Buildings the current user may select, optionally narrowed to one
    /// condominium. Empty when logged out.
    pub fn reachable_buildings(&self, condominium_id: Option<&str>) -> Vec<Building> {
        self.user
            .as_ref()
            .map(|user| policy::reachable_buildings(user, &self.directory, condominium_id))
            .unwrap_or_default()
    }

    // ─── Operations ──────────────────────────────────────────

    /// Authenticate against the credential verifier.
    ///
    /// On success the user is persisted, the previous scope is cleared to
    /// force a fresh selection, and singleton reachable sets are
    /// auto-selected. A failed attempt leaves the current session (if any)
    /// untouched.
    pub async fn authenticate(&mut self, email: &str, password: &str) -> Result<(), ScopeError> {
        let user = match self.verifier.verify(email, password).await {
            Ok(user) => user,
            Err(VerifyError::InvalidCredentials) => {
                tracing::info!(email, "Login rejected: invalid credentials");
                return Err(ScopeError::InvalidCredentials);
            }
            Err(VerifyError::Transport(msg)) => {
                tracing::warn!(email, error = %msg, "Credential verifier unavailable");
                return Err(ScopeError::InvalidCredentials);
            }
        };

        tracing::info!(user_id = %user.id, role = ?user.role, "Login successful");

        self.persist_user(&user);
        self.user = Some(user);

        // Force a fresh selection pass on every login
        self.selected_condominium = None;
        self.selected_building = None;
        self.store_remove(keys::CONDOMINIUM);
        self.store_remove(keys::BUILDING);

        self.auto_select();
        Ok(())
    }

    /// Log out. Idempotent; safe to call when already logged out.
    pub fn deauthenticate(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "Logged out");
        }
        self.selected_condominium = None;
        self.selected_building = None;
        self.store_remove(keys::USER);
        self.store_remove(keys::CONDOMINIUM);
        self.store_remove(keys::BUILDING);
    }

    /// Select the condominium the session operates on.
    ///
    /// Changing condominium always resets the building selection. The id is
    /// checked against the reachable set here, not in the UI: the choice
    /// list is attacker-controllable in a real deployment.
    pub fn select_condominium(&mut self, condominium_id: &str) -> Result<Condominium, ScopeError> {
        let condominium = self
            .reachable_condominiums()
            .into_iter()
            .find(|c| c.id == condominium_id)
            .ok_or_else(|| ScopeError::OutOfScope(format!("condominium {condominium_id}")))?;

        self.selected_building = None;
        self.store_remove(keys::BUILDING);

        self.store_set(keys::CONDOMINIUM, &condominium);
        self.selected_condominium = Some(condominium.clone());

        tracing::debug!(condominium_id = %condominium.id, "Condominium selected");
        Ok(condominium)
    }

    /// Select a building within the currently selected condominium.
    ///
    /// Rejected unless a condominium is selected, the building belongs to
    /// it, and the building is reachable for the current user.
    pub fn select_building(&mut self, building_id: &str) -> Result<Building, ScopeError> {
        let Some(condominium) = self.selected_condominium.clone() else {
            return Err(ScopeError::OutOfScope(format!(
                "building {building_id} (no condominium selected)"
            )));
        };

        let building = self
            .reachable_buildings(Some(&condominium.id))
            .into_iter()
            .find(|b| b.id == building_id && b.condominium_id == condominium.id)
            .ok_or_else(|| ScopeError::OutOfScope(format!("building {building_id}")))?;

        self.store_set(keys::BUILDING, &building);
        self.selected_building = Some(building.clone());

        tracing::debug!(building_id = %building.id, "Building selected");
        Ok(building)
    }

    /// Restore a previous session from the store.
    ///
    /// Invoked once at startup. Any key may be absent or corrupt; corrupt
    /// values count as absent, and persisted selections that no longer pass
    /// the access policy of the restored user are discarded and removed
    /// from the store. Neither case is an error.
    pub fn restore_session(&mut self) {
        let Some(user) = self.read_user() else {
            return;
        };
        tracing::info!(user_id = %user.id, role = ?user.role, "Restored session");
        self.user = Some(user);

        let persisted_condominium: Option<Condominium> = self.read_key(keys::CONDOMINIUM);
        let persisted_building: Option<Building> = self.read_key(keys::BUILDING);
        let had_persisted_condominium = persisted_condominium.is_some();

        if let Some(condominium) = persisted_condominium {
            if self
                .reachable_condominiums()
                .iter()
                .any(|c| c.id == condominium.id)
            {
                self.selected_condominium = Some(condominium);
            } else {
                tracing::warn!(
                    condominium_id = %condominium.id,
                    "Discarding persisted condominium outside the access policy"
                );
                self.store_remove(keys::CONDOMINIUM);
            }
        }

        if let Some(building) = persisted_building {
            let accepted = match self.selected_condominium.as_ref() {
                Some(condominium) => {
                    building.condominium_id == condominium.id
                        && self
                            .reachable_buildings(Some(&condominium.id))
                            .iter()
                            .any(|b| b.id == building.id)
                }
                None => false,
            };

            if accepted {
                self.selected_building = Some(building);
            } else {
                tracing::warn!(
                    building_id = %building.id,
                    "Discarding persisted building outside the access policy"
                );
                self.store_remove(keys::BUILDING);
            }
        }

        // Auto-select only when no condominium was persisted at all; a
        // discarded or partial selection is left for the user to redo.
        if !had_persisted_condominium && self.selected_condominium.is_none() {
            self.auto_select();
        }
    }

    /// Auto-select when the access policy leaves no actual choice.
    fn auto_select(&mut self) {
        let condominiums = self.reachable_condominiums();
        let [condominium] = condominiums.as_slice() else {
            return;
        };
        let condominium = condominium.clone();

        self.store_set(keys::CONDOMINIUM, &condominium);
        self.selected_condominium = Some(condominium.clone());
        tracing::debug!(condominium_id = %condominium.id, "Condominium auto-selected");

        let buildings = self.reachable_buildings(Some(&condominium.id));
        if let [building] = buildings.as_slice() {
            let building = building.clone();
            self.store_set(keys::BUILDING, &building);
            tracing::debug!(building_id = %building.id, "Building auto-selected");
            self.selected_building = Some(building);
        }
    }

    // ─── Store Helpers ───────────────────────────────────────

    fn persist_user(&self, user: &User) {
        let snapshot = PersistedUser {
            user: user.clone(),
            authenticated_at: Utc::now().to_rfc3339(),
        };
        self.store_set(keys::USER, &snapshot);
    }

    fn read_user(&self) -> Option<User> {
        self.read_key::<PersistedUser>(keys::USER)
            .map(|snapshot| snapshot.user)
    }

    /// Best-effort store write. A failing store never corrupts the
    /// in-memory state machine; it only costs restoration after the next
    /// restart.
    fn store_set<T: Serialize>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to encode session value");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &encoded) {
            tracing::warn!(key, error = %e, "Failed to persist session value");
        }
    }

    fn store_remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            tracing::warn!(key, error = %e, "Failed to remove session value");
        }
    }

    /// Read and decode one store key. Corrupt values count as absent and
    /// are removed so they cannot poison later restores.
    fn read_key<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read session value");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Corrupt session value, discarding");
                self.store_remove(key);
                None
            }
        }
    }
}
