// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role-based access policy.
//!
//! Pure derivation of the condominiums and buildings a user may select,
//! dispatched on the user's role:
//! - admins reach every condominium and building
//! - junta members reach exactly the building they are assigned to
//! - owners reach the buildings of the directory's default condominium

use crate::models::{Building, Condominium, Role, User};

use super::directory::DirectoryService;

/// Condominiums the user may operate in.
pub fn reachable_condominiums(user: &User, directory: &DirectoryService) -> Vec<Condominium> {
    match user.role {
        Role::Admin => directory.condominiums().to_vec(),
        Role::Junta => junta_building(user, directory)
            .and_then(|building| directory.find_condominium(&building.condominium_id))
            .cloned()
            .into_iter()
            .collect(),
        Role::Owner => directory
            .find_condominium(directory.default_condominium_id())
            .cloned()
            .into_iter()
            .collect(),
    }
}

/// Buildings the user may operate in, optionally narrowed to one condominium.
///
/// The result is always a subset of the buildings of
/// [`reachable_condominiums`]: narrowing to a condominium the user cannot
/// reach yields an empty set.
pub fn reachable_buildings(
    user: &User,
    directory: &DirectoryService,
    condominium_id: Option<&str>,
) -> Vec<Building> {
    match user.role {
        Role::Admin => match condominium_id {
            Some(id) => directory.buildings_in(id),
            None => directory.buildings().to_vec(),
        },
        Role::Junta => {
            let Some(building) = junta_building(user, directory) else {
                return Vec::new();
            };
            match condominium_id {
                Some(id) if id != building.condominium_id => Vec::new(),
                _ => vec![building.clone()],
            }
        }
        Role::Owner => {
            let default_id = directory.default_condominium_id();
            match condominium_id {
                Some(id) if id != default_id => Vec::new(),
                _ => directory.buildings_in(default_id),
            }
        }
    }
}

/// The building a junta member is assigned to, if it resolves.
fn junta_building<'a>(user: &User, directory: &'a DirectoryService) -> Option<&'a Building> {
    user.building_id
        .as_deref()
        .and_then(|id| directory.find_building(id))
}
