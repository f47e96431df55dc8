// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Condominium and building directory service.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::models::{Building, Condominium};

/// Service holding the condominium/building reference data.
#[derive(Default, Clone)]
pub struct DirectoryService {
    condominiums: Vec<Condominium>,
    buildings: Vec<Building>,
    default_condominium_id: String,
}

/// On-disk directory document.
#[derive(Deserialize)]
struct DirectoryDoc {
    condominiums: Vec<Condominium>,
    buildings: Vec<Building>,
    #[serde(default)]
    default_condominium_id: Option<String>,
}

impl DirectoryService {
    /// Load the directory from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| DirectoryError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load the directory from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, DirectoryError> {
        let doc: DirectoryDoc =
            serde_json::from_str(json_data).map_err(|e| DirectoryError::ParseError(e.to_string()))?;

        if doc.condominiums.is_empty() {
            return Err(DirectoryError::Empty);
        }

        for building in &doc.buildings {
            if !doc
                .condominiums
                .iter()
                .any(|c| c.id == building.condominium_id)
            {
                return Err(DirectoryError::DanglingBuilding {
                    building: building.id.clone(),
                    condominium: building.condominium_id.clone(),
                });
            }
        }

        let default_condominium_id = doc
            .default_condominium_id
            .unwrap_or_else(|| doc.condominiums[0].id.clone());

        if !doc.condominiums.iter().any(|c| c.id == default_condominium_id) {
            return Err(DirectoryError::UnknownDefault(default_condominium_id));
        }

        tracing::info!(
            condominiums = doc.condominiums.len(),
            buildings = doc.buildings.len(),
            "Loaded directory"
        );

        Ok(Self {
            condominiums: doc.condominiums,
            buildings: doc.buildings,
            default_condominium_id,
        })
    }

    /// Built-in demo directory matching the demo account roster.
    pub fn demo() -> Self {
        Self {
            condominiums: vec![
                Condominium {
                    id: "1".to_string(),
                    name: "Condominio Los Almendros".to_string(),
                },
                Condominium {
                    id: "2".to_string(),
                    name: "Condominio Vista Hermosa".to_string(),
                },
            ],
            buildings: vec![
                Building {
                    id: "1".to_string(),
                    name: "Torre Norte".to_string(),
                    address: "Av. Principal 123".to_string(),
                    condominium_id: "1".to_string(),
                },
                Building {
                    id: "2".to_string(),
                    name: "Torre Sur".to_string(),
                    address: "Av. Secundaria 456".to_string(),
                    condominium_id: "1".to_string(),
                },
                Building {
                    id: "3".to_string(),
                    name: "Edificio Central".to_string(),
                    address: "Calle Central 789".to_string(),
                    condominium_id: "2".to_string(),
                },
            ],
            default_condominium_id: "1".to_string(),
        }
    }

    /// All condominiums in the directory.
    pub fn condominiums(&self) -> &[Condominium] {
        &self.condominiums
    }

    /// All buildings in the directory.
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Condominium owners are attached to when no explicit mapping exists.
    pub fn default_condominium_id(&self) -> &str {
        &self.default_condominium_id
    }

    pub fn find_condominium(&self, id: &str) -> Option<&Condominium> {
        self.condominiums.iter().find(|c| c.id == id)
    }

    pub fn find_building(&self, id: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    /// Buildings belonging to one condominium.
    pub fn buildings_in(&self, condominium_id: &str) -> Vec<Building> {
        self.buildings
            .iter()
            .filter(|b| b.condominium_id == condominium_id)
            .cloned()
            .collect()
    }
}

/// Errors from directory operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse directory: {0}")]
    ParseError(String),

    #[error("Directory has no condominiums")]
    Empty,

    #[error("Building {building} references unknown condominium {condominium}")]
    DanglingBuilding { building: String, condominium: String },

    #[error("Default condominium {0} is not in the directory")]
    UnknownDefault(String),
}
