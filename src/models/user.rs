//! User model for the account roster and session snapshots.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Role a user holds within the product.
///
/// Closed set: access decisions dispatch on this enum, never on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Role {
    /// Management company staff; may operate in every condominium
    Admin,
    /// Apartment owner within a single condominium
    Owner,
    /// Board member assigned to one building
    Junta,
}

/// An authenticated user, as returned by the credential verifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Apartment label (owners only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    /// Whether the owner sits on the condominium board
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_board_member: Option<bool>,
    /// Assigned building (junta members only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<String>,
}
