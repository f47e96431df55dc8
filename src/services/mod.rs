// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod directory;
pub mod policy;
pub mod scope;
pub mod verifier;

pub use directory::{DirectoryError, DirectoryService};
pub use scope::{ScopeError, ScopeResolver};
pub use verifier::{CredentialVerifier, DemoVerifier, HttpVerifier, VerifyError};
