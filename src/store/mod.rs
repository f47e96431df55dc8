//! Persisted session store (key/value collaborator).

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Logical keys as constants.
pub mod keys {
    pub const USER: &str = "session.user";
    pub const CONDOMINIUM: &str = "session.condominium";
    pub const BUILDING: &str = "session.building";
}

/// Errors from session store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access store file: {0}")]
    Io(String),

    #[error("Failed to encode store snapshot: {0}")]
    Encode(String),
}

/// Opaque string key/value store that survives restarts.
///
/// Implementations only move strings in and out; all parsing and validation
/// of the stored values belongs to the scope resolver.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
