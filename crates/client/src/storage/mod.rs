//! Persistence backends for store state snapshots.
//!
//! Stores own pure state transitions; persistence is a thin adapter behind
//! the [`StorageBackend`] trait. Every write is a full-record replace, never
//! an incremental patch, so a crash between mutation and flush can lose at
//! most the latest mutation but never corrupt the stored structure.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Record keys for persisted client state.
pub mod keys {
    /// Key for the session record (tab-scoped: user, token, auth flag).
    pub const SESSION: &str = "auth-storage";

    /// Key for the durable cart record.
    pub const CART: &str = "sucre-store-cart";

    /// Key for the legacy unscoped bearer credential. Written by older
    /// client builds; removed on every login and logout so a stale
    /// credential can never leak across storage strategies.
    pub const LEGACY_TOKEN: &str = "token";
}

/// Errors that can occur when reading or writing persisted records.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record key is not usable by this backend.
    #[error("invalid record key: {0}")]
    InvalidKey(String),
}

/// A keyed record store the state engine snapshots into.
///
/// Implementations differ only in scope and durability:
/// [`MemoryStorage`] lives as long as the value (tab/session scope), while
/// [`FileStorage`] survives restarts (durable scope).
pub trait StorageBackend {
    /// Load the record stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read. A missing record is
    /// `Ok(None)`, not an error.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the record stored under `key` with `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the record stored under `key`. Removing an absent record is a
    /// no-op success.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
