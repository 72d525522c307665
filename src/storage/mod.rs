//! Snapshot persistence for the user directory.
//!
//! The whole directory is written on every mutation and read once at
//! startup. There is no incremental log.

pub mod json;

pub use json::JsonFileStorage;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::user::User;

/// Every known user, keyed by username.
pub type Users = BTreeMap<String, User>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable store for full directory snapshots.
pub trait DiaryStorage: Send + Sync {
    /// Read the last snapshot. A store that has never been written yields an
    /// empty map.
    fn load(&self) -> Result<Users, StorageError>;

    /// Replace the stored snapshot with `users`.
    fn save(&self, users: &Users) -> Result<(), StorageError>;
}
