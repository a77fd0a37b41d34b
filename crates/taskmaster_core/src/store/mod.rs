//! Persistent key-value store boundary.
//!
//! # Responsibility
//! - Define the string key-value contract all persistence goes through.
//! - Keep storage details (SQLite, in-memory map) behind one trait.
//!
//! # Invariants
//! - Values round-trip byte-identically: `set(k, v)` then `get(k)` yields `v`.
//! - Each key is owned by exactly one component; there are no
//!   cross-component writes to the same key.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::user::UserId;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures from the persistence substrate.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String key-value persistence contract.
///
/// Single-threaded by design: all calls happen on the one event thread, so
/// implementations may use interior mutability without locking.
pub trait Store {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Well-known store keys.
pub mod keys {
    use super::UserId;

    /// Persisted session, present only while a user is signed in.
    pub const CURRENT_USER: &str = "currentUser";
    /// Collection of all registered user records.
    pub const USERS: &str = "users";

    /// Per-user task sequence key.
    pub fn tasks(user_id: UserId) -> String {
        format!("tasks_{user_id}")
    }

    /// Per-user notification feed key.
    pub fn notifications(user_id: UserId) -> String {
        format!("notifications_{user_id}")
    }
}
