//! User account and session models.
//!
//! # Invariants
//! - `email` is unique across all registered users.
//! - A `Session` never carries the password; it is a projection of `User`.
//! - Passwords are stored and compared as plaintext. This mirrors the
//!   product's local-only account model and is not a real auth system.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a registered user.
pub type UserId = Uuid;

/// A registered account as persisted in the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Creates a new account with a generated stable ID.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Projects this account into its session shape (no password).
    pub fn session(&self) -> Session {
        Session {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The currently authenticated user context.
///
/// Singular; replaced wholesale on sign-in and cleared on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: UserId,
    pub name: String,
    pub email: String,
}
