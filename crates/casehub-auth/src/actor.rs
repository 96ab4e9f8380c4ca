//! The authenticated identity performing an operation.

use serde::{Deserialize, Serialize};

use casehub_core::types::id::UserId;

/// An authenticated identity, populated once per request from verified
/// bearer-token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identity ID.
    pub id: UserId,
    /// Email the identity signed in with, as issued.
    pub email: String,
}

impl Actor {
    /// Build an actor.
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    /// The email trimmed and lower-cased, for comparisons.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}
