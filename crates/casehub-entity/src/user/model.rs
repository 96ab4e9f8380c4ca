//! Profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casehub_core::types::id::UserId;

/// A registered identity as seen by the sharing subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Identity ID.
    pub id: UserId,
    /// Email address. Lookups compare it without regard to letter case.
    pub email: String,
    /// Human-readable display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Build a new profile. The email is stored trimmed and lower-cased.
    pub fn new(email: &str, display_name: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.trim().to_lowercase(),
            display_name,
            created_at: Utc::now(),
        }
    }
}
