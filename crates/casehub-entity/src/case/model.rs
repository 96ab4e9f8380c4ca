//! Case entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casehub_core::types::id::{CaseId, UserId};

/// The primary shareable record. Exactly one owning identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Unique case identifier.
    pub id: CaseId,
    /// The owning identity. Immutable for the purposes of sharing.
    pub owner_id: UserId,
    /// Case title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the case was created.
    pub created_at: DateTime<Utc>,
    /// When the case was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Build a new case owned by `owner_id`.
    pub fn new(owner_id: UserId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CaseId::new(),
            owner_id,
            title: title.into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` owns this case.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}
