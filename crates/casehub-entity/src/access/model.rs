//! Access code entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casehub_core::types::id::{CaseId, UserId};

use crate::case::{Case, CaseEmail, CaseEvent};

/// A capability secret mapping to one case. Possession is the permission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessCode {
    /// Normalized code (uppercase, no separators). Primary key.
    pub code: String,
    /// The case the code unlocks.
    pub case_id: CaseId,
    /// The owner who issued it.
    pub created_by: UserId,
    /// When it was issued.
    pub created_at: DateTime<Utc>,
}

impl AccessCode {
    /// Build a new code row.
    pub fn new(code: String, case_id: CaseId, created_by: UserId) -> Self {
        Self {
            code,
            case_id,
            created_by,
            created_at: Utc::now(),
        }
    }
}

/// Read-only content returned for a valid access code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseBundle {
    /// The case.
    pub case: Case,
    /// Its emails, newest first.
    pub emails: Vec<CaseEmail>,
    /// Its events, newest first.
    pub events: Vec<CaseEvent>,
}
