//! Read-only content attached to a case: correspondence and timeline events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casehub_core::types::id::{CaseEmailId, CaseEventId, CaseId};

/// An email filed against a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseEmail {
    /// Unique email identifier.
    pub id: CaseEmailId,
    /// The case this email belongs to.
    pub case_id: CaseId,
    /// Sender address.
    pub sender: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    #[serde(default)]
    pub body: Option<String>,
    /// When the email was sent.
    pub sent_at: DateTime<Utc>,
}

impl CaseEmail {
    /// Build a new email for `case_id`.
    pub fn new(
        case_id: CaseId,
        sender: impl Into<String>,
        subject: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CaseEmailId::new(),
            case_id,
            sender: sender.into(),
            subject: subject.into(),
            body: None,
            sent_at,
        }
    }
}

/// A timeline event recorded against a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseEvent {
    /// Unique event identifier.
    pub id: CaseEventId,
    /// The case this event belongs to.
    pub case_id: CaseId,
    /// Short title.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the event happened.
    pub occurred_at: DateTime<Utc>,
}

impl CaseEvent {
    /// Build a new event for `case_id`.
    pub fn new(case_id: CaseId, title: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: CaseEventId::new(),
            case_id,
            title: title.into(),
            description: None,
            occurred_at,
        }
    }
}
