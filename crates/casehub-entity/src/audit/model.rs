//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casehub_core::events::DomainEvent;
use casehub_core::types::id::{AuditLogId, UserId};

/// An immutable audit log entry recording an action on a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: AuditLogId,
    /// The identity who performed the action.
    pub actor_id: UserId,
    /// The action that was performed (e.g., `"permission_change"`).
    pub action: String,
    /// The type of target resource; always `"case"` here.
    pub target_type: String,
    /// The target resource ID.
    pub target_id: Option<uuid::Uuid>,
    /// Additional details about the action (JSON).
    pub details: Option<serde_json::Value>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    /// The identity who performed the action.
    pub actor_id: UserId,
    /// The action performed.
    pub action: String,
    /// Target resource type.
    pub target_type: String,
    /// Target resource ID.
    pub target_id: Option<uuid::Uuid>,
    /// Additional details.
    pub details: Option<serde_json::Value>,
}

impl CreateAuditLogEntry {
    /// Turn into a storable entry.
    pub fn into_entry(self) -> AuditLogEntry {
        AuditLogEntry {
            id: AuditLogId::new(),
            actor_id: self.actor_id,
            action: self.action,
            target_type: self.target_type,
            target_id: self.target_id,
            details: self.details,
            created_at: Utc::now(),
        }
    }
}

impl From<&DomainEvent> for CreateAuditLogEntry {
    fn from(event: &DomainEvent) -> Self {
        Self {
            actor_id: event.actor_id,
            action: event.payload.action().to_string(),
            target_type: "case".to_string(),
            target_id: Some(event.payload.case_id().into_uuid()),
            details: serde_json::to_value(&event.payload).ok(),
        }
    }
}
