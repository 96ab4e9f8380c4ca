//! Share-related domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{CaseId, InviteId, UserId};

/// Events related to sharing operations. Never carries invite tokens or
/// access codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShareEvent {
    /// A case was shared directly with a registered user.
    Granted {
        /// The case.
        case_id: CaseId,
        /// The identity that received access.
        grantee_id: UserId,
        /// View flag granted.
        can_view: bool,
        /// Edit flag granted.
        can_edit: bool,
    },
    /// The flags on an existing share were overwritten.
    PermissionsChanged {
        /// The case.
        case_id: CaseId,
        /// The identity whose share changed.
        grantee_id: UserId,
        /// New view flag.
        can_view: bool,
        /// New edit flag.
        can_edit: bool,
    },
    /// A share was revoked.
    Revoked {
        /// The case.
        case_id: CaseId,
        /// The identity that lost access.
        grantee_id: UserId,
    },
    /// An invite was issued to an unregistered email.
    InviteCreated {
        /// The case.
        case_id: CaseId,
        /// The invite row.
        invite_id: InviteId,
        /// Normalized invited email.
        email: String,
        /// When the invite lapses.
        expires_at: DateTime<Utc>,
    },
    /// An invite was converted into a share.
    InviteRedeemed {
        /// The case.
        case_id: CaseId,
        /// The identity that redeemed it.
        grantee_id: UserId,
        /// `true` when the share already existed (duplicate redemption).
        already_granted: bool,
    },
    /// An invite was cancelled by the owner.
    InviteCancelled {
        /// The case.
        case_id: CaseId,
        /// The invite row.
        invite_id: InviteId,
    },
    /// An anonymous access code was issued.
    AccessCodeIssued {
        /// The case.
        case_id: CaseId,
    },
    /// An anonymous access code was revoked.
    AccessCodeRevoked {
        /// The case.
        case_id: CaseId,
    },
}

impl ShareEvent {
    /// Audit action kind recorded for this event.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Granted { .. } | Self::PermissionsChanged { .. } => "permission_change",
            Self::Revoked { .. } => "share_revoked",
            Self::InviteCreated { .. } => "invite_created",
            Self::InviteRedeemed { .. } => "invite_redeemed",
            Self::InviteCancelled { .. } => "invite_cancelled",
            Self::AccessCodeIssued { .. } => "access_code_issued",
            Self::AccessCodeRevoked { .. } => "access_code_revoked",
        }
    }

    /// The case this event is about; the audit resource.
    pub fn case_id(&self) -> CaseId {
        match self {
            Self::Granted { case_id, .. }
            | Self::PermissionsChanged { case_id, .. }
            | Self::Revoked { case_id, .. }
            | Self::InviteCreated { case_id, .. }
            | Self::InviteRedeemed { case_id, .. }
            | Self::InviteCancelled { case_id, .. }
            | Self::AccessCodeIssued { case_id }
            | Self::AccessCodeRevoked { case_id } => *case_id,
        }
    }
}
