//! Share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casehub_core::types::id::{CaseId, ShareId, UserId};

/// The two independent access flags carried by shares and invites.
///
/// `can_edit` does not imply `can_view`; the flags are stored as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePermissions {
    /// Read access.
    pub can_view: bool,
    /// Write access.
    pub can_edit: bool,
}

impl SharePermissions {
    /// View-only access; the default for direct shares.
    pub const VIEW_ONLY: Self = Self {
        can_view: true,
        can_edit: false,
    };

    /// Build a permission pair.
    pub fn new(can_view: bool, can_edit: bool) -> Self {
        Self { can_view, can_edit }
    }
}

impl Default for SharePermissions {
    fn default() -> Self {
        Self::VIEW_ONLY
    }
}

/// A durable grant of access on a case to one identity.
///
/// Unique per `(case_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    /// Unique share identifier.
    pub id: ShareId,
    /// The shared case.
    pub case_id: CaseId,
    /// The identity granted access.
    pub user_id: UserId,
    /// The identity that granted access (the owner, or the inviter).
    pub granted_by: UserId,
    /// Read access.
    pub can_view: bool,
    /// Write access.
    pub can_edit: bool,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

impl Share {
    /// Build a new grant.
    pub fn new(
        case_id: CaseId,
        user_id: UserId,
        granted_by: UserId,
        permissions: SharePermissions,
    ) -> Self {
        Self {
            id: ShareId::new(),
            case_id,
            user_id,
            granted_by,
            can_view: permissions.can_view,
            can_edit: permissions.can_edit,
            created_at: Utc::now(),
        }
    }

    /// The grant's flags.
    pub fn permissions(&self) -> SharePermissions {
        SharePermissions::new(self.can_view, self.can_edit)
    }
}

/// A share joined with the grantee's profile, as listed to the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedUser {
    /// The grantee.
    pub user_id: UserId,
    /// Grantee email (empty when the profile could not be found).
    pub email: String,
    /// Grantee display name.
    pub display_name: Option<String>,
    /// Read access.
    pub can_view: bool,
    /// Write access.
    pub can_edit: bool,
    /// When the grant was created.
    pub shared_at: DateTime<Utc>,
}
