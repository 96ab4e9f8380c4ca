//! Invite entity model and the views handed to callers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use casehub_core::types::id::{CaseId, InviteId, UserId};

use super::state::InviteState;
use crate::share::SharePermissions;

/// A pending, token-addressed offer of access to an unregistered email.
///
/// Unique per `(case_id, email)` and per `token`. The token is the
/// redemption lookup key and is never listed back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invite {
    /// Unique invite identifier (primary key, not a secret).
    pub id: InviteId,
    /// The case being offered.
    pub case_id: CaseId,
    /// Normalized invited email.
    pub email: String,
    /// The owner who sent the invite.
    pub invited_by: UserId,
    /// Read access to grant.
    pub can_view: bool,
    /// Write access to grant.
    pub can_edit: bool,
    /// High-entropy redemption token.
    pub token: String,
    /// When the invite stops being redeemable.
    pub expires_at: DateTime<Utc>,
    /// When the invite was created.
    pub created_at: DateTime<Utc>,
}

impl Invite {
    /// Build a new invite valid for `ttl` from now.
    pub fn new(
        case_id: CaseId,
        email: String,
        invited_by: UserId,
        permissions: SharePermissions,
        token: String,
        ttl: Duration,
    ) -> Self {
        let created_at = Utc::now();
        Self {
            id: InviteId::new(),
            case_id,
            email,
            invited_by,
            can_view: permissions.can_view,
            can_edit: permissions.can_edit,
            token,
            expires_at: created_at + ttl,
            created_at,
        }
    }

    /// The flags this invite grants on redemption.
    pub fn permissions(&self) -> SharePermissions {
        SharePermissions::new(self.can_view, self.can_edit)
    }

    /// Lifecycle state at `now`.
    pub fn state_at(&self, now: DateTime<Utc>) -> InviteState {
        InviteState::observe(Some(self.expires_at), now)
    }

    /// Whether the invite has lapsed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        !self.state_at(now).is_redeemable()
    }
}

/// Owner-facing listing entry. Omits the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingInvite {
    /// Invite ID (used to cancel).
    pub id: InviteId,
    /// Invited email.
    pub email: String,
    /// Read access to grant.
    pub can_view: bool,
    /// Write access to grant.
    pub can_edit: bool,
    /// Expiry.
    pub expires_at: DateTime<Utc>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Invite> for PendingInvite {
    fn from(invite: Invite) -> Self {
        Self {
            id: invite.id,
            email: invite.email,
            can_view: invite.can_view,
            can_edit: invite.can_edit,
            expires_at: invite.expires_at,
            created_at: invite.created_at,
        }
    }
}

/// Returned to the owner once, at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteCreated {
    /// Invite ID.
    pub invite_id: InviteId,
    /// Redemption token.
    pub token: String,
    /// `<origin>/invite/<token>`.
    pub link: String,
    /// Invited email, normalized.
    pub email: String,
    /// Expiry.
    pub expires_at: DateTime<Utc>,
}

/// Public, side-effect-free view of an invite for the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitePreview {
    /// The case being offered.
    pub case_id: CaseId,
    /// Case title (empty if the case could not be read).
    pub case_title: String,
    /// Invited email.
    pub email: String,
    /// Read access offered.
    pub can_view: bool,
    /// Write access offered.
    pub can_edit: bool,
    /// Expiry.
    pub expires_at: DateTime<Utc>,
    /// `false` once the invite has lapsed.
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_after_creation() {
        let invite = Invite::new(
            CaseId::new(),
            "new@x.com".to_string(),
            UserId::new(),
            SharePermissions::VIEW_ONLY,
            "token".to_string(),
            Duration::days(7),
        );
        assert!(invite.expires_at > invite.created_at);
        assert!(!invite.is_expired_at(invite.created_at));
        assert!(invite.is_expired_at(invite.expires_at));
    }

    #[test]
    fn test_pending_view_has_no_token() {
        let invite = Invite::new(
            CaseId::new(),
            "new@x.com".to_string(),
            UserId::new(),
            SharePermissions::VIEW_ONLY,
            "secret-token".to_string(),
            Duration::days(7),
        );
        let json = serde_json::to_string(&PendingInvite::from(invite)).expect("json");
        assert!(!json.contains("secret-token"));
    }
}
