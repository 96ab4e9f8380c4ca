//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use casehub_entity::share::SharePermissions;

/// Share a case with a registered identity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShareWithUserRequest {
    /// Grantee email.
    #[validate(length(min = 1, max = 320, message = "Email is required"))]
    pub email: String,
}

/// Replace a grantee's permissions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdatePermissionsRequest {
    /// Read access.
    pub can_view: bool,
    /// Write access.
    pub can_edit: bool,
}

impl From<UpdatePermissionsRequest> for SharePermissions {
    fn from(req: UpdatePermissionsRequest) -> Self {
        SharePermissions::new(req.can_view, req.can_edit)
    }
}

/// Invite an unregistered email to a case.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInviteRequest {
    /// Invitee email.
    #[validate(length(min = 1, max = 320, message = "Email is required"))]
    pub email: String,
    /// Read access granted on redemption.
    #[serde(default = "default_true")]
    pub can_view: bool,
    /// Write access granted on redemption.
    #[serde(default)]
    pub can_edit: bool,
}

impl CreateInviteRequest {
    /// Permissions the invite carries.
    pub fn permissions(&self) -> SharePermissions {
        SharePermissions::new(self.can_view, self.can_edit)
    }
}

fn default_true() -> bool {
    true
}
