//! Durable grants of case access to registered identities.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info, warn};

use casehub_auth::{Actor, AuthorizationGuard, IdentityDirectory};
use casehub_core::error::{ConflictReason, ShareError};
use casehub_core::result::ShareResult;
use casehub_core::types::id::{CaseId, UserId};
use casehub_core::types::outcome::Outcome;
use casehub_database::repositories::ShareRepository;
use casehub_entity::share::{Share, SharePermissions, SharedUser};
use casehub_entity::user::normalize_email;

use crate::preflight;

/// Manages who a case is shared with.
#[derive(Debug, Clone)]
pub struct ShareRegistry {
    guard: AuthorizationGuard,
    identities: Arc<dyn IdentityDirectory>,
    shares: ShareRepository,
}

impl ShareRegistry {
    /// Creates a new share registry.
    pub fn new(
        guard: AuthorizationGuard,
        identities: Arc<dyn IdentityDirectory>,
        shares: ShareRepository,
    ) -> Self {
        Self {
            guard,
            identities,
            shares,
        }
    }

    /// Grant view-only access on a case to the identity registered under `email`.
    pub async fn share_with_user(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        email: &str,
    ) -> ShareResult<Outcome<Share>> {
        AuthorizationGuard::require_authenticated(actor)?;
        let email = normalize_email(email)
            .ok_or_else(|| ShareError::InvalidInput("malformed email address".to_string()))?;
        let (owner, _case) = match self.guard.authorize_owner(case_id, actor).await {
            Ok(authorized) => authorized,
            Err(err) => return preflight::for_write(err),
        };

        let grantee = match self.identities.lookup_by_email(&email).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return Ok(Outcome::WriteFailed(ShareError::not_found("user"))),
            Err(e) => {
                error!(case_id = %case_id, error = %e, "Identity lookup failed");
                return Ok(Outcome::WriteFailed(e.into()));
            }
        };

        if grantee.id == owner.id {
            return Ok(Outcome::WriteFailed(ShareError::Conflict(
                ConflictReason::SelfShare,
            )));
        }

        match self.shares.find(case_id, grantee.id).await {
            Ok(Some(_)) => {
                return Ok(Outcome::WriteFailed(ShareError::Conflict(
                    ConflictReason::AlreadyShared,
                )));
            }
            Ok(None) => {}
            Err(e) => {
                error!(case_id = %case_id, error = %e, "Existing share lookup failed");
                return Ok(Outcome::WriteFailed(e.into()));
            }
        }

        let share = Share::new(case_id, grantee.id, owner.id, SharePermissions::VIEW_ONLY);
        match self.shares.create(&share).await {
            Ok(share) => {
                info!(
                    case_id = %case_id,
                    actor_id = %owner.id,
                    grantee_id = %share.user_id,
                    "Case shared"
                );
                Ok(Outcome::Ok(share))
            }
            Err(e) if e.is_unique_violation() => Ok(Outcome::WriteFailed(ShareError::Conflict(
                ConflictReason::AlreadyShared,
            ))),
            Err(e) => {
                error!(case_id = %case_id, error = %e, "Failed to create share");
                Ok(Outcome::WriteFailed(e.into()))
            }
        }
    }

    /// List everyone a case is shared with, joined with their profiles.
    pub async fn list_shared_users(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
    ) -> ShareResult<Outcome<Vec<SharedUser>>> {
        if let Err(err) = self.guard.authorize_owner(case_id, actor).await {
            return preflight::for_read(err, Vec::new());
        }

        let shares = match self.shares.list_for_case(case_id).await {
            Ok(shares) => shares,
            Err(e) => {
                warn!(case_id = %case_id, error = %e, "Share listing degraded");
                return Ok(Outcome::ReadDegraded(Vec::new()));
            }
        };
        if shares.is_empty() {
            return Ok(Outcome::Ok(Vec::new()));
        }

        let ids: Vec<UserId> = shares.iter().map(|s| s.user_id).collect();
        let profiles = match self.identities.profiles(&ids).await {
            Ok(profiles) => profiles,
            Err(e) => {
                warn!(case_id = %case_id, error = %e, "Profile lookup for share listing degraded");
                return Ok(Outcome::ReadDegraded(Vec::new()));
            }
        };
        let mut by_id: HashMap<UserId, _> = profiles.into_iter().map(|p| (p.id, p)).collect();

        let users = shares
            .into_iter()
            .map(|share| {
                let profile = by_id.remove(&share.user_id);
                SharedUser {
                    user_id: share.user_id,
                    email: profile.as_ref().map(|p| p.email.clone()).unwrap_or_default(),
                    display_name: profile.and_then(|p| p.display_name),
                    can_view: share.can_view,
                    can_edit: share.can_edit,
                    shared_at: share.created_at,
                }
            })
            .collect();
        Ok(Outcome::Ok(users))
    }

    /// Overwrite both permission flags of a grantee's share.
    ///
    /// The payload is `true` when a share was updated; a missing share is a
    /// successful no-op.
    pub async fn update_permissions(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        grantee_id: UserId,
        permissions: SharePermissions,
    ) -> ShareResult<Outcome<bool>> {
        let (owner, _case) = match self.guard.authorize_owner(case_id, actor).await {
            Ok(authorized) => authorized,
            Err(err) => return preflight::for_write(err),
        };

        match self
            .shares
            .update_permissions(case_id, grantee_id, permissions)
            .await
        {
            Ok(affected) => {
                info!(
                    case_id = %case_id,
                    actor_id = %owner.id,
                    grantee_id = %grantee_id,
                    can_view = permissions.can_view,
                    can_edit = permissions.can_edit,
                    affected,
                    "Share permissions updated"
                );
                Ok(Outcome::Ok(affected > 0))
            }
            Err(e) => {
                error!(case_id = %case_id, error = %e, "Failed to update share permissions");
                Ok(Outcome::WriteFailed(e.into()))
            }
        }
    }

    /// Revoke a grantee's share. Succeeds whether or not one existed.
    pub async fn unshare(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        grantee_id: UserId,
    ) -> ShareResult<Outcome<bool>> {
        let (owner, _case) = match self.guard.authorize_owner(case_id, actor).await {
            Ok(authorized) => authorized,
            Err(err) => return preflight::for_write(err),
        };

        match self.shares.delete(case_id, grantee_id).await {
            Ok(affected) => {
                info!(
                    case_id = %case_id,
                    actor_id = %owner.id,
                    grantee_id = %grantee_id,
                    removed = affected > 0,
                    "Share revoked"
                );
                Ok(Outcome::Ok(affected > 0))
            }
            Err(e) => {
                error!(case_id = %case_id, error = %e, "Failed to revoke share");
                Ok(Outcome::WriteFailed(e.into()))
            }
        }
    }
}
