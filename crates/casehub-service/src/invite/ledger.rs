//! The invite state machine.
//!
//! State is derived from row presence and expiry. An invite is pending
//! while its row exists and its expiry is in the future; redemption,
//! expiry, and cancellation all end in the row being deleted. A row whose
//! expiry has passed stays latent-expired until redeem, re-invite, or the
//! sweep observes it. Preview never deletes.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use casehub_auth::secret::{generate_invite_token, is_well_formed_token};
use casehub_auth::{Actor, AuthorizationGuard, IdentityDirectory};
use casehub_core::error::{ConflictReason, ShareError};
use casehub_core::result::ShareResult;
use casehub_core::types::id::{CaseId, InviteId};
use casehub_core::types::outcome::Outcome;
use casehub_database::repositories::{CaseRepository, InviteRepository, ShareRepository};
use casehub_entity::invite::{Invite, InviteCreated, InvitePreview, PendingInvite};
use casehub_entity::share::{Share, SharePermissions};
use casehub_entity::user::normalize_email;

use crate::preflight;

/// Result of a successful redemption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redemption {
    /// The case now shared with the redeemer.
    pub case_id: CaseId,
    /// The invite that was consumed.
    pub invite_id: InviteId,
    /// `true` when the share already existed, e.g. a concurrent redemption won.
    pub already_granted: bool,
}

/// Manages pending invites and their redemption.
#[derive(Debug, Clone)]
pub struct InviteLedger {
    guard: AuthorizationGuard,
    identities: Arc<dyn IdentityDirectory>,
    invites: InviteRepository,
    shares: ShareRepository,
    cases: CaseRepository,
    ttl: Duration,
}

impl InviteLedger {
    /// Creates a new invite ledger. Invites expire `ttl` after creation.
    pub fn new(
        guard: AuthorizationGuard,
        identities: Arc<dyn IdentityDirectory>,
        invites: InviteRepository,
        shares: ShareRepository,
        cases: CaseRepository,
        ttl: Duration,
    ) -> Self {
        Self {
            guard,
            identities,
            invites,
            shares,
            cases,
            ttl,
        }
    }

    /// Invite an unregistered email to a case.
    ///
    /// The returned token and link are shown to the owner once; they are
    /// never listed again.
    pub async fn create(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        email: &str,
        permissions: SharePermissions,
        origin: &str,
    ) -> ShareResult<Outcome<InviteCreated>> {
        AuthorizationGuard::require_authenticated(actor)?;
        let email = normalize_email(email)
            .ok_or_else(|| ShareError::InvalidInput("malformed email address".to_string()))?;
        let (owner, _case) = match self.guard.authorize_owner(case_id, actor).await {
            Ok(authorized) => authorized,
            Err(err) => return preflight::for_write(err),
        };

        match self.invites.find_by_case_and_email(case_id, &email).await {
            Ok(Some(existing)) if !existing.is_expired_at(Utc::now()) => {
                return Ok(Outcome::WriteFailed(ShareError::Conflict(
                    ConflictReason::AlreadyInvited,
                )));
            }
            Ok(Some(stale)) => {
                debug!(case_id = %case_id, invite_id = %stale.id, "Replacing lapsed invite");
                if let Err(e) = self.invites.delete(stale.id).await {
                    error!(case_id = %case_id, error = %e, "Failed to remove lapsed invite");
                    return Ok(Outcome::WriteFailed(e.into()));
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!(case_id = %case_id, error = %e, "Existing invite lookup failed");
                return Ok(Outcome::WriteFailed(e.into()));
            }
        }

        match self.identities.lookup_by_email(&email).await {
            Ok(Some(_)) => {
                return Ok(Outcome::WriteFailed(ShareError::Conflict(
                    ConflictReason::AlreadyRegistered,
                )));
            }
            Ok(None) => {}
            Err(e) => {
                error!(case_id = %case_id, error = %e, "Identity lookup failed");
                return Ok(Outcome::WriteFailed(e.into()));
            }
        }

        let invite = Invite::new(
            case_id,
            email,
            owner.id,
            permissions,
            generate_invite_token(),
            self.ttl,
        );
        match self.invites.create(&invite).await {
            Ok(invite) => {
                info!(
                    case_id = %case_id,
                    actor_id = %owner.id,
                    invite_id = %invite.id,
                    expires_at = %invite.expires_at,
                    "Invite created"
                );
                Ok(Outcome::Ok(InviteCreated {
                    invite_id: invite.id,
                    link: invite_link(origin, &invite.token),
                    token: invite.token,
                    email: invite.email,
                    expires_at: invite.expires_at,
                }))
            }
            Err(e) if e.is_unique_violation() => Ok(Outcome::WriteFailed(ShareError::Conflict(
                ConflictReason::AlreadyInvited,
            ))),
            Err(e) => {
                error!(case_id = %case_id, error = %e, "Failed to create invite");
                Ok(Outcome::WriteFailed(e.into()))
            }
        }
    }

    /// Describe an invite for its landing page. Public and side-effect free.
    ///
    /// `None` means no such invite. An expired invite is described with
    /// `valid = false` and left in place.
    pub async fn preview(&self, token: &str) -> Outcome<Option<InvitePreview>> {
        if !is_well_formed_token(token) {
            return Outcome::Ok(None);
        }

        let invite = match self.invites.find_by_token(token).await {
            Ok(Some(invite)) => invite,
            Ok(None) => return Outcome::Ok(None),
            Err(e) => {
                warn!(error = %e, "Invite preview degraded");
                return Outcome::ReadDegraded(None);
            }
        };

        let (case_title, degraded) = match self.cases.find_by_id(invite.case_id).await {
            Ok(case) => (case.map(|c| c.title).unwrap_or_default(), false),
            Err(e) => {
                warn!(case_id = %invite.case_id, error = %e, "Case title lookup for preview failed");
                (String::new(), true)
            }
        };

        let preview = InvitePreview {
            case_id: invite.case_id,
            case_title,
            valid: !invite.is_expired_at(Utc::now()),
            email: invite.email,
            can_view: invite.can_view,
            can_edit: invite.can_edit,
            expires_at: invite.expires_at,
        };
        if degraded {
            Outcome::ReadDegraded(Some(preview))
        } else {
            Outcome::Ok(Some(preview))
        }
    }

    /// Convert an invite into a share for the signed-in actor.
    ///
    /// Safe to race: the (case, grantee) uniqueness rule lets exactly one
    /// share insert through, and the loser treats the violation as success.
    pub async fn redeem(
        &self,
        token: &str,
        actor: Option<&Actor>,
    ) -> ShareResult<Outcome<Redemption>> {
        let actor = AuthorizationGuard::require_authenticated(actor)?;
        if !is_well_formed_token(token) {
            return Ok(Outcome::WriteFailed(ShareError::not_found("invite")));
        }

        let invite = match self.invites.find_by_token(token).await {
            Ok(Some(invite)) => invite,
            Ok(None) => return Ok(Outcome::WriteFailed(ShareError::not_found("invite"))),
            Err(e) => {
                error!(actor_id = %actor.id, error = %e, "Invite lookup failed");
                return Ok(Outcome::WriteFailed(e.into()));
            }
        };

        if invite.is_expired_at(Utc::now()) {
            if let Err(e) = self.invites.delete(invite.id).await {
                warn!(invite_id = %invite.id, error = %e, "Failed to remove expired invite");
            }
            info!(case_id = %invite.case_id, invite_id = %invite.id, "Expired invite removed on redeem");
            return Ok(Outcome::WriteFailed(ShareError::Expired));
        }

        if actor.normalized_email() != invite.email {
            info!(
                case_id = %invite.case_id,
                invite_id = %invite.id,
                actor_id = %actor.id,
                "Invite redemption rejected: email mismatch"
            );
            return Ok(Outcome::WriteFailed(ShareError::EmailMismatch));
        }

        let share = Share::new(
            invite.case_id,
            actor.id,
            invite.invited_by,
            invite.permissions(),
        );
        let already_granted = match self.shares.create(&share).await {
            Ok(_) => false,
            Err(e) if e.is_unique_violation() => {
                debug!(
                    case_id = %invite.case_id,
                    actor_id = %actor.id,
                    "Share already present; treating redemption as done"
                );
                true
            }
            Err(e) => {
                error!(
                    case_id = %invite.case_id,
                    invite_id = %invite.id,
                    error = %e,
                    "Failed to create share from invite"
                );
                return Ok(Outcome::WriteFailed(e.into()));
            }
        };

        if let Err(e) = self.invites.delete(invite.id).await {
            warn!(invite_id = %invite.id, error = %e, "Failed to remove redeemed invite");
        }

        info!(
            case_id = %invite.case_id,
            invite_id = %invite.id,
            actor_id = %actor.id,
            already_granted,
            "Invite redeemed"
        );
        Ok(Outcome::Ok(Redemption {
            case_id: invite.case_id,
            invite_id: invite.id,
            already_granted,
        }))
    }

    /// Cancel a pending invite on a case.
    ///
    /// The payload is `true` when a row was removed; a missing invite, or
    /// one belonging to a different case, is a successful no-op.
    pub async fn cancel(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        invite_id: InviteId,
    ) -> ShareResult<Outcome<bool>> {
        let (owner, _case) = match self.guard.authorize_owner(case_id, actor).await {
            Ok(authorized) => authorized,
            Err(err) => return preflight::for_write(err),
        };

        match self.invites.delete_for_case(invite_id, case_id).await {
            Ok(affected) => {
                info!(
                    case_id = %case_id,
                    actor_id = %owner.id,
                    invite_id = %invite_id,
                    removed = affected > 0,
                    "Invite cancelled"
                );
                Ok(Outcome::Ok(affected > 0))
            }
            Err(e) => {
                error!(case_id = %case_id, error = %e, "Failed to cancel invite");
                Ok(Outcome::WriteFailed(e.into()))
            }
        }
    }

    /// List the invites on a case that have not yet expired.
    ///
    /// Expired rows are filtered out at query time, not deleted.
    pub async fn list_pending(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
    ) -> ShareResult<Outcome<Vec<PendingInvite>>> {
        if let Err(err) = self.guard.authorize_owner(case_id, actor).await {
            return preflight::for_read(err, Vec::new());
        }

        match self.invites.list_pending(case_id, Utc::now()).await {
            Ok(invites) => Ok(Outcome::Ok(
                invites.into_iter().map(PendingInvite::from).collect(),
            )),
            Err(e) => {
                warn!(case_id = %case_id, error = %e, "Pending invite listing degraded");
                Ok(Outcome::ReadDegraded(Vec::new()))
            }
        }
    }

    /// Delete every invite whose expiry is at or before `now`.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> ShareResult<u64> {
        let removed = self.invites.delete_expired(now).await?;
        if removed > 0 {
            info!(removed, "Swept expired invites");
        }
        Ok(removed)
    }
}

/// Build the public link for `token` under `origin`.
fn invite_link(origin: &str, token: &str) -> String {
    format!("{}/invite/{token}", origin.trim_end_matches('/'))
}
