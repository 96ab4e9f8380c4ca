//! Application-boundary facade over the sharing services.
//!
//! Each method forwards to exactly one service operation and, when that
//! operation succeeds, dispatches an audit entry. Audit dispatch never
//! delays or alters the returned result.

use serde::{Deserialize, Serialize};

use casehub_auth::Actor;
use casehub_core::events::ShareEvent;
use casehub_core::result::ShareResult;
use casehub_core::types::id::{CaseId, InviteId, UserId};
use casehub_core::types::outcome::Outcome;
use casehub_entity::access::CaseBundle;
use casehub_entity::invite::{InviteCreated, InvitePreview, PendingInvite};
use casehub_entity::share::{Share, SharePermissions, SharedUser};

use crate::access::{AccessCodeGateway, IssuedAccessCode};
use crate::audit::AuditRecorder;
use crate::invite::{InviteLedger, Redemption};
use crate::share::ShareRegistry;

/// Everyone with access to a case, and everyone invited to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharingOverview {
    /// Current grants.
    pub shared_users: Vec<SharedUser>,
    /// Unexpired invites.
    pub pending_invites: Vec<PendingInvite>,
}

/// Entry point for sharing operations at the application boundary.
#[derive(Debug, Clone)]
pub struct ShareController {
    registry: ShareRegistry,
    ledger: InviteLedger,
    gateway: AccessCodeGateway,
    audit: AuditRecorder,
}

impl ShareController {
    /// Creates a new controller.
    pub fn new(
        registry: ShareRegistry,
        ledger: InviteLedger,
        gateway: AccessCodeGateway,
        audit: AuditRecorder,
    ) -> Self {
        Self {
            registry,
            ledger,
            gateway,
            audit,
        }
    }

    /// Audit `event` on behalf of `actor` if `outcome` succeeded.
    fn audit_on_success<T>(
        &self,
        outcome: &Outcome<T>,
        actor: Option<&Actor>,
        event: impl FnOnce(&T) -> Option<ShareEvent>,
    ) {
        if let (Outcome::Ok(data), Some(actor)) = (outcome, actor) {
            if let Some(event) = event(data) {
                // Dropping the handle detaches the task.
                let _ = self.audit.record(actor.id, event);
            }
        }
    }

    /// See [`ShareRegistry::share_with_user`].
    pub async fn share_with_user(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        email: &str,
    ) -> ShareResult<Outcome<Share>> {
        let outcome = self.registry.share_with_user(case_id, actor, email).await?;
        self.audit_on_success(&outcome, actor, |share| {
            Some(ShareEvent::Granted {
                case_id,
                grantee_id: share.user_id,
                can_view: share.can_view,
                can_edit: share.can_edit,
            })
        });
        Ok(outcome)
    }

    /// See [`ShareRegistry::list_shared_users`].
    pub async fn list_shared_users(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
    ) -> ShareResult<Outcome<Vec<SharedUser>>> {
        self.registry.list_shared_users(case_id, actor).await
    }

    /// See [`ShareRegistry::update_permissions`].
    pub async fn update_permissions(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        grantee_id: UserId,
        permissions: SharePermissions,
    ) -> ShareResult<Outcome<bool>> {
        let outcome = self
            .registry
            .update_permissions(case_id, actor, grantee_id, permissions)
            .await?;
        self.audit_on_success(&outcome, actor, |_| {
            Some(ShareEvent::PermissionsChanged {
                case_id,
                grantee_id,
                can_view: permissions.can_view,
                can_edit: permissions.can_edit,
            })
        });
        Ok(outcome)
    }

    /// See [`ShareRegistry::unshare`].
    pub async fn unshare(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        grantee_id: UserId,
    ) -> ShareResult<Outcome<bool>> {
        let outcome = self.registry.unshare(case_id, actor, grantee_id).await?;
        self.audit_on_success(&outcome, actor, |_| {
            Some(ShareEvent::Revoked {
                case_id,
                grantee_id,
            })
        });
        Ok(outcome)
    }

    /// See [`InviteLedger::create`].
    pub async fn create_invite(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        email: &str,
        permissions: SharePermissions,
        origin: &str,
    ) -> ShareResult<Outcome<InviteCreated>> {
        let outcome = self
            .ledger
            .create(case_id, actor, email, permissions, origin)
            .await?;
        self.audit_on_success(&outcome, actor, |created| {
            Some(ShareEvent::InviteCreated {
                case_id,
                invite_id: created.invite_id,
                email: created.email.clone(),
                expires_at: created.expires_at,
            })
        });
        Ok(outcome)
    }

    /// See [`InviteLedger::preview`].
    pub async fn preview_invite(&self, token: &str) -> Outcome<Option<InvitePreview>> {
        self.ledger.preview(token).await
    }

    /// See [`InviteLedger::redeem`].
    pub async fn redeem_invite(
        &self,
        token: &str,
        actor: Option<&Actor>,
    ) -> ShareResult<Outcome<Redemption>> {
        let outcome = self.ledger.redeem(token, actor).await?;
        self.audit_on_success(&outcome, actor, |redemption| {
            actor.map(|actor| ShareEvent::InviteRedeemed {
                case_id: redemption.case_id,
                grantee_id: actor.id,
                already_granted: redemption.already_granted,
            })
        });
        Ok(outcome)
    }

    /// See [`InviteLedger::cancel`].
    pub async fn cancel_invite(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        invite_id: InviteId,
    ) -> ShareResult<Outcome<bool>> {
        let outcome = self.ledger.cancel(case_id, actor, invite_id).await?;
        self.audit_on_success(&outcome, actor, |_| {
            Some(ShareEvent::InviteCancelled { case_id, invite_id })
        });
        Ok(outcome)
    }

    /// See [`InviteLedger::list_pending`].
    pub async fn list_pending_invites(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
    ) -> ShareResult<Outcome<Vec<PendingInvite>>> {
        self.ledger.list_pending(case_id, actor).await
    }

    /// Shares and pending invites of a case, fetched concurrently.
    ///
    /// Degraded if either half is.
    pub async fn sharing_overview(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
    ) -> ShareResult<Outcome<SharingOverview>> {
        let (users, invites) = tokio::join!(
            self.registry.list_shared_users(case_id, actor),
            self.ledger.list_pending(case_id, actor),
        );
        let (users, invites) = (users?, invites?);

        let degraded = users.is_degraded() || invites.is_degraded();
        let overview = SharingOverview {
            shared_users: users.into_data().unwrap_or_default(),
            pending_invites: invites.into_data().unwrap_or_default(),
        };
        Ok(if degraded {
            Outcome::ReadDegraded(overview)
        } else {
            Outcome::Ok(overview)
        })
    }

    /// See [`AccessCodeGateway::resolve`].
    pub async fn resolve_access_code(&self, code: &str) -> Outcome<Option<CaseBundle>> {
        self.gateway.resolve(code).await
    }

    /// See [`AccessCodeGateway::issue`].
    pub async fn issue_access_code(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
    ) -> ShareResult<Outcome<IssuedAccessCode>> {
        let outcome = self.gateway.issue(case_id, actor).await?;
        self.audit_on_success(&outcome, actor, |_| {
            Some(ShareEvent::AccessCodeIssued { case_id })
        });
        Ok(outcome)
    }

    /// See [`AccessCodeGateway::revoke`].
    pub async fn revoke_access_code(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        code: &str,
    ) -> ShareResult<Outcome<bool>> {
        let outcome = self.gateway.revoke(case_id, actor, code).await?;
        self.audit_on_success(&outcome, actor, |_| {
            Some(ShareEvent::AccessCodeRevoked { case_id })
        });
        Ok(outcome)
    }

    /// See [`AccessCodeGateway::list`].
    pub async fn list_access_codes(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
    ) -> ShareResult<Outcome<Vec<IssuedAccessCode>>> {
        self.gateway.list(case_id, actor).await
    }

    /// See [`InviteLedger::sweep_expired`].
    pub async fn sweep_expired_invites(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> ShareResult<u64> {
        self.ledger.sweep_expired(now).await
    }
}
