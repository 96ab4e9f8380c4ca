//! Expired invite sweep.
//!
//! Redemption already removes an expired invite when it sees one; the
//! sweep removes the ones nobody comes back for.

use chrono::Utc;
use tracing;

use casehub_core::error::AppError;
use casehub_service::ShareController;

/// Deletes invites whose expiry has passed.
#[derive(Debug, Clone)]
pub struct InviteSweepJob {
    /// Sharing facade
    sharing: ShareController,
}

impl InviteSweepJob {
    /// Create a new sweep job
    pub fn new(sharing: ShareController) -> Self {
        Self { sharing }
    }

    /// Run one sweep, returning the number of invites removed
    pub async fn run(&self) -> Result<u64, AppError> {
        tracing::debug!("Running expired invite sweep");

        let removed = self.sharing.sweep_expired_invites(Utc::now()).await?;

        tracing::info!(removed, "Expired invite sweep finished");
        Ok(removed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Duration;

    use casehub_auth::AuthorizationGuard;
    use casehub_core::types::id::{CaseId, UserId};
    use casehub_database::repositories::Repositories;
    use casehub_database::store::MemoryRecordStore;
    use casehub_entity::invite::Invite;
    use casehub_entity::share::SharePermissions;
    use casehub_service::{AccessCodeGateway, AuditRecorder, InviteLedger, ShareRegistry};

    pub(crate) fn controller(repos: &Repositories) -> ShareController {
        let guard = AuthorizationGuard::new(repos.cases.clone());
        ShareController::new(
            ShareRegistry::new(
                guard.clone(),
                Arc::new(repos.profiles.clone()),
                repos.shares.clone(),
            ),
            InviteLedger::new(
                guard.clone(),
                Arc::new(repos.profiles.clone()),
                repos.invites.clone(),
                repos.shares.clone(),
                repos.cases.clone(),
                Duration::days(7),
            ),
            AccessCodeGateway::new(
                guard,
                repos.access_codes.clone(),
                repos.cases.clone(),
                repos.content.clone(),
                5,
            ),
            AuditRecorder::new(Arc::new(repos.audit.clone())),
        )
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired() {
        let repos = Repositories::new(Arc::new(MemoryRecordStore::new()));
        let case_id = CaseId::new();
        for (email, token, ttl) in [
            ("old@x.com", "old", Duration::hours(-2)),
            ("new@x.com", "new", Duration::hours(2)),
        ] {
            repos
                .invites
                .create(&Invite::new(
                    case_id,
                    email.to_string(),
                    UserId::new(),
                    SharePermissions::VIEW_ONLY,
                    token.to_string(),
                    ttl,
                ))
                .await
                .expect("invite");
        }

        let job = InviteSweepJob::new(controller(&repos));

        assert_eq!(job.run().await.expect("sweep"), 1);
        assert!(repos.invites.find_by_token("old").await.expect("find").is_none());
        assert!(repos.invites.find_by_token("new").await.expect("find").is_some());
        assert_eq!(job.run().await.expect("sweep"), 0);
    }
}
