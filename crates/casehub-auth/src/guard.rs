//! Authentication and ownership checks.
//!
//! Both checks run before any mutation of case-scoped state. They are pure;
//! [`AuthorizationGuard::authorize_owner`] is the one place that reads the
//! case to learn its owner.

use casehub_core::error::ShareError;
use casehub_core::result::ShareResult;
use casehub_core::types::id::{CaseId, UserId};
use casehub_database::repositories::CaseRepository;
use casehub_entity::case::Case;
use tracing::{debug, error};

use crate::actor::Actor;

/// Owner-only access checks for case-scoped operations.
#[derive(Debug, Clone)]
pub struct AuthorizationGuard {
    cases: CaseRepository,
}

impl AuthorizationGuard {
    /// Create a guard that reads case ownership through `cases`.
    pub fn new(cases: CaseRepository) -> Self {
        Self { cases }
    }

    /// Narrow an optional actor to a present one.
    pub fn require_authenticated(actor: Option<&Actor>) -> ShareResult<&Actor> {
        actor.ok_or(ShareError::Unauthenticated)
    }

    /// Fail unless the case owner is known and equals `actor_id`.
    pub fn require_ownership(case_owner_id: Option<UserId>, actor_id: UserId) -> ShareResult<()> {
        match case_owner_id {
            Some(owner_id) if owner_id == actor_id => Ok(()),
            _ => Err(ShareError::Forbidden),
        }
    }

    /// Authenticate, load the case, and require that the actor owns it.
    ///
    /// A missing case is `Forbidden` (owner unknown); a failed read is
    /// `Internal`.
    pub async fn authorize_owner<'a>(
        &self,
        case_id: CaseId,
        actor: Option<&'a Actor>,
    ) -> ShareResult<(&'a Actor, Case)> {
        let actor = Self::require_authenticated(actor)?;

        let case = self.cases.find_by_id(case_id).await.map_err(|e| {
            error!(case_id = %case_id, error = %e, "Failed to load case for ownership check");
            ShareError::Internal(format!("failed to load case: {e}"))
        })?;

        Self::require_ownership(case.as_ref().map(|c| c.owner_id), actor.id).inspect_err(|_| {
            debug!(case_id = %case_id, actor_id = %actor.id, "Ownership check rejected");
        })?;

        // require_ownership only passes with a known owner
        case.map(|case| (actor, case)).ok_or(ShareError::Forbidden)
    }
}
