//! Access code issuance and resolution.
//!
//! Resolution is anonymous: possessing a code is the permission. Every
//! content query is filtered by the case the code maps to, and the results
//! are filtered again in memory before they leave this module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use casehub_auth::secret::{display_access_code, generate_access_code, normalize_access_code};
use casehub_auth::{Actor, AuthorizationGuard};
use casehub_core::error::ShareError;
use casehub_core::result::ShareResult;
use casehub_core::types::id::CaseId;
use casehub_core::types::outcome::Outcome;
use casehub_database::repositories::{
    AccessCodeRepository, CaseContentRepository, CaseRepository,
};
use casehub_entity::access::{AccessCode, CaseBundle};

use crate::preflight;

/// An access code as shown to the case owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedAccessCode {
    /// Code in display form (`XXXX-XXXX-XXXX`).
    pub code: String,
    /// The case it unlocks.
    pub case_id: CaseId,
    /// When it was issued.
    pub created_at: DateTime<Utc>,
}

impl From<AccessCode> for IssuedAccessCode {
    fn from(code: AccessCode) -> Self {
        Self {
            code: display_access_code(&code.code),
            case_id: code.case_id,
            created_at: code.created_at,
        }
    }
}

/// Resolves access codes to case content and manages their issuance.
#[derive(Debug, Clone)]
pub struct AccessCodeGateway {
    guard: AuthorizationGuard,
    codes: AccessCodeRepository,
    cases: CaseRepository,
    content: CaseContentRepository,
    max_issue_attempts: u32,
}

impl AccessCodeGateway {
    /// Creates a new gateway. Issuance retries code collisions up to
    /// `max_issue_attempts` times.
    pub fn new(
        guard: AuthorizationGuard,
        codes: AccessCodeRepository,
        cases: CaseRepository,
        content: CaseContentRepository,
        max_issue_attempts: u32,
    ) -> Self {
        Self {
            guard,
            codes,
            cases,
            content,
            max_issue_attempts: max_issue_attempts.max(1),
        }
    }

    /// Resolve a user-entered code to the case it unlocks.
    ///
    /// `None` means the code does not exist (or its case is gone).
    pub async fn resolve(&self, raw_code: &str) -> Outcome<Option<CaseBundle>> {
        let Some(code) = normalize_access_code(raw_code) else {
            return Outcome::Ok(None);
        };

        let mapping = match self.codes.find_by_code(&code).await {
            Ok(Some(mapping)) => mapping,
            Ok(None) => return Outcome::Ok(None),
            Err(e) => {
                warn!(error = %e, "Access code lookup degraded");
                return Outcome::ReadDegraded(None);
            }
        };
        let case_id = mapping.case_id;

        let case = match self.cases.find_by_id(case_id).await {
            Ok(Some(case)) if case.id == case_id => case,
            Ok(_) => return Outcome::Ok(None),
            Err(e) => {
                warn!(case_id = %case_id, error = %e, "Case lookup for access code degraded");
                return Outcome::ReadDegraded(None);
            }
        };

        let (emails, events) = tokio::join!(
            self.content.emails_for_case(case_id),
            self.content.events_for_case(case_id),
        );

        let mut degraded = false;
        let emails = emails.unwrap_or_else(|e| {
            warn!(case_id = %case_id, error = %e, "Case emails unavailable");
            degraded = true;
            Vec::new()
        });
        let events = events.unwrap_or_else(|e| {
            warn!(case_id = %case_id, error = %e, "Case events unavailable");
            degraded = true;
            Vec::new()
        });

        let bundle = CaseBundle {
            case,
            emails: emails.into_iter().filter(|e| e.case_id == case_id).collect(),
            events: events.into_iter().filter(|e| e.case_id == case_id).collect(),
        };
        info!(case_id = %case_id, "Case opened by access code");

        if degraded {
            Outcome::ReadDegraded(Some(bundle))
        } else {
            Outcome::Ok(Some(bundle))
        }
    }

    /// Issue a new access code for a case.
    pub async fn issue(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
    ) -> ShareResult<Outcome<IssuedAccessCode>> {
        let (owner, _case) = match self.guard.authorize_owner(case_id, actor).await {
            Ok(authorized) => authorized,
            Err(err) => return preflight::for_write(err),
        };

        for attempt in 1..=self.max_issue_attempts {
            let code = AccessCode::new(generate_access_code(), case_id, owner.id);
            match self.codes.create(&code).await {
                Ok(code) => {
                    info!(case_id = %case_id, actor_id = %owner.id, "Access code issued");
                    return Ok(Outcome::Ok(code.into()));
                }
                Err(e) if e.is_unique_violation() => {
                    warn!(case_id = %case_id, attempt, "Access code collision, retrying");
                }
                Err(e) => {
                    error!(case_id = %case_id, error = %e, "Failed to issue access code");
                    return Ok(Outcome::WriteFailed(e.into()));
                }
            }
        }

        error!(
            case_id = %case_id,
            attempts = self.max_issue_attempts,
            "Gave up issuing access code after repeated collisions"
        );
        Ok(Outcome::WriteFailed(ShareError::Internal(
            "could not allocate a unique access code".to_string(),
        )))
    }

    /// Revoke one of a case's access codes. Succeeds whether or not it existed.
    pub async fn revoke(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
        raw_code: &str,
    ) -> ShareResult<Outcome<bool>> {
        let (owner, _case) = match self.guard.authorize_owner(case_id, actor).await {
            Ok(authorized) => authorized,
            Err(err) => return preflight::for_write(err),
        };
        let code = normalize_access_code(raw_code)
            .ok_or_else(|| ShareError::InvalidInput("malformed access code".to_string()))?;

        match self.codes.delete_for_case(&code, case_id).await {
            Ok(affected) => {
                info!(
                    case_id = %case_id,
                    actor_id = %owner.id,
                    removed = affected > 0,
                    "Access code revoked"
                );
                Ok(Outcome::Ok(affected > 0))
            }
            Err(e) => {
                error!(case_id = %case_id, error = %e, "Failed to revoke access code");
                Ok(Outcome::WriteFailed(e.into()))
            }
        }
    }

    /// List a case's access codes.
    pub async fn list(
        &self,
        case_id: CaseId,
        actor: Option<&Actor>,
    ) -> ShareResult<Outcome<Vec<IssuedAccessCode>>> {
        if let Err(err) = self.guard.authorize_owner(case_id, actor).await {
            return preflight::for_read(err, Vec::new());
        }

        match self.codes.list_for_case(case_id).await {
            Ok(codes) => Ok(Outcome::Ok(codes.into_iter().map(Into::into).collect())),
            Err(e) => {
                warn!(case_id = %case_id, error = %e, "Access code listing degraded");
                Ok(Outcome::ReadDegraded(Vec::new()))
            }
        }
    }
}
