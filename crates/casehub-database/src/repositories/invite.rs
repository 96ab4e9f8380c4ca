//! Invite repository implementation.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use casehub_core::traits::store::{RecordStore, StoreResult};
use casehub_core::types::filter::FilterField;
use casehub_core::types::id::{CaseId, InviteId};
use casehub_core::types::query::{Collection, Query};
use casehub_core::types::sorting::SortField;
use casehub_entity::invite::Invite;

use super::{from_record, from_records, to_record};

/// Repository for pending invites.
#[derive(Debug, Clone)]
pub struct InviteRepository {
    store: Arc<dyn RecordStore>,
}

impl InviteRepository {
    /// Create a new invite repository.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn find_one(&self, query: Query) -> StoreResult<Option<Invite>> {
        self.store
            .fetch_optional(&query)
            .await?
            .map(|record| from_record(Collection::Invites, record))
            .transpose()
    }

    /// Find an invite by its redemption token.
    pub async fn find_by_token(&self, token: &str) -> StoreResult<Option<Invite>> {
        self.find_one(Query::new(
            Collection::Invites,
            vec![FilterField::eq("token", token)],
        ))
        .await
    }

    /// Find the invite for a (case, email) pair, expired or not.
    pub async fn find_by_case_and_email(
        &self,
        case_id: CaseId,
        email: &str,
    ) -> StoreResult<Option<Invite>> {
        self.find_one(Query::new(
            Collection::Invites,
            vec![
                FilterField::eq("case_id", case_id.into_uuid()),
                FilterField::eq("email", email),
            ],
        ))
        .await
    }

    /// List invites on a case that expire after `now`, newest first.
    pub async fn list_pending(
        &self,
        case_id: CaseId,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<Invite>> {
        let query = Query::new(
            Collection::Invites,
            vec![
                FilterField::eq("case_id", case_id.into_uuid()),
                FilterField::gt("expires_at", now),
            ],
        )
        .ordered_by(SortField::desc("created_at"));
        from_records(Collection::Invites, self.store.fetch_all(&query).await?)
    }

    /// Insert an invite.
    pub async fn create(&self, invite: &Invite) -> StoreResult<Invite> {
        let record = self
            .store
            .insert(Collection::Invites, to_record(Collection::Invites, invite)?)
            .await?;
        from_record(Collection::Invites, record)
    }

    /// Delete an invite by ID. Returns rows affected.
    pub async fn delete(&self, id: InviteId) -> StoreResult<u64> {
        self.store
            .delete(&Query::new(
                Collection::Invites,
                vec![FilterField::eq("id", id.into_uuid())],
            ))
            .await
    }

    /// Delete an invite only if it belongs to `case_id`. Returns rows affected.
    pub async fn delete_for_case(&self, id: InviteId, case_id: CaseId) -> StoreResult<u64> {
        self.store
            .delete(&Query::new(
                Collection::Invites,
                vec![
                    FilterField::eq("id", id.into_uuid()),
                    FilterField::eq("case_id", case_id.into_uuid()),
                ],
            ))
            .await
    }

    /// Delete every invite whose expiry is at or before `now`.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        self.store
            .delete(&Query::new(
                Collection::Invites,
                vec![FilterField::lte("expires_at", now)],
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRecordStore;
    use casehub_core::types::id::UserId;
    use casehub_entity::share::SharePermissions;
    use chrono::Duration;

    fn invite(case_id: CaseId, email: &str, token: &str, ttl: Duration) -> Invite {
        Invite::new(
            case_id,
            email.to_string(),
            UserId::new(),
            SharePermissions::VIEW_ONLY,
            token.to_string(),
            ttl,
        )
    }

    #[tokio::test]
    async fn test_pending_excludes_expired() {
        let repo = InviteRepository::new(Arc::new(MemoryRecordStore::new()));
        let case_id = CaseId::new();
        repo.create(&invite(case_id, "a@x.com", "t1", Duration::hours(1)))
            .await
            .expect("create");
        repo.create(&invite(case_id, "b@x.com", "t2", Duration::hours(-1)))
            .await
            .expect("create");

        let pending = repo.list_pending(case_id, Utc::now()).await.expect("list");
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].email, "a@x.com");

        assert_eq!(repo.delete_expired(Utc::now()).await.expect("sweep"), 1);
        assert!(repo.find_by_token("t2").await.expect("find").is_none());
        assert!(repo.find_by_token("t1").await.expect("find").is_some());
    }

    #[tokio::test]
    async fn test_delete_is_scoped_to_case() {
        let repo = InviteRepository::new(Arc::new(MemoryRecordStore::new()));
        let case_id = CaseId::new();
        let created = repo
            .create(&invite(case_id, "a@x.com", "t1", Duration::hours(1)))
            .await
            .expect("create");

        assert_eq!(
            repo.delete_for_case(created.id, CaseId::new())
                .await
                .expect("delete"),
            0
        );
        assert_eq!(
            repo.delete_for_case(created.id, case_id)
                .await
                .expect("delete"),
            1
        );
    }

    #[tokio::test]
    async fn test_duplicate_case_email_rejected() {
        let repo = InviteRepository::new(Arc::new(MemoryRecordStore::new()));
        let case_id = CaseId::new();
        repo.create(&invite(case_id, "a@x.com", "t1", Duration::hours(1)))
            .await
            .expect("create");
        let err = repo
            .create(&invite(case_id, "a@x.com", "t2", Duration::hours(1)))
            .await
            .expect_err("duplicate");
        assert!(err.is_unique_violation());
    }
}
