//! Share repository implementation.

use std::sync::Arc;

use casehub_core::traits::store::{RecordStore, StoreResult};
use casehub_core::types::filter::FilterField;
use casehub_core::types::id::{CaseId, UserId};
use casehub_core::types::query::{Collection, Query, Record};
use casehub_core::types::sorting::SortField;
use casehub_entity::share::{Share, SharePermissions};

use super::{from_record, from_records, to_record};

/// Repository for share grants.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    store: Arc<dyn RecordStore>,
}

/// Query addressing the single share of `user_id` on `case_id`.
fn pair_query(case_id: CaseId, user_id: UserId) -> Query {
    Query::new(
        Collection::Shares,
        vec![
            FilterField::eq("case_id", case_id.into_uuid()),
            FilterField::eq("user_id", user_id.into_uuid()),
        ],
    )
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Find the share for a (case, grantee) pair.
    pub async fn find(&self, case_id: CaseId, user_id: UserId) -> StoreResult<Option<Share>> {
        self.store
            .fetch_optional(&pair_query(case_id, user_id))
            .await?
            .map(|record| from_record(Collection::Shares, record))
            .transpose()
    }

    /// List every share on a case, oldest first.
    pub async fn list_for_case(&self, case_id: CaseId) -> StoreResult<Vec<Share>> {
        let query = Query::new(
            Collection::Shares,
            vec![FilterField::eq("case_id", case_id.into_uuid())],
        )
        .ordered_by(SortField::asc("created_at"));
        from_records(Collection::Shares, self.store.fetch_all(&query).await?)
    }

    /// Insert a share. A duplicate pair surfaces as a unique violation.
    pub async fn create(&self, share: &Share) -> StoreResult<Share> {
        let record = self
            .store
            .insert(Collection::Shares, to_record(Collection::Shares, share)?)
            .await?;
        from_record(Collection::Shares, record)
    }

    /// Overwrite both flags on a share. Returns rows affected.
    pub async fn update_permissions(
        &self,
        case_id: CaseId,
        user_id: UserId,
        permissions: SharePermissions,
    ) -> StoreResult<u64> {
        let mut changes = Record::new();
        changes.insert("can_view".to_string(), permissions.can_view.into());
        changes.insert("can_edit".to_string(), permissions.can_edit.into());
        self.store
            .update(&pair_query(case_id, user_id), changes)
            .await
    }

    /// Delete a share. Returns rows affected.
    pub async fn delete(&self, case_id: CaseId, user_id: UserId) -> StoreResult<u64> {
        self.store.delete(&pair_query(case_id, user_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRecordStore;

    #[tokio::test]
    async fn test_share_lifecycle() {
        let repo = ShareRepository::new(Arc::new(MemoryRecordStore::new()));
        let (case_id, user_id) = (CaseId::new(), UserId::new());
        let share = Share::new(case_id, user_id, UserId::new(), SharePermissions::VIEW_ONLY);

        let created = repo.create(&share).await.expect("create");
        assert_eq!(created, share);

        let affected = repo
            .update_permissions(case_id, user_id, SharePermissions::new(false, true))
            .await
            .expect("update");
        assert_eq!(affected, 1);
        let found = repo.find(case_id, user_id).await.expect("find").expect("row");
        assert!(!found.can_view);
        assert!(found.can_edit);

        assert_eq!(repo.delete(case_id, user_id).await.expect("delete"), 1);
        assert_eq!(repo.delete(case_id, user_id).await.expect("delete"), 0);
        assert!(repo.list_for_case(case_id).await.expect("list").is_empty());
    }
}
