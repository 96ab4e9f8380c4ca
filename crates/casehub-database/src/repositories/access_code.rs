//! Access code repository implementation.

use std::sync::Arc;

use casehub_core::traits::store::{RecordStore, StoreResult};
use casehub_core::types::filter::FilterField;
use casehub_core::types::id::CaseId;
use casehub_core::types::query::{Collection, Query};
use casehub_core::types::sorting::SortField;
use casehub_entity::access::AccessCode;

use super::{from_record, from_records, to_record};

/// Repository for anonymous access codes.
#[derive(Debug, Clone)]
pub struct AccessCodeRepository {
    store: Arc<dyn RecordStore>,
}

impl AccessCodeRepository {
    /// Create a new access code repository.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Look up a normalized code.
    pub async fn find_by_code(&self, code: &str) -> StoreResult<Option<AccessCode>> {
        self.store
            .fetch_optional(&Query::new(
                Collection::AccessCodes,
                vec![FilterField::eq("code", code)],
            ))
            .await?
            .map(|record| from_record(Collection::AccessCodes, record))
            .transpose()
    }

    /// List the codes issued for a case, newest first.
    pub async fn list_for_case(&self, case_id: CaseId) -> StoreResult<Vec<AccessCode>> {
        let query = Query::new(
            Collection::AccessCodes,
            vec![FilterField::eq("case_id", case_id.into_uuid())],
        )
        .ordered_by(SortField::desc("created_at"));
        from_records(Collection::AccessCodes, self.store.fetch_all(&query).await?)
    }

    /// Insert a code. A collision surfaces as a unique violation.
    pub async fn create(&self, code: &AccessCode) -> StoreResult<AccessCode> {
        let record = self
            .store
            .insert(
                Collection::AccessCodes,
                to_record(Collection::AccessCodes, code)?,
            )
            .await?;
        from_record(Collection::AccessCodes, record)
    }

    /// Delete a code only if it belongs to `case_id`. Returns rows affected.
    pub async fn delete_for_case(&self, code: &str, case_id: CaseId) -> StoreResult<u64> {
        self.store
            .delete(&Query::new(
                Collection::AccessCodes,
                vec![
                    FilterField::eq("code", code),
                    FilterField::eq("case_id", case_id.into_uuid()),
                ],
            ))
            .await
    }
}
