//! Case repository implementation.

use std::sync::Arc;

use casehub_core::traits::store::{RecordStore, StoreResult};
use casehub_core::types::filter::FilterField;
use casehub_core::types::id::CaseId;
use casehub_core::types::query::{Collection, Query};
use casehub_entity::case::Case;

use super::{from_record, to_record};

/// Read access to cases, plus inserts for seeding.
#[derive(Debug, Clone)]
pub struct CaseRepository {
    store: Arc<dyn RecordStore>,
}

impl CaseRepository {
    /// Create a new case repository.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Find a case by ID.
    pub async fn find_by_id(&self, id: CaseId) -> StoreResult<Option<Case>> {
        let query = Query::new(Collection::Cases, vec![FilterField::eq("id", id.into_uuid())]);
        self.store
            .fetch_optional(&query)
            .await?
            .map(|record| from_record(Collection::Cases, record))
            .transpose()
    }

    /// Insert a case.
    pub async fn create(&self, case: &Case) -> StoreResult<Case> {
        let record = self
            .store
            .insert(Collection::Cases, to_record(Collection::Cases, case)?)
            .await?;
        from_record(Collection::Cases, record)
    }
}
