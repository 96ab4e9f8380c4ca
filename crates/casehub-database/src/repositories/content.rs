//! Case content (emails and events) repository implementation.

use std::sync::Arc;

use casehub_core::traits::store::{RecordStore, StoreResult};
use casehub_core::types::filter::FilterField;
use casehub_core::types::id::CaseId;
use casehub_core::types::query::{Collection, Query};
use casehub_core::types::sorting::SortField;
use casehub_entity::case::{CaseEmail, CaseEvent};

use super::{from_record, from_records, to_record};

/// Repository for the emails and events attached to cases.
#[derive(Debug, Clone)]
pub struct CaseContentRepository {
    store: Arc<dyn RecordStore>,
}

impl CaseContentRepository {
    /// Create a new content repository.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Emails filed against `case_id`, most recently sent first.
    pub async fn emails_for_case(&self, case_id: CaseId) -> StoreResult<Vec<CaseEmail>> {
        let query = Query::new(
            Collection::CaseEmails,
            vec![FilterField::eq("case_id", case_id.into_uuid())],
        )
        .ordered_by(SortField::desc("sent_at"));
        from_records(Collection::CaseEmails, self.store.fetch_all(&query).await?)
    }

    /// Timeline events of `case_id`, most recent first.
    pub async fn events_for_case(&self, case_id: CaseId) -> StoreResult<Vec<CaseEvent>> {
        let query = Query::new(
            Collection::CaseEvents,
            vec![FilterField::eq("case_id", case_id.into_uuid())],
        )
        .ordered_by(SortField::desc("occurred_at"));
        from_records(Collection::CaseEvents, self.store.fetch_all(&query).await?)
    }

    /// Insert an email.
    pub async fn add_email(&self, email: &CaseEmail) -> StoreResult<CaseEmail> {
        let record = self
            .store
            .insert(Collection::CaseEmails, to_record(Collection::CaseEmails, email)?)
            .await?;
        from_record(Collection::CaseEmails, record)
    }

    /// Insert an event.
    pub async fn add_event(&self, event: &CaseEvent) -> StoreResult<CaseEvent> {
        let record = self
            .store
            .insert(Collection::CaseEvents, to_record(Collection::CaseEvents, event)?)
            .await?;
        from_record(Collection::CaseEvents, record)
    }
}
