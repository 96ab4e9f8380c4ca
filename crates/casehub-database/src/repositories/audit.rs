//! Audit log repository implementation.

use std::sync::Arc;

use casehub_core::traits::store::{RecordStore, StoreResult};
use casehub_core::types::filter::FilterField;
use casehub_core::types::id::CaseId;
use casehub_core::types::query::{Collection, Query};
use casehub_core::types::sorting::SortField;
use casehub_entity::audit::{AuditLogEntry, CreateAuditLogEntry};

use super::{from_record, from_records, to_record};

/// Repository for audit log entries. Append-only.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    store: Arc<dyn RecordStore>,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Append an entry.
    pub async fn create(&self, data: CreateAuditLogEntry) -> StoreResult<AuditLogEntry> {
        let entry = data.into_entry();
        let record = self
            .store
            .insert(Collection::AuditLog, to_record(Collection::AuditLog, &entry)?)
            .await?;
        from_record(Collection::AuditLog, record)
    }

    /// Most recent entries targeting `case_id`.
    pub async fn list_for_case(
        &self,
        case_id: CaseId,
        limit: u64,
    ) -> StoreResult<Vec<AuditLogEntry>> {
        let query = Query::new(
            Collection::AuditLog,
            vec![
                FilterField::eq("target_type", "case"),
                FilterField::eq("target_id", case_id.into_uuid()),
            ],
        )
        .ordered_by(SortField::desc("created_at"))
        .limited_to(limit);
        from_records(Collection::AuditLog, self.store.fetch_all(&query).await?)
    }
}
