//! Audit trail for sharing operations.
//!
//! Entries are appended on a spawned task after the operation has already
//! produced its result. A failed append is logged and otherwise ignored.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use casehub_core::events::{DomainEvent, ShareEvent};
use casehub_core::traits::store::StoreResult;
use casehub_core::types::id::UserId;
use casehub_database::repositories::AuditLogRepository;
use casehub_entity::audit::CreateAuditLogEntry;

/// Destination for audit entries.
#[async_trait]
pub trait AuditSink: Send + Sync + std::fmt::Debug + 'static {
    /// Append one entry.
    async fn record(&self, entry: CreateAuditLogEntry) -> StoreResult<()>;
}

#[async_trait]
impl AuditSink for AuditLogRepository {
    async fn record(&self, entry: CreateAuditLogEntry) -> StoreResult<()> {
        self.create(entry).await.map(|_| ())
    }
}

/// Fire-and-forget audit dispatcher.
#[derive(Debug, Clone)]
pub struct AuditRecorder {
    sink: Arc<dyn AuditSink>,
}

impl AuditRecorder {
    /// Create a recorder writing to `sink`.
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Dispatch an entry for `event`. The returned handle may be dropped.
    pub fn record(&self, actor_id: UserId, event: ShareEvent) -> JoinHandle<()> {
        let event = DomainEvent::new(actor_id, event);
        let entry = CreateAuditLogEntry::from(&event);
        let sink = Arc::clone(&self.sink);

        tokio::spawn(async move {
            let action = entry.action.clone();
            match sink.record(entry).await {
                Ok(()) => debug!(event_id = %event.id, action = %action, "Audit entry recorded"),
                Err(e) => warn!(
                    event_id = %event.id,
                    action = %action,
                    error = %e,
                    "Failed to record audit entry"
                ),
            }
        })
    }
}
