//! Typed repositories over a shared [`RecordStore`].
//!
//! Each repository knows one collection: it builds the immutable
//! [`Query`](casehub_core::types::query::Query) descriptions for its
//! lookups and converts between entity structs and stored records.

pub mod access_code;
pub mod audit;
pub mod case;
pub mod content;
pub mod invite;
pub mod profile;
pub mod share;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use casehub_core::traits::store::{RecordStore, StoreError, StoreResult};
use casehub_core::types::query::{Collection, Record};

pub use access_code::AccessCodeRepository;
pub use audit::AuditLogRepository;
pub use case::CaseRepository;
pub use content::CaseContentRepository;
pub use invite::InviteRepository;
pub use profile::ProfileRepository;
pub use share::ShareRepository;

/// Convert an entity into a stored record.
pub(crate) fn to_record<T: Serialize>(collection: Collection, entity: &T) -> StoreResult<Record> {
    match serde_json::to_value(entity) {
        Ok(serde_json::Value::Object(record)) => Ok(record),
        Ok(other) => Err(StoreError::Decode {
            collection,
            message: format!("entity did not serialize to an object: {other}"),
        }),
        Err(e) => Err(StoreError::Decode {
            collection,
            message: e.to_string(),
        }),
    }
}

/// Convert a stored record into an entity.
pub(crate) fn from_record<T: DeserializeOwned>(
    collection: Collection,
    record: Record,
) -> StoreResult<T> {
    serde_json::from_value(serde_json::Value::Object(record)).map_err(|e| StoreError::Decode {
        collection,
        message: e.to_string(),
    })
}

/// Convert a batch of stored records.
pub(crate) fn from_records<T: DeserializeOwned>(
    collection: Collection,
    records: Vec<Record>,
) -> StoreResult<Vec<T>> {
    records
        .into_iter()
        .map(|record| from_record(collection, record))
        .collect()
}

/// Every repository, built over one store.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// The store all repositories share.
    pub store: Arc<dyn RecordStore>,
    /// Cases.
    pub cases: CaseRepository,
    /// Identity profiles.
    pub profiles: ProfileRepository,
    /// Share grants.
    pub shares: ShareRepository,
    /// Pending invites.
    pub invites: InviteRepository,
    /// Access codes.
    pub access_codes: AccessCodeRepository,
    /// Case emails and events.
    pub content: CaseContentRepository,
    /// Audit log.
    pub audit: AuditLogRepository,
}

impl Repositories {
    /// Build every repository over `store`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            cases: CaseRepository::new(Arc::clone(&store)),
            profiles: ProfileRepository::new(Arc::clone(&store)),
            shares: ShareRepository::new(Arc::clone(&store)),
            invites: InviteRepository::new(Arc::clone(&store)),
            access_codes: AccessCodeRepository::new(Arc::clone(&store)),
            content: CaseContentRepository::new(Arc::clone(&store)),
            audit: AuditLogRepository::new(Arc::clone(&store)),
            store,
        }
    }
}
