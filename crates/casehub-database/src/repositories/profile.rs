//! Profile repository implementation.

use std::sync::Arc;

use casehub_core::traits::store::{RecordStore, StoreResult};
use casehub_core::types::filter::FilterField;
use casehub_core::types::id::UserId;
use casehub_core::types::query::{Collection, Query};
use casehub_entity::user::Profile;

use super::{from_record, from_records, to_record};

/// Repository for identity profile lookups.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    store: Arc<dyn RecordStore>,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Find a profile by ID.
    pub async fn find_by_id(&self, id: UserId) -> StoreResult<Option<Profile>> {
        let query = Query::new(
            Collection::Profiles,
            vec![FilterField::eq("id", id.into_uuid())],
        );
        self.store
            .fetch_optional(&query)
            .await?
            .map(|record| from_record(Collection::Profiles, record))
            .transpose()
    }

    /// Find a profile by email, ignoring letter case on both sides.
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<Profile>> {
        let query = Query::new(
            Collection::Profiles,
            vec![FilterField::eq_ignore_case("email", email)],
        );
        self.store
            .fetch_optional(&query)
            .await?
            .map(|record| from_record(Collection::Profiles, record))
            .transpose()
    }

    /// Fetch every profile whose ID is in `ids`, in one query.
    pub async fn find_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<Profile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = Query::new(
            Collection::Profiles,
            vec![FilterField::is_in(
                "id",
                ids.iter().map(|id| id.into_uuid()).collect(),
            )],
        );
        from_records(Collection::Profiles, self.store.fetch_all(&query).await?)
    }

    /// Insert a profile.
    pub async fn create(&self, profile: &Profile) -> StoreResult<Profile> {
        let record = self
            .store
            .insert(Collection::Profiles, to_record(Collection::Profiles, profile)?)
            .await?;
        from_record(Collection::Profiles, record)
    }
}
