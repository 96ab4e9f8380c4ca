//! Identity lookup collaborator.

use async_trait::async_trait;

use casehub_core::traits::store::StoreResult;
use casehub_core::types::id::UserId;
use casehub_database::repositories::ProfileRepository;
use casehub_entity::user::Profile;

/// Resolves registered identities.
#[async_trait]
pub trait IdentityDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Find the identity registered under a normalized email.
    async fn lookup_by_email(&self, email: &str) -> StoreResult<Option<Profile>>;

    /// Fetch the profiles of several identities at once.
    async fn profiles(&self, ids: &[UserId]) -> StoreResult<Vec<Profile>>;
}

#[async_trait]
impl IdentityDirectory for ProfileRepository {
    async fn lookup_by_email(&self, email: &str) -> StoreResult<Option<Profile>> {
        self.find_by_email(email).await
    }

    async fn profiles(&self, ids: &[UserId]) -> StoreResult<Vec<Profile>> {
        self.find_by_ids(ids).await
    }
}
