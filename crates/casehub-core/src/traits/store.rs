//! Persistence collaborator trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::query::{Collection, Query, Record};

/// Failure reported by a [`RecordStore`].
///
/// Uniqueness violations are reported separately from every other backend
/// failure: invite redemption depends on telling them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An insert or update collided with a unique constraint.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Name of the violated constraint.
        constraint: String,
    },
    /// A single-row read matched no rows.
    #[error("no row in {0}")]
    RowNotFound(Collection),
    /// A stored row could not be decoded into the requested shape.
    #[error("failed to decode {collection} row: {message}")]
    Decode {
        /// Collection the row came from.
        collection: Collection,
        /// Decoder message.
        message: String,
    },
    /// Any other backend failure (connection, timeout, SQL error).
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this is a uniqueness-constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Generic accessor over named record collections.
///
/// Implementations hold no per-call state: every call is fully described by
/// its arguments, so a single `Arc<dyn RecordStore>` is shared by all
/// concurrently running requests.
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return every row matching the query, in the query's order.
    async fn fetch_all(&self, query: &Query) -> StoreResult<Vec<Record>>;

    /// Return the first matching row, if any.
    async fn fetch_optional(&self, query: &Query) -> StoreResult<Option<Record>> {
        let limited = query.clone().limited_to(1);
        Ok(self.fetch_all(&limited).await?.into_iter().next())
    }

    /// Return exactly one matching row, or [`StoreError::RowNotFound`].
    async fn fetch_one(&self, query: &Query) -> StoreResult<Record> {
        self.fetch_optional(query)
            .await?
            .ok_or(StoreError::RowNotFound(query.collection))
    }

    /// Insert a row and return it as stored.
    async fn insert(&self, collection: Collection, record: Record) -> StoreResult<Record>;

    /// Overwrite the given columns on every matching row. Returns rows affected.
    async fn update(&self, query: &Query, changes: Record) -> StoreResult<u64>;

    /// Delete every matching row. Returns rows affected.
    async fn delete(&self, query: &Query) -> StoreResult<u64>;

    /// Check backend connectivity.
    async fn health_check(&self) -> StoreResult<bool>;
}
