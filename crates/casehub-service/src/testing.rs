//! Fixtures and store wrappers for service tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;

use casehub_auth::{Actor, AuthorizationGuard};
use casehub_core::traits::store::{RecordStore, StoreError, StoreResult};
use casehub_core::types::query::{Collection, Query, Record};
use casehub_database::repositories::Repositories;
use casehub_database::store::MemoryRecordStore;
use casehub_entity::case::Case;
use casehub_entity::user::Profile;

use crate::access::AccessCodeGateway;
use crate::audit::AuditRecorder;
use crate::controller::ShareController;
use crate::invite::InviteLedger;
use crate::share::ShareRegistry;

/// Store operation kinds a [`FlakyStore`] can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Fetch,
    Insert,
    Update,
    Delete,
}

/// Delegates to a memory store, failing selected operations on demand.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryRecordStore,
    failing: Mutex<HashSet<(Op, Collection)>>,
}

impl FlakyStore {
    pub fn fail(&self, op: Op, collection: Collection) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert((op, collection));
        }
    }

    fn check(&self, op: Op, collection: Collection) -> StoreResult<()> {
        let failing = self
            .failing
            .lock()
            .map(|f| f.contains(&(op, collection)))
            .unwrap_or(false);
        if failing {
            Err(StoreError::Backend(format!("injected {op:?} failure on {collection}")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn fetch_all(&self, query: &Query) -> StoreResult<Vec<Record>> {
        self.check(Op::Fetch, query.collection)?;
        self.inner.fetch_all(query).await
    }

    async fn insert(&self, collection: Collection, record: Record) -> StoreResult<Record> {
        self.check(Op::Insert, collection)?;
        self.inner.insert(collection, record).await
    }

    async fn update(&self, query: &Query, changes: Record) -> StoreResult<u64> {
        self.check(Op::Update, query.collection)?;
        self.inner.update(query, changes).await
    }

    async fn delete(&self, query: &Query) -> StoreResult<u64> {
        self.check(Op::Delete, query.collection)?;
        self.inner.delete(query).await
    }

    async fn health_check(&self) -> StoreResult<bool> {
        self.inner.health_check().await
    }
}

/// Yields to the scheduler around every call so that concurrently polled
/// operations interleave step by step.
#[derive(Debug, Default)]
pub struct YieldingStore {
    inner: MemoryRecordStore,
}

#[async_trait]
impl RecordStore for YieldingStore {
    async fn fetch_all(&self, query: &Query) -> StoreResult<Vec<Record>> {
        tokio::task::yield_now().await;
        let rows = self.inner.fetch_all(query).await;
        tokio::task::yield_now().await;
        rows
    }

    async fn insert(&self, collection: Collection, record: Record) -> StoreResult<Record> {
        tokio::task::yield_now().await;
        let row = self.inner.insert(collection, record).await;
        tokio::task::yield_now().await;
        row
    }

    async fn update(&self, query: &Query, changes: Record) -> StoreResult<u64> {
        tokio::task::yield_now().await;
        self.inner.update(query, changes).await
    }

    async fn delete(&self, query: &Query) -> StoreResult<u64> {
        tokio::task::yield_now().await;
        let affected = self.inner.delete(query).await;
        tokio::task::yield_now().await;
        affected
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(true)
    }
}

/// An owner, a case they own, and services over one store.
pub struct Fixture {
    pub repos: Repositories,
    pub owner: Actor,
    pub case: Case,
}

impl Fixture {
    /// Build a fixture over an arbitrary store.
    pub async fn with_store(store: Arc<dyn RecordStore>) -> Self {
        let repos = Repositories::new(store);
        let profile = repos
            .profiles
            .create(&Profile::new("owner@example.com", Some("Owner".to_string())))
            .await
            .expect("owner profile");
        let case = repos
            .cases
            .create(&Case::new(profile.id, "Water damage claim"))
            .await
            .expect("case");

        Self {
            repos,
            owner: Actor::new(profile.id, profile.email),
            case,
        }
    }

    /// Build a fixture over a fresh memory store.
    pub async fn new() -> Self {
        Self::with_store(Arc::new(MemoryRecordStore::new())).await
    }

    /// Register an identity and return it as an actor.
    pub async fn register(&self, email: &str) -> Actor {
        let profile = self
            .repos
            .profiles
            .create(&Profile::new(email, None))
            .await
            .expect("profile");
        Actor::new(profile.id, profile.email)
    }

    /// Register an identity whose stored email keeps its original letter case.
    pub async fn register_verbatim(&self, email: &str) -> Actor {
        let mut profile = Profile::new(email, None);
        profile.email = email.to_string();
        let profile = self.repos.profiles.create(&profile).await.expect("profile");
        Actor::new(profile.id, profile.email)
    }

    pub fn guard(&self) -> AuthorizationGuard {
        AuthorizationGuard::new(self.repos.cases.clone())
    }

    pub fn registry(&self) -> ShareRegistry {
        ShareRegistry::new(
            self.guard(),
            Arc::new(self.repos.profiles.clone()),
            self.repos.shares.clone(),
        )
    }

    pub fn ledger(&self) -> InviteLedger {
        InviteLedger::new(
            self.guard(),
            Arc::new(self.repos.profiles.clone()),
            self.repos.invites.clone(),
            self.repos.shares.clone(),
            self.repos.cases.clone(),
            Duration::days(7),
        )
    }

    pub fn gateway(&self) -> AccessCodeGateway {
        AccessCodeGateway::new(
            self.guard(),
            self.repos.access_codes.clone(),
            self.repos.cases.clone(),
            self.repos.content.clone(),
            5,
        )
    }

    pub fn controller(&self) -> ShareController {
        ShareController::new(
            self.registry(),
            self.ledger(),
            self.gateway(),
            AuditRecorder::new(Arc::new(self.repos.audit.clone())),
        )
    }

    /// Number of rows in `collection`.
    pub async fn count(&self, collection: Collection) -> usize {
        self.repos
            .store
            .fetch_all(&Query::all(collection))
            .await
            .expect("count")
            .len()
    }
}

/// Let spawned tasks on the current-thread runtime run to completion.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
