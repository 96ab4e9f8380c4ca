//! # casehub-database
//!
//! Record store backends (PostgreSQL and in-memory) and the typed
//! repositories the sharing services read and write through.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::Repositories;
pub use store::{MemoryRecordStore, PgRecordStore};
