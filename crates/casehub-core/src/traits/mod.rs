//! Core traits defined in `casehub-core` and implemented by other crates.

pub mod store;

pub use store::{RecordStore, StoreError, StoreResult};
