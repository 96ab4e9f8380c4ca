//! # casehub-core
//!
//! Core crate for CaseHub sharing. Contains the persistence trait and its
//! immutable query descriptions, configuration schemas, typed identifiers,
//! share domain events, the `Outcome` result type, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other CaseHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ConflictReason, ErrorKind, ShareError};
pub use result::AppResult;
pub use types::outcome::Outcome;
