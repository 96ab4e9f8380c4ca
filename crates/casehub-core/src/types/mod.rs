//! Core type definitions used across the CaseHub workspace.

pub mod filter;
pub mod id;
pub mod outcome;
pub mod query;
pub mod sorting;

pub use filter::{FilterField, FilterOp, FilterValue};
pub use id::*;
pub use outcome::Outcome;
pub use query::{Collection, Query, Record};
pub use sorting::{SortDirection, SortField};
