//! # casehub-entity
//!
//! Domain entity models for CaseHub sharing. Every struct in this crate
//! represents a stored row or a caller-facing value object. Stored rows
//! derive `Serialize`/`Deserialize`; their serialized field names are the
//! column names the store reads and writes.

pub mod access;
pub mod audit;
pub mod case;
pub mod invite;
pub mod share;
pub mod user;
