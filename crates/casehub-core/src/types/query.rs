//! Immutable data-access descriptions.
//!
//! Every read, update, and delete against the store is described by a
//! [`Query`] value built once and passed by reference. Store backends
//! translate the description (SQL for Postgres, predicate evaluation for
//! the in-memory store); nothing mutates a query after construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::filter::FilterField;
use super::sorting::SortField;

/// A stored row: a JSON object keyed by column name.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The named record collections this subsystem reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Case records (owned by the case CRUD system).
    Cases,
    /// Identity profiles (owned by the identity system).
    Profiles,
    /// Share grants.
    Shares,
    /// Pending invites.
    Invites,
    /// Anonymous access codes.
    AccessCodes,
    /// Emails attached to cases.
    CaseEmails,
    /// Timeline events attached to cases.
    CaseEvents,
    /// Append-only audit log.
    AuditLog,
}

impl Collection {
    /// Every collection, in migration order.
    pub const ALL: [Collection; 8] = [
        Self::Profiles,
        Self::Cases,
        Self::Shares,
        Self::Invites,
        Self::AccessCodes,
        Self::CaseEmails,
        Self::CaseEvents,
        Self::AuditLog,
    ];

    /// The backing table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Profiles => "profiles",
            Self::Shares => "case_shares",
            Self::Invites => "case_invites",
            Self::AccessCodes => "access_codes",
            Self::CaseEmails => "case_emails",
            Self::CaseEvents => "case_events",
            Self::AuditLog => "audit_log",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// A complete description of which rows of a collection an operation touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Target collection.
    pub collection: Collection,
    /// Conjunctive filter conditions.
    pub filters: Vec<FilterField>,
    /// Ordering, applied in sequence.
    pub order: Vec<SortField>,
    /// Maximum number of rows to return.
    pub limit: Option<u64>,
}

impl Query {
    /// Describe the rows of `collection` matching every filter.
    pub fn new(collection: Collection, filters: Vec<FilterField>) -> Self {
        Self {
            collection,
            filters,
            order: Vec::new(),
            limit: None,
        }
    }

    /// Describe every row of `collection`.
    pub fn all(collection: Collection) -> Self {
        Self::new(collection, Vec::new())
    }

    /// Return this description with an ordering attached.
    pub fn ordered_by(self, sort: SortField) -> Self {
        let mut order = self.order;
        order.push(sort);
        Self { order, ..self }
    }

    /// Return this description capped at `limit` rows.
    pub fn limited_to(self, limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }

    /// Field names referenced by filters and ordering.
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.filters
            .iter()
            .map(|f| f.field.as_str())
            .chain(self.order.iter().map(|s| s.field.as_str()))
    }
}
