//! [`RecordStore`](casehub_core::traits::RecordStore) backends.

pub mod memory;
pub mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

use casehub_core::traits::store::{StoreError, StoreResult};
use casehub_core::types::query::{Collection, Query};

/// Unique constraints enforced on each collection, as `(name, columns)`.
///
/// The in-memory backend enforces these directly; the PostgreSQL schema
/// declares the same names so violations read identically from both.
pub fn unique_constraints(collection: Collection) -> &'static [(&'static str, &'static [&'static str])] {
    match collection {
        Collection::Cases => &[("cases_pkey", &["id"])],
        Collection::Profiles => &[
            ("profiles_pkey", &["id"]),
            ("profiles_email_key", &["email"]),
        ],
        Collection::Shares => &[
            ("case_shares_pkey", &["id"]),
            ("case_shares_case_user_key", &["case_id", "user_id"]),
        ],
        Collection::Invites => &[
            ("case_invites_pkey", &["id"]),
            ("case_invites_case_email_key", &["case_id", "email"]),
            ("case_invites_token_key", &["token"]),
        ],
        Collection::AccessCodes => &[("access_codes_pkey", &["code"])],
        Collection::CaseEmails => &[("case_emails_pkey", &["id"])],
        Collection::CaseEvents => &[("case_events_pkey", &["id"])],
        Collection::AuditLog => &[("audit_log_pkey", &["id"])],
    }
}

/// Reject field names that are not plain lower-case identifiers.
pub(crate) fn validate_identifier(name: &str) -> StoreResult<()> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::Backend(format!("invalid field name: {name:?}")))
    }
}

/// Validate every field a query references.
pub(crate) fn validate_query(query: &Query) -> StoreResult<()> {
    query.referenced_fields().try_for_each(validate_identifier)
}
