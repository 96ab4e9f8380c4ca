//! In-memory record store.
//!
//! Each collection is a `Vec<Record>` inside a [`DashMap`] entry. Writes
//! hold the entry's shard lock for the whole check-then-mutate step, so
//! unique constraints hold under concurrent inserts the same way they do
//! in PostgreSQL.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use casehub_core::traits::store::{RecordStore, StoreError, StoreResult};
use casehub_core::types::filter::{FilterField, FilterOp, FilterValue};
use casehub_core::types::query::{Collection, Query, Record};
use casehub_core::types::sorting::SortDirection;

use super::{unique_constraints, validate_identifier, validate_query};

/// Process-local [`RecordStore`].
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    collections: DashMap<Collection, Vec<Record>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held in `collection`.
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .get(&collection)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }

    /// Whether `collection` holds no rows.
    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }
}

/// Parse a JSON string as an RFC 3339 timestamp.
fn as_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|ts| ts.with_timezone(&Utc))
}

fn as_uuid(value: &Value) -> Option<Uuid> {
    value.as_str().and_then(|s| Uuid::parse_str(s).ok())
}

/// Compare a stored field against a scalar filter value.
fn compare_to(field: &Value, value: &FilterValue) -> Option<Ordering> {
    match value {
        FilterValue::Uuid(id) => as_uuid(field).map(|f| f.cmp(id)),
        FilterValue::Timestamp(ts) => as_timestamp(field).map(|f| f.cmp(ts)),
        FilterValue::Text(s) => field.as_str().map(|f| f.cmp(s.as_str())),
        FilterValue::Boolean(b) => field.as_bool().map(|f| f.cmp(b)),
        FilterValue::Integer(i) => field.as_i64().map(|f| f.cmp(i)),
        FilterValue::UuidList(_) => None,
    }
}

/// Evaluate one filter against a record. Missing and null fields never match.
fn matches_filter(record: &Record, filter: &FilterField) -> bool {
    let Some(field) = record.get(&filter.field).filter(|v| !v.is_null()) else {
        return false;
    };

    if filter.op == FilterOp::In {
        return match (&filter.value, as_uuid(field)) {
            (FilterValue::UuidList(ids), Some(id)) => ids.contains(&id),
            _ => false,
        };
    }

    if filter.op == FilterOp::EqIgnoreCase {
        return match (&filter.value, field.as_str()) {
            (FilterValue::Text(s), Some(f)) => f.to_lowercase() == s.to_lowercase(),
            _ => false,
        };
    }

    let Some(ordering) = compare_to(field, &filter.value) else {
        return false;
    };
    match filter.op {
        FilterOp::Eq => ordering == Ordering::Equal,
        FilterOp::EqIgnoreCase => false,
        FilterOp::Ne => ordering != Ordering::Equal,
        FilterOp::Gt => ordering == Ordering::Greater,
        FilterOp::Gte => ordering != Ordering::Less,
        FilterOp::Lt => ordering == Ordering::Less,
        FilterOp::Lte => ordering != Ordering::Greater,
        FilterOp::In => false,
    }
}

fn matches_query(record: &Record, query: &Query) -> bool {
    query.filters.iter().all(|filter| matches_filter(record, filter))
}

/// Order two stored values. Nulls sort after everything else.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            if let (Some(ta), Some(tb)) = (as_timestamp(a), as_timestamp(b)) {
                return ta.cmp(&tb);
            }
            match (a, b) {
                (Value::String(a), Value::String(b)) => a.cmp(b),
                (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
                (Value::Number(a), Value::Number(b)) => a
                    .as_f64()
                    .partial_cmp(&b.as_f64())
                    .unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            }
        }
    }
}

/// Find the first unique constraint `candidate` would violate among `rows`.
///
/// `skip` excludes the row being replaced during an update.
fn violated_constraint(
    collection: Collection,
    rows: &[Record],
    candidate: &Record,
    skip: Option<usize>,
) -> Option<&'static str> {
    unique_constraints(collection)
        .iter()
        .find(|(_, columns)| {
            rows.iter().enumerate().any(|(idx, row)| {
                Some(idx) != skip
                    && columns.iter().all(|column| {
                        let value = candidate.get(*column).filter(|v| !v.is_null());
                        value.is_some() && row.get(*column) == value
                    })
            })
        })
        .map(|(name, _)| *name)
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn fetch_all(&self, query: &Query) -> StoreResult<Vec<Record>> {
        validate_query(query)?;
        let Some(rows) = self.collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<Record> = rows
            .iter()
            .filter(|row| matches_query(row, query))
            .cloned()
            .collect();
        drop(rows);

        if !query.order.is_empty() {
            matched.sort_by(|a, b| {
                query
                    .order
                    .iter()
                    .map(|sort| {
                        let ordering = compare_values(a.get(&sort.field), b.get(&sort.field));
                        match sort.direction {
                            SortDirection::Asc => ordering,
                            SortDirection::Desc => ordering.reverse(),
                        }
                    })
                    .find(|ordering| *ordering != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }
        if let Some(limit) = query.limit {
            matched.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(matched)
    }

    async fn insert(&self, collection: Collection, record: Record) -> StoreResult<Record> {
        let mut rows = self.collections.entry(collection).or_default();
        if let Some(constraint) = violated_constraint(collection, &rows, &record, None) {
            debug!(collection = %collection, constraint, "Rejected insert on unique constraint");
            return Err(StoreError::UniqueViolation {
                constraint: constraint.to_string(),
            });
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn update(&self, query: &Query, changes: Record) -> StoreResult<u64> {
        validate_query(query)?;
        for column in changes.keys() {
            validate_identifier(column)?;
        }
        let Some(mut rows) = self.collections.get_mut(&query.collection) else {
            return Ok(0);
        };

        let mut updated = Vec::new();
        for (idx, row) in rows.iter().enumerate() {
            if !matches_query(row, query) {
                continue;
            }
            let mut next = row.clone();
            for (column, value) in &changes {
                next.insert(column.clone(), value.clone());
            }
            if let Some(constraint) = violated_constraint(query.collection, &rows, &next, Some(idx))
            {
                return Err(StoreError::UniqueViolation {
                    constraint: constraint.to_string(),
                });
            }
            updated.push((idx, next));
        }

        let affected = updated.len() as u64;
        for (idx, next) in updated {
            rows[idx] = next;
        }
        Ok(affected)
    }

    async fn delete(&self, query: &Query) -> StoreResult<u64> {
        validate_query(query)?;
        let Some(mut rows) = self.collections.get_mut(&query.collection) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| !matches_query(row, query));
        Ok((before - rows.len()) as u64)
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casehub_core::types::sorting::SortField;
    use chrono::Duration;
    use serde_json::json;
    use std::sync::Arc;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn share_row(case_id: Uuid, user_id: Uuid) -> Record {
        record(json!({
            "id": Uuid::new_v4(),
            "case_id": case_id,
            "user_id": user_id,
            "can_view": true,
            "can_edit": false,
            "created_at": Utc::now(),
        }))
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let store = MemoryRecordStore::new();
        let case_id = Uuid::new_v4();
        store
            .insert(Collection::Shares, share_row(case_id, Uuid::new_v4()))
            .await
            .expect("insert");

        let rows = store
            .fetch_all(&Query::new(
                Collection::Shares,
                vec![FilterField::eq("case_id", case_id)],
            ))
            .await
            .expect("fetch");
        assert_eq!(rows.len(), 1);

        let other = store
            .fetch_all(&Query::new(
                Collection::Shares,
                vec![FilterField::eq("case_id", Uuid::new_v4())],
            ))
            .await
            .expect("fetch");
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_unique_pair_rejected() {
        let store = MemoryRecordStore::new();
        let (case_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());
        store
            .insert(Collection::Shares, share_row(case_id, user_id))
            .await
            .expect("first insert");

        let err = store
            .insert(Collection::Shares, share_row(case_id, user_id))
            .await
            .expect_err("duplicate pair");
        assert_eq!(
            err,
            StoreError::UniqueViolation {
                constraint: "case_shares_case_user_key".to_string()
            }
        );
        assert_eq!(store.len(Collection::Shares), 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_of_same_pair() {
        let store = Arc::new(MemoryRecordStore::new());
        let (case_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .insert(Collection::Shares, share_row(case_id, user_id))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.expect("join").is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(store.len(Collection::Shares), 1);
    }

    #[tokio::test]
    async fn test_timestamp_filters_and_ordering() {
        let store = MemoryRecordStore::new();
        let case_id = Uuid::new_v4();
        let now = Utc::now();
        for (token, offset) in [("a", -1), ("b", 1), ("c", 2)] {
            store
                .insert(
                    Collection::Invites,
                    record(json!({
                        "id": Uuid::new_v4(),
                        "case_id": case_id,
                        "email": format!("{token}@x.com"),
                        "token": token,
                        "expires_at": now + Duration::hours(offset),
                    })),
                )
                .await
                .expect("insert");
        }

        let pending = store
            .fetch_all(
                &Query::new(
                    Collection::Invites,
                    vec![FilterField::gt("expires_at", now)],
                )
                .ordered_by(SortField::desc("expires_at")),
            )
            .await
            .expect("fetch");
        let tokens: Vec<&str> = pending
            .iter()
            .filter_map(|r| r.get("token").and_then(Value::as_str))
            .collect();
        assert_eq!(tokens, vec!["c", "b"]);

        let removed = store
            .delete(&Query::new(
                Collection::Invites,
                vec![FilterField::lte("expires_at", now)],
            ))
            .await
            .expect("delete");
        assert_eq!(removed, 1);
    }

    #[tokio::test]
    async fn test_in_filter() {
        let store = MemoryRecordStore::new();
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        for (i, id) in ids.iter().enumerate() {
            store
                .insert(
                    Collection::Profiles,
                    record(json!({ "id": id, "email": format!("u{i}@x.com") })),
                )
                .await
                .expect("insert");
        }

        let rows = store
            .fetch_all(&Query::new(
                Collection::Profiles,
                vec![FilterField::is_in("id", vec![ids[0], ids[2]])],
            ))
            .await
            .expect("fetch");
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_eq_ignore_case_filter() {
        let store = MemoryRecordStore::new();
        store
            .insert(
                Collection::Profiles,
                record(json!({ "id": Uuid::new_v4(), "email": "Alice@Example.com" })),
            )
            .await
            .expect("insert");

        let exact = store
            .fetch_all(&Query::new(
                Collection::Profiles,
                vec![FilterField::eq("email", "alice@example.com")],
            ))
            .await
            .expect("fetch");
        assert!(exact.is_empty());

        let folded = store
            .fetch_all(&Query::new(
                Collection::Profiles,
                vec![FilterField::eq_ignore_case("email", "alice@example.com")],
            ))
            .await
            .expect("fetch");
        assert_eq!(folded.len(), 1);
    }

    #[tokio::test]
    async fn test_update_overwrites_columns() {
        let store = MemoryRecordStore::new();
        let (case_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());
        store
            .insert(Collection::Shares, share_row(case_id, user_id))
            .await
            .expect("insert");

        let query = Query::new(
            Collection::Shares,
            vec![
                FilterField::eq("case_id", case_id),
                FilterField::eq("user_id", user_id),
            ],
        );
        let affected = store
            .update(&query, record(json!({ "can_edit": true, "can_view": false })))
            .await
            .expect("update");
        assert_eq!(affected, 1);

        let row = store.fetch_one(&query).await.expect("fetch");
        assert_eq!(row["can_edit"], true);
        assert_eq!(row["can_view"], false);
    }

    #[tokio::test]
    async fn test_fetch_one_missing() {
        let store = MemoryRecordStore::new();
        let err = store
            .fetch_one(&Query::all(Collection::Cases))
            .await
            .expect_err("empty");
        assert_eq!(err, StoreError::RowNotFound(Collection::Cases));
    }
}
