//! PostgreSQL record store.
//!
//! Rows travel as JSON objects: reads select `to_jsonb(row)`, writes go
//! through `jsonb_populate_record`, so a single implementation covers every
//! collection. Field names are validated before being spliced into SQL;
//! values are always bound.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool};
use sqlx::query::Query as SqlxQuery;
use sqlx::{Postgres, Row};
use tracing::debug;

use casehub_core::traits::store::{RecordStore, StoreError, StoreResult};
use casehub_core::types::filter::{FilterOp, FilterValue};
use casehub_core::types::query::{Collection, Query, Record};

use super::{validate_identifier, validate_query};

/// [`RecordStore`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Render the `WHERE` clause for `query`, numbering parameters from `first_param`.
fn where_clause(query: &Query, first_param: usize) -> String {
    if query.filters.is_empty() {
        return String::new();
    }
    let conditions: Vec<String> = query
        .filters
        .iter()
        .enumerate()
        .map(|(i, filter)| {
            let param_idx = first_param + i;
            match filter.op {
                FilterOp::In => format!("{} = ANY(${param_idx})", filter.field),
                FilterOp::EqIgnoreCase => {
                    format!("LOWER({}) = LOWER(${param_idx})", filter.field)
                }
                op => format!("{} {} ${param_idx}", filter.field, op.as_sql()),
            }
        })
        .collect();
    format!(" WHERE {}", conditions.join(" AND "))
}

/// Render the `SELECT` statement for `query`.
fn select_sql(query: &Query) -> String {
    let table = query.collection.table_name();
    let mut sql = format!("SELECT to_jsonb(t) AS record FROM {table} t");
    sql.push_str(&where_clause(query, 1));
    if !query.order.is_empty() {
        let order: Vec<String> = query
            .order
            .iter()
            .map(|s| format!("{} {}", s.field, s.direction.as_sql()))
            .collect();
        sql.push_str(&format!(" ORDER BY {}", order.join(", ")));
    }
    if let Some(limit) = query.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    sql
}

/// Bind every filter value of `query`, in order.
fn bind_filters<'q>(
    mut sql: SqlxQuery<'q, Postgres, PgArguments>,
    query: &Query,
) -> SqlxQuery<'q, Postgres, PgArguments> {
    for filter in &query.filters {
        sql = match &filter.value {
            FilterValue::Uuid(id) => sql.bind(*id),
            FilterValue::UuidList(ids) => sql.bind(ids.clone()),
            FilterValue::Timestamp(ts) => sql.bind(*ts),
            FilterValue::Text(s) => sql.bind(s.clone()),
            FilterValue::Boolean(b) => sql.bind(*b),
            FilterValue::Integer(i) => sql.bind(*i),
        };
    }
    sql
}

/// Map a sqlx error onto the store taxonomy.
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_error) if db_error.code().as_deref() == Some("23505") => {
            StoreError::UniqueViolation {
                constraint: db_error.constraint().unwrap_or("unknown").to_string(),
            }
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

fn into_record(collection: Collection, value: serde_json::Value) -> StoreResult<Record> {
    match value {
        serde_json::Value::Object(record) => Ok(record),
        other => Err(StoreError::Decode {
            collection,
            message: format!("expected a JSON object, got {other}"),
        }),
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn fetch_all(&self, query: &Query) -> StoreResult<Vec<Record>> {
        validate_query(query)?;
        let sql = select_sql(query);
        debug!(collection = %query.collection, sql = %sql, "Fetching records");

        let rows = bind_filters(sqlx::query(&sql), query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(|row| {
                let value: serde_json::Value =
                    row.try_get("record").map_err(|e| StoreError::Decode {
                        collection: query.collection,
                        message: e.to_string(),
                    })?;
                into_record(query.collection, value)
            })
            .collect()
    }

    async fn insert(&self, collection: Collection, record: Record) -> StoreResult<Record> {
        let table = collection.table_name();
        let sql = format!(
            "INSERT INTO {table} SELECT * FROM jsonb_populate_record(NULL::{table}, $1) \
             RETURNING to_jsonb({table}.*) AS record"
        );

        let row = sqlx::query(&sql)
            .bind(serde_json::Value::Object(record))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let value: serde_json::Value = row.try_get("record").map_err(|e| StoreError::Decode {
            collection,
            message: e.to_string(),
        })?;
        into_record(collection, value)
    }

    async fn update(&self, query: &Query, changes: Record) -> StoreResult<u64> {
        validate_query(query)?;
        if changes.is_empty() {
            return Ok(0);
        }
        for column in changes.keys() {
            validate_identifier(column)?;
        }

        let table = query.collection.table_name();
        let assignments: Vec<String> = changes
            .keys()
            .map(|column| {
                format!(
                    "{column} = (SELECT {column} FROM jsonb_populate_record(NULL::{table}, $1))"
                )
            })
            .collect();
        let sql = format!(
            "UPDATE {table} SET {}{}",
            assignments.join(", "),
            where_clause(query, 2)
        );

        let sql_query = sqlx::query(&sql).bind(serde_json::Value::Object(changes));
        let result = bind_filters(sql_query, query)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, query: &Query) -> StoreResult<u64> {
        validate_query(query)?;
        let sql = format!(
            "DELETE FROM {}{}",
            query.collection.table_name(),
            where_clause(query, 1)
        );

        let result = bind_filters(sqlx::query(&sql), query)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> StoreResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(map_sqlx_error)
    }
}
