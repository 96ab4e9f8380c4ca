//! Filter conditions carried by immutable [`Query`](super::query::Query)
//! descriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Text equality ignoring letter case.
    EqIgnoreCase,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// List membership (SQL `= ANY`).
    In,
}

impl FilterOp {
    /// Return the SQL operator for scalar comparisons.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq | Self::EqIgnoreCase => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::In => "= ANY",
        }
    }
}

/// A typed filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A UUID value (all identifiers).
    Uuid(Uuid),
    /// A list of UUIDs (for the `In` operator).
    UuidList(Vec<Uuid>),
    /// A timestamp value.
    Timestamp(DateTime<Utc>),
    /// A string value.
    Text(String),
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i64),
}

impl FilterValue {
    /// The JSON form this value takes inside a stored record.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Uuid(id) => Value::String(id.to_string()),
            Self::UuidList(ids) => {
                Value::Array(ids.iter().map(|id| Value::String(id.to_string())).collect())
            }
            Self::Timestamp(ts) => serde_json::to_value(ts).unwrap_or(Value::Null),
            Self::Text(s) => Value::String(s.clone()),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
        }
    }
}

impl From<Uuid> for FilterValue {
    fn from(id: Uuid) -> Self {
        Self::Uuid(id)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column or field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    /// Shorthand for a case-insensitive text equality filter.
    pub fn eq_ignore_case(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::EqIgnoreCase, FilterValue::Text(value.into()))
    }

    /// Shorthand for a strictly-greater-than filter.
    pub fn gt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Gt, value)
    }

    /// Shorthand for a less-than-or-equal filter.
    pub fn lte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Lte, value)
    }

    /// Shorthand for a list-membership filter.
    pub fn is_in(field: impl Into<String>, ids: Vec<Uuid>) -> Self {
        Self::new(field, FilterOp::In, FilterValue::UuidList(ids))
    }
}
