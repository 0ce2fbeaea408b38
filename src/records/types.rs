//! Record traits and field extraction helpers
//!
//! Every roster item arrives as `{"data": {...}}`. The helpers here pull
//! fields out by fixed dotted key paths and never fail: a missing or
//! non-scalar value simply yields `None` (or an empty list).

use crate::http::Endpoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provider name stamped on every record produced by this crate
pub const PROVIDER: &str = "clever";

/// Which source field a student's username is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsernameSource {
    /// `data.sis_id`
    SisId,
    /// `data.email`
    Email,
    /// `data.credentials.district_username`
    DistrictUsername,
}

impl UsernameSource {
    /// Key path of the source field inside the item payload
    pub fn path(self) -> &'static str {
        match self {
            Self::SisId => "sis_id",
            Self::Email => "email",
            Self::DistrictUsername => "credentials.district_username",
        }
    }
}

impl std::str::FromStr for UsernameSource {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sis_id" => Ok(Self::SisId),
            "email" => Ok(Self::Email),
            "district_username" => Ok(Self::DistrictUsername),
            other => Err(crate::error::Error::config(format!(
                "Unknown username source: {other}"
            ))),
        }
    }
}

/// Settings that influence how raw items become records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordContext {
    /// Username source for students; `None` uses the priority order
    pub username_source: Option<UsernameSource>,
}

impl RecordContext {
    /// Create a context with the given username source
    pub fn with_username_source(source: Option<UsernameSource>) -> Self {
        Self {
            username_source: source,
        }
    }
}

/// A roster record listed by one of the paginated endpoints
pub trait Record: Sized + Send {
    /// Endpoint that lists this kind of record
    const ENDPOINT: Endpoint;

    /// Build the record from one raw item. Never fails.
    fn from_item(item: &Value, ctx: &RecordContext) -> Self;

    /// Record uid (empty when the payload carried none)
    fn uid(&self) -> &str;
}

/// Unwrap the `data` envelope of an item, or return the item itself
pub(crate) fn payload(item: &Value) -> &Value {
    match item.get("data") {
        Some(data) if data.is_object() => data,
        _ => item,
    }
}

/// Walk a dotted key path like `"name.first"`
pub(crate) fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Extract a scalar at `path` as a string. Empty strings are kept.
pub(crate) fn extract_string(value: &Value, path: &str) -> Option<String> {
    extract_path(value, path).and_then(scalar_to_string)
}

/// Extract an array of scalars at `path`; anything else yields an empty list
pub(crate) fn extract_string_list(value: &Value, path: &str) -> Vec<String> {
    match extract_path(value, path) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        _ => Vec::new(),
    }
}
