//! Records fetched directly from the roster API
//!
//! Field order in each struct is the serialization order and must stay
//! fixed: downstream consumers read these as flat hashes.

use super::types::{
    extract_string, extract_string_list, payload, Record, RecordContext, UsernameSource,
    PROVIDER,
};
use crate::http::Endpoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Token
// ============================================================================

/// Owner of a district token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOwner {
    /// Owner type (normally "district")
    #[serde(rename = "type")]
    pub owner_type: Option<String>,
    /// Owner id, matched against the configured app id
    pub id: Option<String>,
}

/// District-scoped bearer token returned by the token endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Who the token was issued to
    pub owner: TokenOwner,
    /// Bearer token value
    pub access_token: Option<String>,
    /// Granted scopes
    pub scopes: Vec<String>,
    /// Issue time, when the payload carries a parseable one
    pub created: Option<DateTime<Utc>>,
}

impl Token {
    /// Build a token from one item of the token listing
    pub fn from_item(item: &Value) -> Self {
        let data = payload(item);
        Self {
            owner: TokenOwner {
                owner_type: extract_string(data, "owner.type"),
                id: extract_string(data, "owner.id"),
            },
            access_token: extract_string(data, "access_token"),
            scopes: extract_string_list(data, "scopes"),
            created: extract_string(data, "created")
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Whether this token belongs to the given owner id
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner.id.as_deref() == Some(owner_id)
    }
}

// ============================================================================
// Student
// ============================================================================

/// A student
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Student id
    pub uid: String,
    /// `name.first`
    pub first_name: Option<String>,
    /// `name.last`
    pub last_name: Option<String>,
    /// Taken from the configured username source
    pub username: Option<String>,
    /// Always `"clever"`
    pub provider: String,
}

impl Student {
    /// Pick the username from the configured source.
    ///
    /// An explicit source always reads that field, present or not. With no
    /// source configured the first present one of `sis_id`, `email`,
    /// `credentials.district_username` wins, even when it is empty.
    pub fn select_username(data: &Value, source: Option<UsernameSource>) -> Option<String> {
        match source {
            Some(source) => extract_string(data, source.path()),
            None => [
                UsernameSource::SisId,
                UsernameSource::Email,
                UsernameSource::DistrictUsername,
            ]
            .into_iter()
            .find_map(|source| extract_string(data, source.path())),
        }
    }
}

impl Record for Student {
    const ENDPOINT: Endpoint = Endpoint::Students;

    fn from_item(item: &Value, ctx: &RecordContext) -> Self {
        let data = payload(item);
        Self {
            uid: extract_string(data, "id").unwrap_or_default(),
            first_name: extract_string(data, "name.first"),
            last_name: extract_string(data, "name.last"),
            username: Self::select_username(data, ctx.username_source),
            provider: PROVIDER.to_string(),
        }
    }

    fn uid(&self) -> &str {
        &self.uid
    }
}

// ============================================================================
// Teacher
// ============================================================================

/// A teacher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Teacher id
    pub uid: String,
    /// Contact email
    pub email: Option<String>,
    /// `name.first`
    pub first_name: Option<String>,
    /// `name.last`
    pub last_name: Option<String>,
    /// Always `"clever"`
    pub provider: String,
}

impl Record for Teacher {
    const ENDPOINT: Endpoint = Endpoint::Teachers;

    fn from_item(item: &Value, _ctx: &RecordContext) -> Self {
        let data = payload(item);
        Self {
            uid: extract_string(data, "id").unwrap_or_default(),
            email: extract_string(data, "email"),
            first_name: extract_string(data, "name.first"),
            last_name: extract_string(data, "name.last"),
            provider: PROVIDER.to_string(),
        }
    }

    fn uid(&self) -> &str {
        &self.uid
    }
}

// ============================================================================
// Course
// ============================================================================

/// A course (catalog entry a section belongs to)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course id
    pub uid: String,
    /// Owning district id
    pub district: Option<String>,
    /// Course name
    pub name: Option<String>,
    /// Catalog number, copied onto classrooms
    pub number: Option<String>,
}

impl Record for Course {
    const ENDPOINT: Endpoint = Endpoint::Courses;

    fn from_item(item: &Value, _ctx: &RecordContext) -> Self {
        let data = payload(item);
        Self {
            uid: extract_string(data, "id").unwrap_or_default(),
            district: extract_string(data, "district"),
            name: extract_string(data, "name"),
            number: extract_string(data, "number"),
        }
    }

    fn uid(&self) -> &str {
        &self.uid
    }
}

// ============================================================================
// Section
// ============================================================================

/// A section: one taught instance of a course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section id
    pub uid: String,
    /// Section name
    pub name: Option<String>,
    /// Grade levels
    pub grades: Vec<String>,
    /// Period
    pub period: Option<String>,
    /// Uid of the owning course
    pub course: Option<String>,
    /// Teacher uids
    pub teachers: Vec<String>,
    /// Student uids
    pub students: Vec<String>,
    /// Always `"clever"`
    pub provider: String,
}

impl Record for Section {
    const ENDPOINT: Endpoint = Endpoint::Sections;

    fn from_item(item: &Value, _ctx: &RecordContext) -> Self {
        let data = payload(item);
        Self {
            uid: extract_string(data, "id").unwrap_or_default(),
            name: extract_string(data, "name"),
            grades: extract_string_list(data, "grades"),
            period: extract_string(data, "period"),
            course: extract_string(data, "course"),
            teachers: extract_string_list(data, "teachers"),
            students: extract_string_list(data, "students"),
            provider: PROVIDER.to_string(),
        }
    }

    fn uid(&self) -> &str {
        &self.uid
    }
}
