//! Endpoint table
//!
//! Fixed endpoint name → URL mapping, resolved once when a client is built.

use serde::{Deserialize, Serialize};

/// Default host of the data API
pub const DEFAULT_API_BASE: &str = "https://api.clever.com";

/// Default token listing URL
pub const DEFAULT_TOKENS_URL: &str = "https://clever.com/oauth/tokens";

/// Default grade passback URL
pub const DEFAULT_GRADES_URL: &str = "https://grades-api.beta.clever.com/v1/grade";

const TOKENS_PATH: &str = "/oauth/tokens";
const STUDENTS_PATH: &str = "/v2.1/students";
const TEACHERS_PATH: &str = "/v2.1/teachers";
const COURSES_PATH: &str = "/v2.1/courses";
const SECTIONS_PATH: &str = "/v2.1/sections";
const GRADES_PATH: &str = "/v1/grade";

/// Named endpoints of the roster API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// District token listing
    Tokens,
    /// Student listing
    Students,
    /// Teacher listing
    Teachers,
    /// Course listing
    Courses,
    /// Section listing
    Sections,
    /// Grade passback
    Grades,
}

impl Endpoint {
    /// Every endpoint, in table order
    pub const ALL: [Endpoint; 6] = [
        Endpoint::Tokens,
        Endpoint::Students,
        Endpoint::Teachers,
        Endpoint::Courses,
        Endpoint::Sections,
        Endpoint::Grades,
    ];

    /// Endpoint name as used in logs
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Tokens => "tokens",
            Endpoint::Students => "students",
            Endpoint::Teachers => "teachers",
            Endpoint::Courses => "courses",
            Endpoint::Sections => "sections",
            Endpoint::Grades => "grades",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved URL for every endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    tokens: String,
    students: String,
    teachers: String,
    courses: String,
    sections: String,
    grades: String,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self::clever()
    }
}

impl EndpointTable {
    /// Production endpoints
    pub fn clever() -> Self {
        Self {
            tokens: DEFAULT_TOKENS_URL.to_string(),
            students: join(DEFAULT_API_BASE, STUDENTS_PATH),
            teachers: join(DEFAULT_API_BASE, TEACHERS_PATH),
            courses: join(DEFAULT_API_BASE, COURSES_PATH),
            sections: join(DEFAULT_API_BASE, SECTIONS_PATH),
            grades: DEFAULT_GRADES_URL.to_string(),
        }
    }

    /// All endpoints under one base URL (sandboxes, proxies, mock servers)
    pub fn with_base(base: &str) -> Self {
        Self {
            tokens: join(base, TOKENS_PATH),
            students: join(base, STUDENTS_PATH),
            teachers: join(base, TEACHERS_PATH),
            courses: join(base, COURSES_PATH),
            sections: join(base, SECTIONS_PATH),
            grades: join(base, GRADES_PATH),
        }
    }

    /// URL of an endpoint
    pub fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Tokens => &self.tokens,
            Endpoint::Students => &self.students,
            Endpoint::Teachers => &self.teachers,
            Endpoint::Courses => &self.courses,
            Endpoint::Sections => &self.sections,
            Endpoint::Grades => &self.grades,
        }
    }
}

fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
