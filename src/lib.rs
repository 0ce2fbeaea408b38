//! # clever-roster
//!
//! Client for the Clever roster API: exchanges vendor credentials for a
//! district token, walks cursor-paginated listings, and maps raw payloads
//! into flat roster records.
//!
//! ## Features
//!
//! - **Token exchange**: vendor key/secret over basic auth, district token over bearer
//! - **Cursor pagination**: `limit` + `starting_after`, driven by `links[rel=next]`
//! - **Typed records**: students, teachers, courses, sections
//! - **Derived views**: classrooms (sections joined with courses) and enrollments
//! - **Grade passback**: raw POST to the grades endpoint
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use clever_roster::{Client, ClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::new("app-id", "vendor-key", "vendor-secret");
//!     let mut client = Client::from_config(&config)?;
//!
//!     for student in client.students(&[]).await? {
//!         println!("{} {:?}", student.uid, student.username);
//!     }
//!
//!     let enrollments = client.enrollments(&[]).await?;
//!     println!("{} enrollments", enrollments.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Client                             │
//! │  students  teachers  courses  sections  classrooms           │
//! │  enrollments  send_grade                                     │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───┬──────────────┬────────────┐
//! │    Auth      │    Paginate       │   Records    │    HTTP    │
//! ├──────────────┼───────────────────┼──────────────┼────────────┤
//! │ Basic →      │ limit=1000        │ key paths    │ Connection │
//! │ token list → │ starting_after    │ username     │ Retry      │
//! │ Bearer       │ links[rel=next]   │ joins        │ Backoff    │
//! └──────────────┴───────────────────┴──────────────┴────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::unused_self)]
#![allow(clippy::needless_pass_by_value)]

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod pagination;
pub mod records;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use auth::{Authenticator, AuthScheme, Credentials};
pub use client::Client;
pub use config::{ClientConfig, HttpConfig};
pub use error::{Error, Result};
pub use http::{Connection, Endpoint, EndpointTable, HttpConnection, Response};
pub use pagination::{Paginator, PAGE_LIMIT};
pub use records::{
    Classroom, Course, Enrollment, Enrollments, Record, RecordContext, Role, Section, Student,
    Teacher, Token, UsernameSource,
};
