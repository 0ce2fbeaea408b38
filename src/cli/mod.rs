//! CLI module
//!
//! Command-line interface over [`crate::Client`].
//!
//! # Commands
//!
//! - `students` / `teachers` / `courses` / `sections` - List records, optionally by uid
//! - `classrooms` - Sections joined with their course numbers
//! - `enrollments` - Student and teacher enrollments per classroom
//! - `send-grade` - Post a grade payload and print the raw response

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
