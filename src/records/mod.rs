//! Record types
//!
//! Typed representations of roster payloads: the four listed kinds
//! (students, teachers, courses, sections), district tokens, and the two
//! derived views (classrooms, enrollments).

mod derived;
mod roster;
mod types;

pub use derived::{Classroom, Enrollment, Enrollments, Role};
pub use roster::{Course, Section, Student, Teacher, Token, TokenOwner};
pub use types::{Record, RecordContext, UsernameSource, PROVIDER};

#[cfg(test)]
mod tests;
