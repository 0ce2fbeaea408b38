//! Views computed by joining fetched collections
//!
//! Neither classrooms nor enrollments have an endpoint of their own; the
//! client builds them from sections (and courses) in memory.

use super::roster::{Course, Section};
use super::types::PROVIDER;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Classroom
// ============================================================================

/// A section annotated with its course number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    /// Uid of the underlying section
    pub uid: String,
    /// Section name
    pub name: Option<String>,
    /// Section period
    pub period: Option<String>,
    /// Number of the section's course; `None` when the course is unknown
    pub course_number: Option<String>,
    /// Section grade levels
    pub grades: Vec<String>,
    /// Always `"clever"`
    pub provider: String,
}

impl Classroom {
    /// Build a classroom from a section and its (possibly missing) course
    pub fn from_section(section: &Section, course: Option<&Course>) -> Self {
        Self {
            uid: section.uid.clone(),
            name: section.name.clone(),
            period: section.period.clone(),
            course_number: course.and_then(|c| c.number.clone()),
            grades: section.grades.clone(),
            provider: PROVIDER.to_string(),
        }
    }

    /// Left join sections against courses on `section.course == course.uid`.
    ///
    /// First matching course wins; sections without a match get a `None`
    /// course number. Output order follows `sections`.
    pub fn join(sections: &[Section], courses: &[Course]) -> Vec<Self> {
        sections
            .iter()
            .map(|section| {
                let course = section
                    .course
                    .as_deref()
                    .and_then(|uid| courses.iter().find(|c| c.uid == uid));
                Self::from_section(section, course)
            })
            .collect()
    }
}

// ============================================================================
// Enrollment
// ============================================================================

/// Role a user holds in a classroom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Listed in a section's `students`
    Student,
    /// Listed in a section's `teachers`
    Teacher,
}

/// Membership of one user in one classroom
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enrollment {
    /// Section (classroom) uid
    pub classroom_uid: String,
    /// Student or teacher uid
    pub user_uid: String,
}

impl Enrollment {
    /// Create an enrollment pair
    pub fn new(classroom_uid: impl Into<String>, user_uid: impl Into<String>) -> Self {
        Self {
            classroom_uid: classroom_uid.into(),
            user_uid: user_uid.into(),
        }
    }
}

/// Enrollments partitioned by role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollments {
    /// Student enrollments
    pub student: Vec<Enrollment>,
    /// Teacher enrollments
    pub teacher: Vec<Enrollment>,
}

impl Enrollments {
    /// Expand each section's student and teacher lists into enrollments
    pub fn from_sections<'a>(sections: impl IntoIterator<Item = &'a Section>) -> Self {
        let mut enrollments = Self::default();
        for section in sections {
            enrollments.student.extend(
                section
                    .students
                    .iter()
                    .map(|uid| Enrollment::new(&section.uid, uid)),
            );
            enrollments.teacher.extend(
                section
                    .teachers
                    .iter()
                    .map(|uid| Enrollment::new(&section.uid, uid)),
            );
        }
        enrollments
    }

    /// Enrollments for one role
    pub fn get(&self, role: Role) -> &[Enrollment] {
        match role {
            Role::Student => &self.student,
            Role::Teacher => &self.teacher,
        }
    }

    /// Classroom uid → user uids for one role, users in section order
    pub fn grouped(&self, role: Role) -> BTreeMap<String, Vec<String>> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for enrollment in self.get(role) {
            groups
                .entry(enrollment.classroom_uid.clone())
                .or_default()
                .push(enrollment.user_uid.clone());
        }
        groups
    }

    /// Total number of enrollments across both roles
    pub fn len(&self) -> usize {
        self.student.len() + self.teacher.len()
    }

    /// Whether there are no enrollments at all
    pub fn is_empty(&self) -> bool {
        self.student.is_empty() && self.teacher.is_empty()
    }
}
