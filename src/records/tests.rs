//! Tests for the records module

use super::types::{extract_string, extract_string_list, payload};
use super::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

fn student_item() -> Value {
    json!({
        "data": {
            "id": "s1",
            "name": {"first": "Ada", "last": "Lovelace"},
            "sis_id": "sis-1",
            "email": "ada@school.edu",
            "credentials": {"district_username": "ada.l"}
        }
    })
}

fn keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    keys
}

fn sorted(fields: &[&str]) -> Vec<String> {
    let mut fields: Vec<String> = fields.iter().map(|s| (*s).to_string()).collect();
    fields.sort();
    fields
}

// ============================================================================
// Field extraction
// ============================================================================

#[test]
fn test_payload_unwraps_data_envelope() {
    let wrapped = json!({"data": {"id": "x"}});
    assert_eq!(payload(&wrapped)["id"], "x");

    let bare = json!({"id": "y"});
    assert_eq!(payload(&bare)["id"], "y");
}

#[test]
fn test_extract_string_paths() {
    let value = json!({"name": {"first": "Ada"}, "period": 3, "empty": ""});
    assert_eq!(extract_string(&value, "name.first"), Some("Ada".to_string()));
    assert_eq!(extract_string(&value, "period"), Some("3".to_string()));
    assert_eq!(extract_string(&value, "empty"), Some(String::new()));
    assert_eq!(extract_string(&value, "name.last"), None);
    assert_eq!(extract_string(&value, "name.first.deeper"), None);
}

#[test]
fn test_extract_string_list() {
    let value = json!({"grades": ["9", 10], "teachers": "t1"});
    assert_eq!(extract_string_list(&value, "grades"), vec!["9", "10"]);
    assert!(extract_string_list(&value, "teachers").is_empty());
    assert!(extract_string_list(&value, "students").is_empty());
}

// ============================================================================
// Student
// ============================================================================

#[test]
fn test_student_from_item() {
    let student = Student::from_item(&student_item(), &RecordContext::default());
    assert_eq!(
        student,
        Student {
            uid: "s1".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            username: Some("sis-1".to_string()),
            provider: "clever".to_string(),
        }
    );
}

#[test_case(Some(UsernameSource::SisId), Some("sis-1") ; "explicit sis id")]
#[test_case(Some(UsernameSource::Email), Some("ada@school.edu") ; "explicit email")]
#[test_case(Some(UsernameSource::DistrictUsername), Some("ada.l") ; "explicit district username")]
#[test_case(None, Some("sis-1") ; "default prefers sis id")]
fn test_username_source_selection(source: Option<UsernameSource>, expected: Option<&str>) {
    let ctx = RecordContext::with_username_source(source);
    let student = Student::from_item(&student_item(), &ctx);
    assert_eq!(student.username.as_deref(), expected);
}

#[test]
fn test_default_username_falls_back_to_email() {
    let item = json!({"data": {
        "id": "s2",
        "email": "bob@school.edu",
        "credentials": {"district_username": "bob.d"}
    }});
    let student = Student::from_item(&item, &RecordContext::default());
    assert_eq!(student.username.as_deref(), Some("bob@school.edu"));
}

#[test]
fn test_default_username_falls_back_to_district_username() {
    let item = json!({"data": {"id": "s3", "credentials": {"district_username": "cy.d"}}});
    let student = Student::from_item(&item, &RecordContext::default());
    assert_eq!(student.username.as_deref(), Some("cy.d"));
}

#[test]
fn test_empty_fields_are_kept() {
    let item = json!({"data": {
        "id": "s5",
        "name": {"first": "", "last": "Noether"},
        "sis_id": "",
        "email": "emmy@school.edu"
    }});
    let student = Student::from_item(&item, &RecordContext::default());
    assert_eq!(student.username.as_deref(), Some(""));
    assert_eq!(student.first_name.as_deref(), Some(""));

    let serialized = serde_json::to_value(&student).unwrap();
    assert_eq!(serialized["first_name"], json!(""));
}

#[test]
fn test_explicit_username_source_missing_field_is_none() {
    let item = json!({"data": {"id": "s4", "sis_id": "sis-4"}});
    let ctx = RecordContext::with_username_source(Some(UsernameSource::Email));
    let student = Student::from_item(&item, &ctx);
    assert_eq!(student.username, None);
}

#[test]
fn test_username_source_from_str() {
    assert_eq!(
        "district_username".parse::<UsernameSource>().unwrap(),
        UsernameSource::DistrictUsername
    );
    assert!("nickname".parse::<UsernameSource>().is_err());
}

// ============================================================================
// Teacher / Course / Section
// ============================================================================

#[test]
fn test_teacher_from_item() {
    let item = json!({"data": {
        "id": "t1",
        "email": "grace@school.edu",
        "name": {"first": "Grace", "last": "Hopper"}
    }});
    let teacher = Teacher::from_item(&item, &RecordContext::default());
    assert_eq!(teacher.uid, "t1");
    assert_eq!(teacher.email.as_deref(), Some("grace@school.edu"));
    assert_eq!(teacher.first_name.as_deref(), Some("Grace"));
    assert_eq!(teacher.last_name.as_deref(), Some("Hopper"));
    assert_eq!(teacher.provider, PROVIDER);
}

#[test]
fn test_section_missing_fields_are_empty() {
    let section = Section::from_item(&json!({"data": {"id": "sec1"}}), &RecordContext::default());
    assert_eq!(section.uid, "sec1");
    assert_eq!(section.name, None);
    assert_eq!(section.course, None);
    assert!(section.grades.is_empty());
    assert!(section.teachers.is_empty());
    assert!(section.students.is_empty());
    assert_eq!(section.provider, "clever");
}

#[test]
fn test_record_endpoints() {
    use crate::http::Endpoint;
    assert_eq!(Student::ENDPOINT, Endpoint::Students);
    assert_eq!(Teacher::ENDPOINT, Endpoint::Teachers);
    assert_eq!(Course::ENDPOINT, Endpoint::Courses);
    assert_eq!(Section::ENDPOINT, Endpoint::Sections);
}

// ============================================================================
// Token
// ============================================================================

#[test]
fn test_token_from_bare_item() {
    let token = Token::from_item(&json!({
        "id": "tok-id",
        "owner": {"type": "district", "id": "d1"},
        "access_token": "abc",
        "scopes": ["read:students", "read:teachers"],
        "created": "2024-08-01T12:00:00.000Z"
    }));
    assert_eq!(token.owner.owner_type.as_deref(), Some("district"));
    assert!(token.is_owned_by("d1"));
    assert!(!token.is_owned_by("d2"));
    assert_eq!(token.access_token.as_deref(), Some("abc"));
    assert_eq!(token.scopes.len(), 2);
    assert!(token.created.is_some());
}

#[test]
fn test_token_bad_created_is_none() {
    let token = Token::from_item(&json!({"owner": {"id": "d1"}, "created": "yesterday"}));
    assert!(token.created.is_none());
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_serialized_field_sets() {
    let ctx = RecordContext::default();
    let cases: Vec<(Value, Vec<String>)> = vec![
        (
            serde_json::to_value(Student::from_item(&student_item(), &ctx)).unwrap(),
            sorted(&["uid", "first_name", "last_name", "username", "provider"]),
        ),
        (
            serde_json::to_value(Teacher::default()).unwrap(),
            sorted(&["uid", "email", "first_name", "last_name", "provider"]),
        ),
        (
            serde_json::to_value(Course::default()).unwrap(),
            sorted(&["uid", "district", "name", "number"]),
        ),
        (
            serde_json::to_value(Section::default()).unwrap(),
            sorted(&[
                "uid", "name", "grades", "period", "course", "teachers", "students", "provider",
            ]),
        ),
        (
            serde_json::to_value(Classroom::default()).unwrap(),
            sorted(&["uid", "name", "period", "course_number", "grades", "provider"]),
        ),
        (
            serde_json::to_value(Enrollment::default()).unwrap(),
            sorted(&["classroom_uid", "user_uid"]),
        ),
        (
            serde_json::to_value(Token::default()).unwrap(),
            sorted(&["owner", "access_token", "scopes", "created"]),
        ),
    ];

    for (value, expected) in cases {
        assert_eq!(keys(&value), expected);
    }
}

#[test]
fn test_serialized_field_order() {
    let course = Course {
        uid: "c1".to_string(),
        district: Some("d1".to_string()),
        name: Some("Algebra".to_string()),
        number: Some("MATH-101".to_string()),
    };
    assert_eq!(
        serde_json::to_string(&course).unwrap(),
        r#"{"uid":"c1","district":"d1","name":"Algebra","number":"MATH-101"}"#
    );
}

#[test]
fn test_reapplied_serialization_reproduces_record() {
    let section = Section::from_item(
        &json!({"data": {
            "id": "sec1",
            "name": "Period 1 Algebra",
            "grades": ["9"],
            "period": "1",
            "course": "c1",
            "teachers": ["t1"],
            "students": ["s1", "s2"]
        }}),
        &RecordContext::default(),
    );
    let value = serde_json::to_value(&section).unwrap();
    let again: Section = serde_json::from_value(value).unwrap();
    assert_eq!(again, section);
}

// ============================================================================
// Derived views
// ============================================================================

fn section(uid: &str, course: Option<&str>, teachers: &[&str], students: &[&str]) -> Section {
    Section {
        uid: uid.to_string(),
        name: Some(format!("Section {uid}")),
        grades: vec!["10".to_string()],
        period: Some("2".to_string()),
        course: course.map(String::from),
        teachers: teachers.iter().map(|s| (*s).to_string()).collect(),
        students: students.iter().map(|s| (*s).to_string()).collect(),
        provider: PROVIDER.to_string(),
    }
}

#[test]
fn test_classroom_join() {
    let courses = vec![
        Course {
            uid: "c1".to_string(),
            number: Some("BIO-1".to_string()),
            ..Default::default()
        },
        Course {
            uid: "c1".to_string(),
            number: Some("BIO-DUP".to_string()),
            ..Default::default()
        },
    ];
    let sections = vec![
        section("A", Some("c1"), &[], &[]),
        section("B", Some("missing"), &[], &[]),
        section("C", None, &[], &[]),
    ];

    let classrooms = Classroom::join(&sections, &courses);
    assert_eq!(classrooms.len(), 3);
    assert_eq!(classrooms[0].uid, "A");
    assert_eq!(classrooms[0].course_number.as_deref(), Some("BIO-1"));
    assert_eq!(classrooms[0].grades, vec!["10"]);
    assert_eq!(classrooms[0].period.as_deref(), Some("2"));
    assert_eq!(classrooms[1].course_number, None);
    assert_eq!(classrooms[2].course_number, None);
}

#[test]
fn test_enrollments_from_sections() {
    let sections = vec![
        section("A", None, &["T1"], &["S1", "S2", "S3"]),
        section("B", None, &["T2"], &["S4", "S5", "S6"]),
    ];
    let enrollments = Enrollments::from_sections(&sections);

    assert_eq!(enrollments.len(), 8);
    assert_eq!(enrollments.student[0], Enrollment::new("A", "S1"));
    assert_eq!(enrollments.teacher[1], Enrollment::new("B", "T2"));

    let students = enrollments.grouped(Role::Student);
    assert_eq!(students["A"], vec!["S1", "S2", "S3"]);
    assert_eq!(students["B"], vec!["S4", "S5", "S6"]);

    let teachers = enrollments.grouped(Role::Teacher);
    assert_eq!(teachers["A"], vec!["T1"]);
    assert_eq!(teachers["B"], vec!["T2"]);
}

#[test]
fn test_enrollments_serialize_by_role() {
    let enrollments = Enrollments::from_sections(&[section("A", None, &["T1"], &["S1"])]);
    let value = serde_json::to_value(&enrollments).unwrap();
    assert_eq!(keys(&value), sorted(&["student", "teacher"]));
    assert_eq!(value["teacher"][0]["user_uid"], "T1");
}
