//! Student models.

use chrono::{DateTime, NaiveDate, Utc};
use edudesk_core::multi_value::MultiValue;
use edudesk_core::serde::{deserialize_optional_i64, deserialize_optional_string};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::StudentId;
use crate::reference::{BatchRef, CourseRef};

pub const STUDENT_STATUSES: &[&str] = &["active", "completed", "dropped", "on_hold"];

/// A student as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    #[serde(flatten)]
    pub fields: StudentDraft,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Editable student fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StudentDraft {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,
    #[serde(default)]
    pub tags: MultiValue,
    #[serde(flatten)]
    pub course: CourseRef,
    #[serde(flatten)]
    pub batch: BatchRef,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub branch_id: Option<i64>,
    #[serde(default)]
    pub admission_date: Option<NaiveDate>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    STUDENT_STATUSES[0].to_string()
}

impl Default for StudentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: None,
            phone: None,
            tags: MultiValue::new(),
            course: CourseRef::default(),
            batch: BatchRef::default(),
            branch_id: None,
            admission_date: None,
            status: default_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{BatchId, CourseId};

    #[test]
    fn test_student_deserialize() {
        let json = r#"{"id":5,"name":"Ira","tags":"Scholarship","course_id":2,"course_name":"Java","batch_id":7,"batch_name":"Evening","admission_date":"2026-06-01"}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.fields.course.id(), Some(CourseId::new(2)));
        assert_eq!(student.fields.batch.id(), Some(BatchId::new(7)));
        assert_eq!(student.fields.tags.as_slice(), ["Scholarship"]);
        assert_eq!(student.fields.status, "active");
    }

    #[test]
    fn test_student_draft_validation() {
        let draft = StudentDraft {
            name: "Ira".to_string(),
            ..StudentDraft::default()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_student_draft_long_name() {
        let draft = StudentDraft {
            name: "x".repeat(101),
            ..StudentDraft::default()
        };
        assert!(draft.validate().is_err());
    }
}
