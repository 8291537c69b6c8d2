//! Batch models.

use chrono::NaiveDate;
use edudesk_core::serde::{deserialize_optional_i64, deserialize_optional_string};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ids::BatchId;
use crate::reference::{CourseRef, TrainerRef};

pub const BATCH_STATUSES: &[&str] = &["upcoming", "running", "completed"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    #[serde(flatten)]
    pub fields: BatchDraft,
    /// Enrolled student count, computed by the server.
    #[serde(default)]
    pub student_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_dates"))]
pub struct BatchDraft {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(flatten)]
    pub course: CourseRef,
    #[serde(flatten)]
    pub trainer: TrainerRef,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub timing: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 500))]
    pub capacity: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub branch_id: Option<i64>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    BATCH_STATUSES[0].to_string()
}

fn validate_dates(draft: &BatchDraft) -> Result<(), ValidationError> {
    match (draft.start_date, draft.end_date) {
        (Some(start), Some(end)) if end < start => {
            Err(ValidationError::new("end_date_before_start_date"))
        }
        _ => Ok(()),
    }
}

impl Default for BatchDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            course: CourseRef::default(),
            trainer: TrainerRef::default(),
            start_date: None,
            end_date: None,
            timing: None,
            capacity: None,
            branch_id: None,
            status: default_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Option<NaiveDate> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_batch_deserialize() {
        let json = r#"{"id":7,"name":"Evening","course_id":2,"course_name":"Java","trainer_id":4,"trainer_name":"Arun","timing":"6-8 PM","student_count":18}"#;
        let batch: Batch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.fields.trainer.label().as_deref(), Some("Arun"));
        assert_eq!(batch.student_count, Some(18));
    }

    #[test]
    fn test_batch_dates_in_order() {
        let draft = BatchDraft {
            name: "Morning".to_string(),
            start_date: date("2026-01-10"),
            end_date: date("2026-04-10"),
            ..BatchDraft::default()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_batch_end_before_start_invalid() {
        let draft = BatchDraft {
            name: "Morning".to_string(),
            start_date: date("2026-04-10"),
            end_date: date("2026-01-10"),
            ..BatchDraft::default()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_batch_zero_capacity_invalid() {
        let draft = BatchDraft {
            name: "Morning".to_string(),
            capacity: Some(0),
            ..BatchDraft::default()
        };
        assert!(draft.validate().is_err());
    }
}
