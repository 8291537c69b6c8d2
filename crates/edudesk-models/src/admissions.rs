//! Admission models.
//!
//! An admission records a student's enrolment into a course and batch together
//! with the agreed fee.

use chrono::{DateTime, NaiveDate, Utc};
use edudesk_core::multi_value::MultiValue;
use edudesk_core::serde::{deserialize_optional_i64, deserialize_optional_string};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::AdmissionId;
use crate::reference::{BatchRef, CourseRef};

pub const ADMISSION_STATUSES: &[&str] = &["pending", "confirmed", "cancelled"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admission {
    pub id: AdmissionId,
    #[serde(flatten)]
    pub fields: AdmissionDraft,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AdmissionDraft {
    #[validate(length(min = 1, max = 100))]
    pub student_name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub course: CourseRef,
    #[serde(flatten)]
    pub batch: BatchRef,
    #[serde(default)]
    pub source: MultiValue,
    #[serde(default)]
    pub tags: MultiValue,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub total_fee: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub paid_fee: f64,
    #[serde(default)]
    pub admission_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub branch_id: Option<i64>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    ADMISSION_STATUSES[0].to_string()
}

impl AdmissionDraft {
    /// Fee still owed; never negative.
    pub fn balance(&self) -> f64 {
        (self.total_fee - self.paid_fee).max(0.0)
    }
}

impl Default for AdmissionDraft {
    fn default() -> Self {
        Self {
            student_name: String::new(),
            phone: None,
            email: None,
            course: CourseRef::default(),
            batch: BatchRef::default(),
            source: MultiValue::new(),
            tags: MultiValue::new(),
            total_fee: 0.0,
            paid_fee: 0.0,
            admission_date: None,
            branch_id: None,
            status: default_status(),
        }
    }
}
