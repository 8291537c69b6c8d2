//! Certificate models.
//!
//! Rendering and printing the certificate document happen elsewhere; only the
//! record is managed here.

use chrono::NaiveDate;
use edudesk_core::serde::deserialize_optional_string;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::CertificateId;
use crate::reference::{CourseRef, StudentRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,
    #[serde(flatten)]
    pub fields: CertificateDraft,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CertificateDraft {
    #[serde(flatten)]
    pub student: StudentRef,
    #[serde(flatten)]
    pub course: CourseRef,
    #[validate(length(min = 1, max = 50))]
    pub certificate_number: String,
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 10))]
    pub grade: Option<String>,
}
