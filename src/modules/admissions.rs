//! Admissions.

use edudesk_auth::Route;
use edudesk_core::permissions;
use edudesk_models::admissions::ADMISSION_STATUSES;
use edudesk_models::leads::LEAD_SOURCES;
use edudesk_models::{Admission, AdmissionDraft, BatchRef, CourseRef, SelectOption};

use super::plain_options;
use crate::resource::{ReferenceField, Resource};

pub struct Admissions;

impl Resource for Admissions {
    type Record = Admission;
    type Draft = AdmissionDraft;

    const NAME: &'static str = "admission";
    const PATH: &'static str = "admissions";
    const ROUTE: Route = Route::Admissions;

    const VIEW: &'static str = permissions::ADMISSIONS_VIEW;
    const ADD: &'static str = permissions::ADMISSIONS_ADD;
    const EDIT: &'static str = permissions::ADMISSIONS_EDIT;
    const DELETE: &'static str = permissions::ADMISSIONS_DELETE;

    const DEFAULT_SORT: &'static str = "admission_date";
    const FILTERS: &'static [&'static str] = &["status", "course_id", "batch_id", "source"];
    const MULTI_VALUE_FIELDS: &'static [&'static str] = &["source", "tags"];
    const REFERENCES: &'static [ReferenceField] = &[
        ReferenceField::new("course", CourseRef::ID_KEY, CourseRef::LABEL_KEY),
        ReferenceField::new("batch", BatchRef::ID_KEY, BatchRef::LABEL_KEY),
    ];

    fn id(record: &Admission) -> i64 {
        record.id.get()
    }

    fn hydrate(record: Admission) -> AdmissionDraft {
        record.fields
    }

    fn option(record: &Admission) -> SelectOption {
        SelectOption::new(record.id.to_string(), record.fields.student_name.clone())
    }

    fn field_options(field: &str) -> Vec<SelectOption> {
        match field {
            "source" => plain_options(LEAD_SOURCES),
            "status" => plain_options(ADMISSION_STATUSES),
            _ => Vec::new(),
        }
    }
}
