//! Enrolled students.

use edudesk_auth::Route;
use edudesk_core::permissions;
use edudesk_models::students::STUDENT_STATUSES;
use edudesk_models::{BatchRef, CourseRef, SelectOption, Student, StudentDraft};

use super::plain_options;
use crate::resource::{ReferenceField, Resource};

pub struct Students;

impl Resource for Students {
    type Record = Student;
    type Draft = StudentDraft;

    const NAME: &'static str = "student";
    const PATH: &'static str = "students";
    const ROUTE: Route = Route::Students;

    const VIEW: &'static str = permissions::STUDENTS_VIEW;
    const ADD: &'static str = permissions::STUDENTS_ADD;
    const EDIT: &'static str = permissions::STUDENTS_EDIT;
    const DELETE: &'static str = permissions::STUDENTS_DELETE;

    const FILTERS: &'static [&'static str] = &["status", "course_id", "batch_id"];
    const MULTI_VALUE_FIELDS: &'static [&'static str] = &["tags"];
    const REFERENCES: &'static [ReferenceField] = &[
        ReferenceField::new("course", CourseRef::ID_KEY, CourseRef::LABEL_KEY),
        ReferenceField::new("batch", BatchRef::ID_KEY, BatchRef::LABEL_KEY),
    ];

    fn id(record: &Student) -> i64 {
        record.id.get()
    }

    fn hydrate(record: Student) -> StudentDraft {
        record.fields
    }

    fn option(record: &Student) -> SelectOption {
        SelectOption::new(record.id.to_string(), record.fields.name.clone())
    }

    fn field_options(field: &str) -> Vec<SelectOption> {
        match field {
            "status" => plain_options(STUDENT_STATUSES),
            _ => Vec::new(),
        }
    }
}
