use edudesk_auth::Route;
use edudesk_core::permissions;
use edudesk_models::{Certificate, CertificateDraft, CourseRef, SelectOption, StudentRef};

use crate::resource::{ReferenceField, Resource};

pub struct Certificates;

impl Resource for Certificates {
    type Record = Certificate;
    type Draft = CertificateDraft;

    const NAME: &'static str = "certificate";
    const PATH: &'static str = "certificates";
    const ROUTE: Route = Route::Certificates;

    const VIEW: &'static str = permissions::CERTIFICATES_VIEW;
    const ADD: &'static str = permissions::CERTIFICATES_ADD;
    const EDIT: &'static str = permissions::CERTIFICATES_EDIT;
    const DELETE: &'static str = permissions::CERTIFICATES_DELETE;

    const DEFAULT_SORT: &'static str = "issue_date";
    const FILTERS: &'static [&'static str] = &["course_id", "student_id"];
    const REFERENCES: &'static [ReferenceField] = &[
        ReferenceField::new("student", StudentRef::ID_KEY, StudentRef::LABEL_KEY),
        ReferenceField::new("course", CourseRef::ID_KEY, CourseRef::LABEL_KEY),
    ];

    fn id(record: &Certificate) -> i64 {
        record.id.get()
    }

    fn hydrate(record: Certificate) -> CertificateDraft {
        record.fields
    }

    fn option(record: &Certificate) -> SelectOption {
        SelectOption::new(
            record.id.to_string(),
            record.fields.certificate_number.clone(),
        )
    }
}
