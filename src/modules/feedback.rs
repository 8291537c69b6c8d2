use edudesk_auth::Route;
use edudesk_core::permissions;
use edudesk_models::{CourseRef, FeedbackForm, FeedbackFormDraft, SelectOption};

use crate::resource::{ReferenceField, Resource};

pub struct FeedbackForms;

impl Resource for FeedbackForms {
    type Record = FeedbackForm;
    type Draft = FeedbackFormDraft;

    const NAME: &'static str = "feedback form";
    const PATH: &'static str = "feedback-forms";
    const ROUTE: Route = Route::Feedback;

    const VIEW: &'static str = permissions::FEEDBACK_VIEW;
    const ADD: &'static str = permissions::FEEDBACK_ADD;
    const EDIT: &'static str = permissions::FEEDBACK_EDIT;
    const DELETE: &'static str = permissions::FEEDBACK_DELETE;

    const FILTERS: &'static [&'static str] = &["course_id", "is_active"];
    const REFERENCES: &'static [ReferenceField] = &[ReferenceField::new(
        "course",
        CourseRef::ID_KEY,
        CourseRef::LABEL_KEY,
    )];

    fn id(record: &FeedbackForm) -> i64 {
        record.id.get()
    }

    fn hydrate(record: FeedbackForm) -> FeedbackFormDraft {
        record.fields
    }

    fn option(record: &FeedbackForm) -> SelectOption {
        SelectOption::new(record.id.to_string(), record.fields.title.clone())
    }
}
